//! Host-side contracts for the cable-map shell.
//!
//! This crate is the transport-agnostic half of the shell: the scoped
//! asset-store behind the page-facing bridge, the lifecycle reducer driven by
//! window events, and the console-message model for the diagnostic console
//! bridge. The concrete webview transport lives in `shell_tauri`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod assets;
pub mod console;
pub mod lifecycle;

pub use assets::{normalize_asset_name, ScopedAssetStore, ASSET_ERROR_PREFIX};
pub use console::{ConsoleLevel, ConsoleMessage};
pub use lifecycle::{LifecycleMachine, LifecyclePhase, ShellEffect, ShellEvent};
