//! Tauri shell hosting the bundled cable-map page in a full-screen webview.
//!
//! The shell is glue only: it creates the window, keeps OS chrome hidden,
//! forwards window lifecycle events into the `shell_host` reducer, and exposes
//! the synchronous asset bridge plus the diagnostic console bridge to the
//! embedded page. All interactive logic lives in the bundled page itself.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

#[doc(hidden)]
pub mod bridge;
mod console;
mod state;
mod wake;
mod window;

use state::ShellState;
use wake::ScreenWake;

/// Starts the Tauri shell process.
pub fn run() {
    tauri::Builder::default()
        .manage(ShellState::new())
        .manage(ScreenWake::default())
        .register_uri_scheme_protocol(bridge::BRIDGE_SCHEME, bridge::handle_bridge_request)
        .invoke_handler(tauri::generate_handler![console::console_log])
        .setup(|app| {
            window::create_shell_window(app.handle())?;
            Ok(())
        })
        .on_page_load(window::on_page_load)
        .on_window_event(window::on_window_event)
        .run(tauri::generate_context!())
        .expect("shell_tauri failed to run Tauri application");
}
