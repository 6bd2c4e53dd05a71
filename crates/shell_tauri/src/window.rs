//! Shell window creation, immersive-mode enforcement, and event wiring.

use shell_host::{ShellEffect, ShellEvent};
use tauri::{
    AppHandle, Manager, Url, Webview, WebviewUrl, WebviewWindow, Window, WindowEvent,
};

use crate::bridge;
use crate::console;
use crate::state::ShellState;
use crate::wake::ScreenWake;

/// Label of the single shell window.
pub(crate) const MAIN_WINDOW_LABEL: &str = "main";

/// Entry document loaded exactly once at startup.
const ENTRY_DOCUMENT: &str = "cable-map.html";

/// Builds and shows the full-screen shell window hosting the entry document.
///
/// Full-screen and chrome flags are set on the builder so the window is never
/// shown with OS chrome; the bridge and console scripts are installed before
/// any page script runs.
pub(crate) fn create_shell_window(app: &AppHandle) -> tauri::Result<()> {
    let window = tauri::WebviewWindowBuilder::new(
        app,
        MAIN_WINDOW_LABEL,
        WebviewUrl::App(ENTRY_DOCUMENT.into()),
    )
    .title("cable-map")
    .fullscreen(true)
    .decorations(false)
    .visible(false)
    .initialization_script(bridge::ASSET_BRIDGE_SCRIPT)
    .initialization_script(console::CONSOLE_BRIDGE_SCRIPT)
    .on_navigation(navigation_allowed)
    .build()?;

    apply_immersive_mode(&window);
    window.show()?;
    Ok(())
}

/// Keeps every navigation inside the content view: only the app origin and
/// the asset-bridge scheme are admitted, nothing is handed to an external
/// browser.
fn navigation_allowed(url: &Url) -> bool {
    let allowed = match url.scheme() {
        "tauri" | bridge::BRIDGE_SCHEME | "about" => true,
        "http" | "https" => url
            .host_str()
            .is_some_and(|host| host == "localhost" || host.ends_with(".localhost")),
        _ => false,
    };
    if !allowed {
        tracing::warn!(%url, "blocked navigation outside the content view");
    }
    allowed
}

/// Idempotently re-asserts full-screen presentation with hidden OS chrome.
///
/// A refused full-screen request falls back to an undecorated maximized
/// window; failures are logged and never propagated, so this can run on every
/// focus-gain, resume, and page load.
pub(crate) fn apply_immersive_mode(window: &WebviewWindow) {
    if let Err(err) = window.set_fullscreen(true) {
        tracing::debug!("fullscreen request refused, hiding chrome instead: {err}");
        if let Err(err) = window.set_decorations(false) {
            tracing::debug!("decoration hide failed: {err}");
        }
        if let Err(err) = window.maximize() {
            tracing::debug!("maximize failed: {err}");
        }
    }
}

fn content_signal(window: &WebviewWindow, event_name: &str) {
    let script = format!("window.dispatchEvent(new CustomEvent('{event_name}'));");
    if let Err(err) = window.eval(&script) {
        tracing::debug!("failed to signal `{event_name}` to content: {err}");
    }
}

/// Executes reducer effects. The single executor for every [`ShellEffect`].
///
/// Content-directed effects no-op when the view is absent: lifecycle events
/// can arrive before the window exists or after teardown. Wake-lock effects
/// do not need the window and run regardless.
pub(crate) fn execute_effects(app: &AppHandle, effects: &[ShellEffect]) {
    let window = app.get_webview_window(MAIN_WINDOW_LABEL);
    for effect in effects {
        match effect {
            ShellEffect::AcquireScreenWake => app.state::<ScreenWake>().acquire(),
            ShellEffect::ReleaseScreenWake => app.state::<ScreenWake>().release(),
            ShellEffect::ExitShell => {
                // Only produced while a close request is pending; nothing
                // calls prevent_close, so the platform default proceeds.
            }
            effect => {
                let Some(window) = &window else { continue };
                content_effect(window, *effect);
            }
        }
    }
}

fn content_effect(window: &WebviewWindow, effect: ShellEffect) {
    match effect {
        ShellEffect::ApplyImmersiveMode => apply_immersive_mode(window),
        ShellEffect::ResumeContent => content_signal(window, "shell:resume"),
        ShellEffect::PauseContent => content_signal(window, "shell:pause"),
        ShellEffect::HistoryBack => {
            if let Err(err) = window.eval("history.back();") {
                tracing::debug!("history back failed: {err}");
            }
        }
        ShellEffect::DestroyContent => {
            if let Err(err) = window.destroy() {
                tracing::debug!("window destroy failed: {err}");
            }
        }
        ShellEffect::ExitShell
        | ShellEffect::AcquireScreenWake
        | ShellEffect::ReleaseScreenWake => {}
    }
}

/// Window-event hook registered on the Tauri builder.
pub(crate) fn on_window_event(window: &Window, event: &WindowEvent) {
    let app = window.app_handle();
    let state = app.state::<ShellState>();
    match event {
        WindowEvent::Focused(true) => {
            let effects = state.dispatch(ShellEvent::FocusGained);
            execute_effects(app, &effects);
        }
        WindowEvent::Focused(false) => {
            let effects = state.dispatch(ShellEvent::FocusLost);
            execute_effects(app, &effects);
        }
        WindowEvent::CloseRequested { api, .. } => {
            // The close request is the desktop back gesture: pop in-content
            // history while it is non-empty, otherwise let the close proceed.
            let effects = state.dispatch(ShellEvent::BackRequested {
                can_go_back: state.can_go_back(),
            });
            if effects.contains(&ShellEffect::HistoryBack) {
                api.prevent_close();
                state.note_history_pop();
            }
            execute_effects(app, &effects);
        }
        WindowEvent::Destroyed => {
            // The runtime has already released the webview; sealing the
            // machine keeps later callbacks from reanimating it, and the
            // teardown effects drop the wake lock.
            let effects = state.dispatch(ShellEvent::Teardown);
            execute_effects(app, &effects);
            tracing::debug!("content view released");
        }
        _ => {}
    }
}

/// Page-load hook registered on the Tauri builder.
pub(crate) fn on_page_load(webview: &Webview, payload: &tauri::webview::PageLoadPayload<'_>) {
    if !matches!(payload.event(), tauri::webview::PageLoadEvent::Finished) {
        return;
    }
    tracing::debug!(url = %payload.url(), "content view finished loading");
    let app = webview.app_handle();
    let effects = app.state::<ShellState>().record_page_load();
    execute_effects(app, &effects);
}

#[cfg(test)]
mod tests {
    use super::navigation_allowed;
    use tauri::Url;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("parse url")
    }

    #[test]
    fn navigation_stays_inside_the_content_view() {
        assert!(navigation_allowed(&url("tauri://localhost/cable-map.html")));
        assert!(navigation_allowed(&url("http://tauri.localhost/cable-map.html")));
        assert!(navigation_allowed(&url("shellassets://localhost/cable-data.json")));
        assert!(navigation_allowed(&url("http://localhost:1420/cable-map.html")));
    }

    #[test]
    fn external_targets_are_blocked() {
        assert!(!navigation_allowed(&url("https://example.com/")));
        assert!(!navigation_allowed(&url("http://evil.localhost.example.com/")));
        assert!(!navigation_allowed(&url("mailto:ops@example.com")));
        assert!(!navigation_allowed(&url("file:///etc/passwd")));
    }
}
