//! Diagnostic console bridge: in-page console output mirrored to tracing.

use shell_host::{ConsoleLevel, ConsoleMessage};

/// Initialization script wrapping the page's `console` methods. Each call is
/// forwarded to the `console_log` command with the message text and a
/// best-effort source location, then handed to the original method. Purely
/// observational; forwarding failures are swallowed in-page.
pub(crate) const CONSOLE_BRIDGE_SCRIPT: &str = r#"
(function () {
  if (window.__shellConsoleBridged) { return; }
  window.__shellConsoleBridged = true;
  var invoke = window.__TAURI__ && window.__TAURI__.core
    ? window.__TAURI__.core.invoke
    : (window.__TAURI_INTERNALS__ ? window.__TAURI_INTERNALS__.invoke : null);
  if (!invoke) { return; }
  ['log', 'info', 'warn', 'error', 'debug'].forEach(function (level) {
    var original = console[level] ? console[level].bind(console) : null;
    console[level] = function () {
      var parts = [];
      for (var i = 0; i < arguments.length; i++) {
        var value = arguments[i];
        if (typeof value === 'string') {
          parts.push(value);
        } else {
          try { parts.push(JSON.stringify(value)); } catch (e) { parts.push(String(value)); }
        }
      }
      var sourceId = 'cable-map.html';
      var lineNumber = 0;
      try {
        var frame = (new Error().stack || '').split('\n')[2] || '';
        var match = frame.match(/(\S+?):(\d+):\d+\)?\s*$/);
        if (match) {
          sourceId = match[1];
          lineNumber = parseInt(match[2], 10) || 0;
        }
      } catch (e) { }
      try {
        invoke('console_log', {
          entry: { level: level, message: parts.join(' '), sourceId: sourceId, lineNumber: lineNumber }
        });
      } catch (e) { }
      if (original) { original.apply(null, arguments); }
    };
  });
})();
"#;

/// Routes one mirrored in-page console message to the shell's log sink.
#[tauri::command]
pub fn console_log(entry: ConsoleMessage) {
    match entry.level {
        ConsoleLevel::Error => tracing::error!(target: "webview", "{}", entry.summary()),
        ConsoleLevel::Warn => tracing::warn!(target: "webview", "{}", entry.summary()),
        ConsoleLevel::Info => tracing::info!(target: "webview", "{}", entry.summary()),
        ConsoleLevel::Log | ConsoleLevel::Debug => {
            tracing::debug!(target: "webview", "{}", entry.summary())
        }
    }
}
