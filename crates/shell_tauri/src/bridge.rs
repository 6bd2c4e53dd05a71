//! Synchronous asset bridge exposed to the embedded page.
//!
//! The page-facing surface is one fixed global, `window.ShellAssets`, with a
//! single method `loadAsset(fileName) -> string`. The call is synchronous by
//! contract, so it is transported over a custom URI scheme with a synchronous
//! XMLHttpRequest rather than the promise-based invoke channel. The response
//! is always `200 text/plain`; failures travel in-body as `"ERROR: <message>"`
//! sentinels so the calling script never observes a raised error.

use std::path::PathBuf;

use shell_host::{ScopedAssetStore, ASSET_ERROR_PREFIX};
use tauri::http;
use tauri::{AppHandle, Manager, Runtime, UriSchemeContext};

/// URI scheme carrying bridge reads (`shellassets://localhost/<name>`).
pub const BRIDGE_SCHEME: &str = "shellassets";

/// Initialization script installing the fixed bridge global before page script
/// runs. `loadAsset` issues a synchronous request and returns the body as-is;
/// transport-level failures are converted to the same sentinel shape in-page.
pub const ASSET_BRIDGE_SCRIPT: &str = r#"
(function () {
  if (window.ShellAssets) { return; }
  var windowsHost = navigator.userAgent.indexOf('Windows') !== -1;
  var base = windowsHost ? 'http://shellassets.localhost/' : 'shellassets://localhost/';
  window.ShellAssets = {
    loadAsset: function (fileName) {
      try {
        var name = String(fileName).split('/').map(encodeURIComponent).join('/');
        var request = new XMLHttpRequest();
        request.open('GET', base + name, false);
        request.send(null);
        return request.responseText;
      } catch (err) {
        return 'ERROR: ' + (err && err.message ? err.message : 'asset bridge request failed');
      }
    }
  };
})();
"#;

/// Resolves the bundled assets root for bridge reads.
///
/// Packaged runs read from the bundled resource directory; dev runs fall back
/// to the crate-local assets directory the bundle is packaged from.
fn assets_root<R: Runtime>(app: &AppHandle<R>) -> Result<PathBuf, String> {
    let resolved = app
        .path()
        .resource_dir()
        .map_err(|err| format!("failed to resolve resource dir: {err}"))?
        .join("assets");
    if resolved.is_dir() {
        return Ok(resolved);
    }
    let dev = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    if dev.is_dir() {
        Ok(dev)
    } else {
        Err(format!(
            "bundled assets root not found at {}",
            resolved.display()
        ))
    }
}

/// Maps a request path from the bridge scheme to the response body.
///
/// The body is the asset text on success and an `"ERROR: "` sentinel on any
/// failure, including undecodable names; this function never fails.
pub fn response_body(store: Result<&ScopedAssetStore, &str>, request_path: &str) -> String {
    let store = match store {
        Ok(store) => store,
        Err(message) => return format!("{ASSET_ERROR_PREFIX}{message}"),
    };
    match urlencoding::decode(request_path) {
        Ok(name) => store.load_asset(&name),
        Err(err) => format!("{ASSET_ERROR_PREFIX}invalid asset name encoding: {err}"),
    }
}

/// Custom-protocol handler registered for [`BRIDGE_SCHEME`].
pub fn handle_bridge_request<R: Runtime>(
    ctx: UriSchemeContext<'_, R>,
    request: http::Request<Vec<u8>>,
) -> http::Response<Vec<u8>> {
    let root = assets_root(ctx.app_handle());
    let store = root.and_then(ScopedAssetStore::from_root);
    let body = response_body(
        store.as_ref().map_err(String::as_str),
        request.uri().path(),
    );
    tracing::debug!(path = request.uri().path(), bytes = body.len(), "bridge read");

    match http::Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(http::header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(body.clone().into_bytes())
    {
        Ok(response) => response,
        // Static headers cannot fail to assemble; keep the sentinel contract
        // even if they somehow do.
        Err(_) => http::Response::new(body.into_bytes()),
    }
}
