use pretty_assertions::assert_eq;
use shell_host::{ScopedAssetStore, ASSET_ERROR_PREFIX};
use shell_tauri::bridge::{response_body, ASSET_BRIDGE_SCRIPT, BRIDGE_SCHEME};
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("{prefix}_{}_{}", process::id(), nanos));
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

#[test]
fn serves_asset_text_for_request_paths() {
    let root = temp_dir("bridge_protocol_serve");
    fs::write(root.join("cable-data.json"), "{\"a\":1}\n{\"b\":2}\n{\"c\":3}")
        .expect("write fixture");
    let store = ScopedAssetStore::from_root(&root).expect("init asset store");

    let body = response_body(Ok(&store), "/cable-data.json");
    assert_eq!(body, "{\"a\":1}\n{\"b\":2}\n{\"c\":3}\n");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn decodes_percent_encoded_request_paths() {
    let root = temp_dir("bridge_protocol_decode");
    fs::write(root.join("north segment.json"), "{}").expect("write fixture");
    let store = ScopedAssetStore::from_root(&root).expect("init asset store");

    assert_eq!(response_body(Ok(&store), "/north%20segment.json"), "{}\n");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn failures_travel_in_body_as_sentinels() {
    let root = temp_dir("bridge_protocol_sentinel");
    let store = ScopedAssetStore::from_root(&root).expect("init asset store");

    let missing = response_body(Ok(&store), "/does-not-exist.json");
    assert_eq!(&missing[..7], ASSET_ERROR_PREFIX);

    let no_store = response_body(Err("bundled assets root not found"), "/cable-data.json");
    assert_eq!(
        no_store,
        format!("{ASSET_ERROR_PREFIX}bundled assets root not found")
    );

    let bad_encoding = response_body(Ok(&store), "/%ff");
    assert!(
        bad_encoding.starts_with(ASSET_ERROR_PREFIX),
        "got: {bad_encoding}"
    );

    let _ = fs::remove_dir_all(root);
}

#[test]
fn init_script_installs_the_fixed_bridge_global() {
    assert!(ASSET_BRIDGE_SCRIPT.contains("window.ShellAssets"));
    assert!(ASSET_BRIDGE_SCRIPT.contains("loadAsset"));
    assert!(ASSET_BRIDGE_SCRIPT.contains(&format!("{BRIDGE_SCHEME}://localhost/")));
    // The request must stay synchronous: open(..., false).
    assert!(ASSET_BRIDGE_SCRIPT.contains("base + name, false"));
}
