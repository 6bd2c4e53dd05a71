//! Scoped read-only access to the bundled assets served over the page bridge.

use std::fs;
use std::path::{Path, PathBuf};

/// Prefix carried by every sentinel error string returned across the bridge.
pub const ASSET_ERROR_PREFIX: &str = "ERROR: ";

/// Canonicalizes a bridge-supplied file name before it touches the filesystem.
///
/// Page script is free to pass loosely formed names: stray whitespace,
/// Windows-style separators, `.`/`..` hops, duplicate slashes. The result is
/// always rooted at the assets root (`/`-prefixed, `/`-separated) with those
/// artifacts collapsed away; a name with nothing left after collapsing comes
/// back as the bare root `/`, which the store refuses to read.
pub fn normalize_asset_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let mut out = String::new();
    for segment in trimmed.replace('\\', "/").split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            if let Some(idx) = out.rfind('/') {
                out.truncate(idx);
            }
            continue;
        }
        out.push('/');
        out.push_str(segment);
    }

    if out.is_empty() {
        "/".to_string()
    } else {
        out
    }
}

/// Joins the text's lines with `"\n"`, appending one after the final line.
///
/// Line terminators in the input (`\n` or `\r\n`) are replaced, so CRLF assets
/// come back with bare `\n` separators. An empty input stays empty.
pub fn join_lines(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 1);
    for line in raw.lines() {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[derive(Debug, Clone)]
/// Read-only asset accessor rooted at a canonical bundled-assets directory.
///
/// Every read re-resolves and re-reads from disk; there is no caching and no
/// mutation surface. Names that resolve outside the root are rejected.
pub struct ScopedAssetStore {
    root: PathBuf,
}

impl ScopedAssetStore {
    /// Creates a scoped asset store rooted at an existing directory.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, String> {
        let root = root.as_ref();
        let canonical = fs::canonicalize(root)
            .map_err(|err| format!("failed to canonicalize assets root {}: {err}", root.display()))?;
        if !canonical.is_dir() {
            return Err(format!(
                "assets root {} is not a directory",
                canonical.display()
            ));
        }
        Ok(Self { root: canonical })
    }

    /// Returns the canonical root this store serves from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, String> {
        let normalized = normalize_asset_name(name);
        if normalized == "/" {
            return Err("asset name must not be empty".to_string());
        }

        let mut native = self.root.clone();
        for segment in normalized.trim_start_matches('/').split('/') {
            if !segment.is_empty() {
                native.push(segment);
            }
        }

        let canonical = fs::canonicalize(&native)
            .map_err(|err| format!("failed to open asset `{normalized}`: {err}"))?;
        if canonical.starts_with(&self.root) {
            Ok(canonical)
        } else {
            Err(format!(
                "asset `{normalized}` resolves outside the bundled assets root"
            ))
        }
    }

    /// Reads the named asset as UTF-8 text with lines joined by `"\n"`.
    pub fn read_text(&self, name: &str) -> Result<String, String> {
        let path = self.resolve(name)?;
        let metadata = fs::metadata(&path)
            .map_err(|err| format!("failed to read metadata {}: {err}", path.display()))?;
        if !metadata.is_file() {
            return Err(format!(
                "asset `{}` is not a file",
                normalize_asset_name(name)
            ));
        }
        let raw = fs::read_to_string(&path)
            .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
        Ok(join_lines(&raw))
    }

    /// Bridge-facing read that never fails across the script boundary.
    ///
    /// Returns the asset text on success and `"ERROR: <message>"` on any
    /// failure, because the calling script can only receive a string.
    pub fn load_asset(&self, name: &str) -> String {
        match self.read_text(name) {
            Ok(text) => text,
            Err(message) => format!("{ASSET_ERROR_PREFIX}{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{join_lines, normalize_asset_name};

    #[test]
    fn bridge_names_collapse_to_rooted_paths() {
        // Whatever shape page script hands over, the store sees one rooted
        // form: plain names gain a leading slash, backslashes and duplicate
        // or trailing separators disappear, and dot hops are resolved before
        // resolution ever reaches the filesystem.
        let cases = [
            ("cable-data.json", "/cable-data.json"),
            ("maps//north/", "/maps/north"),
            ("./maps/../cable-map.html", "/cable-map.html"),
            ("maps\\north\\segment.json", "/maps/north/segment.json"),
            // Traversal attempts bottom out at the virtual root instead of
            // climbing above it.
            ("../../secrets", "/secrets"),
            ("/../../", "/"),
            // Degenerate names collapse to the unreadable bare root.
            ("", "/"),
            ("   ", "/"),
        ];

        for (name, rooted) in cases {
            assert_eq!(normalize_asset_name(name), rooted, "name={name:?}");
        }
    }

    #[test]
    fn join_lines_appends_separator_after_every_line() {
        assert_eq!(join_lines(""), "");
        assert_eq!(join_lines("a"), "a\n");
        assert_eq!(join_lines("a\n"), "a\n");
        assert_eq!(join_lines("a\r\nb"), "a\nb\n");
        assert_eq!(join_lines("a\n\nb"), "a\n\nb\n");
    }
}
