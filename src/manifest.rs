//! Allowlist extraction from the web frontend's asset manifest.
//!
//! The manifest (web-frontend/assets.js) references optional Qt skins via
//! raw relative paths like `raw:../frontend-qt6/res/<file>`. Those file
//! names form the allowlist for pruning the staged frontend-qt6/res tree.
//! This is a textual extraction, not a parse of the manifest's syntax.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

// Captured file name runs to the closing quote or end of line.
static RES_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"raw:\.\./frontend-qt6/res/([^'"\n\r]+)"#).expect("res reference pattern")
});

/// Extract the set of distinct referenced file names from manifest text.
/// Returns bare names (not paths), whitespace-trimmed.
pub fn scan_res_allowlist(text: &str) -> HashSet<String> {
    RES_REF
        .captures_iter(text)
        .map(|cap| cap[1].trim().to_string())
        .collect()
}

/// Read the manifest and build the resource allowlist.
///
/// A missing manifest and an empty allowlist are both configuration errors:
/// zero extracted entries almost certainly means the marker format changed,
/// not that nothing should survive. Malformed byte sequences in the manifest
/// are replaced, never fatal.
pub fn load_res_allowlist(manifest: &Path) -> Result<HashSet<String>> {
    let bytes = fs::read(manifest)
        .with_context(|| format!("Missing manifest: {}", manifest.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let allow = scan_res_allowlist(&text);
    if allow.is_empty() {
        bail!(
            "No res allowlist entries parsed from: {}",
            manifest.display()
        );
    }

    Ok(allow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_extracts_referenced_names() {
        let text = r#"
            loadImage('hat', 'raw:../frontend-qt6/res/skin_a.png');
            loadImage('flag', "raw:../frontend-qt6/res/skin_b.png");
        "#;
        let allow = scan_res_allowlist(text);
        assert_eq!(allow.len(), 2);
        assert!(allow.contains("skin_a.png"));
        assert!(allow.contains("skin_b.png"));
    }

    #[test]
    fn test_scan_dedupes_repeated_references() {
        let text = "raw:../frontend-qt6/res/skin_a.png\nraw:../frontend-qt6/res/skin_a.png";
        let allow = scan_res_allowlist(text);
        assert_eq!(allow.len(), 1);
    }

    #[test]
    fn test_scan_capture_stops_at_quote_or_newline() {
        let quoted = "x = 'raw:../frontend-qt6/res/a.png' + rest";
        assert!(scan_res_allowlist(quoted).contains("a.png"));

        let bare_line = "raw:../frontend-qt6/res/b.png\nsomething else";
        assert!(scan_res_allowlist(bare_line).contains("b.png"));
    }

    #[test]
    fn test_scan_ignores_other_raw_paths() {
        let text = "raw:../other-dir/res/nope.png";
        assert!(scan_res_allowlist(text).is_empty());
    }

    #[test]
    fn test_scan_trims_whitespace() {
        let text = "raw:../frontend-qt6/res/padded.png \nnext";
        assert!(scan_res_allowlist(text).contains("padded.png"));
    }

    #[test]
    fn test_scan_empty_text_yields_empty_set() {
        assert!(scan_res_allowlist("").is_empty());
    }

    #[test]
    fn test_load_missing_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_res_allowlist(&dir.path().join("assets.js")).unwrap_err();
        assert!(err.to_string().contains("Missing manifest"));
    }

    #[test]
    fn test_load_manifest_without_markers_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("assets.js");
        fs::write(&manifest, "const images = [];").unwrap();

        let err = load_res_allowlist(&manifest).unwrap_err();
        assert!(err.to_string().contains("No res allowlist entries"));
    }

    #[test]
    fn test_load_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("assets.js");
        let mut bytes = b"\xff\xfe garbage\n".to_vec();
        bytes.extend_from_slice(b"raw:../frontend-qt6/res/skin_a.png\n");
        bytes.extend_from_slice(b"\xf0\x28\x8c\x28");
        fs::write(&manifest, bytes).unwrap();

        let allow = load_res_allowlist(&manifest).unwrap();
        assert!(allow.contains("skin_a.png"));
    }
}
