//! Bottom-up tree pruning with byte accounting.

use crate::rules::KeepPolicy;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Byte totals accumulated over one prune pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PruneTotals {
    pub kept: u64,
    pub deleted: u64,
}

/// Delete everything under `root` except files the policy keeps, removing
/// directories left empty along the way. Returns (kept, deleted) byte totals.
///
/// The walk is contents-first, so a directory is only evaluated once all of
/// its descendants have been resolved; emptiness cascades upward in a single
/// pass. Relative paths handed to the policy are forward-slash separated and
/// rooted at `root`'s parent (e.g. "Data/sub/file.ext").
///
/// Per-file failures are absorbed: a file that can't be deleted is counted
/// as kept and the traversal continues. A `root` that doesn't exist is a
/// no-op returning zero totals.
pub fn prune_tree(root: &Path, keep: &KeepPolicy, verbose: bool) -> PruneTotals {
    let mut totals = PruneTotals::default();

    if !root.exists() {
        return totals;
    }

    let base = root.parent().unwrap_or(root);

    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("Warning: Failed to access entry under {}: {}", root.display(), err);
                continue;
            }
        };

        let path = entry.path();

        if entry.file_type().is_dir() {
            let is_empty = fs::read_dir(path)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false);
            if is_empty {
                if let Err(err) = fs::remove_dir(path) {
                    eprintln!("Warning: Failed to remove {}: {}", path.display(), err);
                }
            }
            continue;
        }

        // Use symlink_metadata so link targets are never followed or sized
        let size = fs::symlink_metadata(path).map(|m| m.len()).unwrap_or(0);

        let rel = posix_rel(base, path);
        if keep.keep(&rel) {
            totals.kept += size;
            continue;
        }

        match fs::remove_file(path) {
            Ok(_) => {
                if verbose {
                    println!("Removed: {}", path.display());
                }
                totals.deleted += size;
            }
            Err(err) => {
                // Best-effort: leave the file in place and count it as kept.
                eprintln!("Error removing {}: {}. Skipping.", path.display(), err);
                totals.kept += size;
            }
        }
    }

    totals
}

/// Forward-slash relative path of `path` under `base`.
fn posix_rel(base: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}
