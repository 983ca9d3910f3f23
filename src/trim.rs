//! Orchestration of a trim run over a staged wasm build directory.
//!
//! The staged layout has two prunable subtrees: `Data/` (kept down to the
//! static retention rules) and `frontend-qt6/res/` (kept down to the file
//! names the web frontend's asset manifest actually references).

use crate::manifest::load_res_allowlist;
use crate::prune::{prune_tree, PruneTotals};
use crate::rules::{web_runtime_rules, KeepPolicy};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Options controlling trim behavior (runtime flags)
#[derive(Clone, Copy)]
pub struct TrimOptions {
    pub dry_run: bool,
    pub verbose: bool,
}

/// Outcome of a trim run
pub struct TrimReport {
    pub data_dir: PathBuf,
    pub res_dir: PathBuf,
    /// Number of file names extracted from the asset manifest
    pub allowlist_entries: usize,
    /// (Data/, frontend-qt6/res) totals; None on a dry run
    pub pruned: Option<(PruneTotals, PruneTotals)>,
}

/// Trim the staged tree at `bin_dir` down to what the web runtime needs.
///
/// The manifest is read and validated before anything is deleted, so a
/// missing manifest or an empty allowlist aborts with zero mutation. In
/// dry-run mode the report only names the targets and the allowlist size.
pub fn trim_runtime_assets(
    bin_dir: &Path,
    repo_root: &Path,
    options: TrimOptions,
) -> Result<TrimReport> {
    let data_dir = bin_dir.join("Data");
    let res_dir = bin_dir.join("frontend-qt6").join("res");
    let manifest = repo_root.join("web-frontend").join("assets.js");

    let allowlist = load_res_allowlist(&manifest)?;
    let allowlist_entries = allowlist.len();

    if options.dry_run {
        return Ok(TrimReport {
            data_dir,
            res_dir,
            allowlist_entries,
            pruned: None,
        });
    }

    let data_policy = KeepPolicy::Rules(web_runtime_rules()?);
    let res_policy = KeepPolicy::Allowlist(allowlist);

    let data_totals = prune_tree(&data_dir, &data_policy, options.verbose);
    let res_totals = prune_tree(&res_dir, &res_policy, options.verbose);

    Ok(TrimReport {
        data_dir,
        res_dir,
        allowlist_entries,
        pruned: Some((data_totals, res_totals)),
    })
}
