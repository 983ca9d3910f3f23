//! StageTrim - Staged WASM Asset Trimmer
//!
//! StageTrim prunes a staged wasm build-output tree (`build/wasm/bin`) down to the
//! assets the web runtime needs, so static hosts don't have to serve a full `Data/`
//! tree that is already packed into the engine's data file. Retention is decided
//! per file: a fixed rule set (from retain.toml) gates the `Data/` subtree, and an
//! allowlist scanned out of the web frontend's asset manifest gates
//! `frontend-qt6/res/`. Everything else is deleted, with directories that end up
//! empty collapsed in the same pass.
//!
//! It also splits bundled `.data` packs into `.partN` chunks for hosts that cap
//! single-file sizes.

pub mod manifest;
pub mod prune;
pub mod rules;
pub mod split;
pub mod trim;

// Re-export commonly used items
pub use manifest::{load_res_allowlist, scan_res_allowlist};
pub use prune::{prune_tree, PruneTotals};
pub use rules::{web_runtime_rules, KeepPolicy, RetentionRules};
pub use split::split_file;
pub use trim::{trim_runtime_assets, TrimOptions, TrimReport};
