use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use humansize::{format_size, BINARY};
use stagetrim::{split_file, trim_runtime_assets, PruneTotals, TrimOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Trim staged WASM build output down to the assets the web runtime needs",
    long_about = None
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prune the staged Data/ and frontend-qt6/res trees
    Trim {
        /// Path to the staged build output (build/wasm/bin)
        #[arg(long)]
        bin_dir: PathBuf,

        /// Repo root (for reading web-frontend/assets.js)
        #[arg(long)]
        repo_root: PathBuf,

        /// Don't delete, just report
        #[arg(long)]
        dry_run: bool,

        /// Print each removed file
        #[arg(long, short)]
        verbose: bool,
    },

    /// Split an Emscripten .data pack into .partN chunks
    Split {
        /// Path to the .data file to split
        #[arg(long)]
        input: PathBuf,

        /// Chunk size in MB
        #[arg(long, default_value_t = 50)]
        chunk_mb: u64,

        /// Delete the original .data after splitting
        #[arg(long)]
        delete_original: bool,
    },
}

fn report_totals(label: &str, totals: PruneTotals) {
    println!(
        "Trimmed {}: kept {}, deleted {}",
        label.bold(),
        format_size(totals.kept, BINARY).green(),
        format_size(totals.deleted, BINARY).red()
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Trim {
            bin_dir,
            repo_root,
            dry_run,
            verbose,
        } => {
            let report =
                trim_runtime_assets(&bin_dir, &repo_root, TrimOptions { dry_run, verbose })?;

            match report.pruned {
                None => {
                    println!("[dry-run] Would prune {}", report.data_dir.display());
                    println!(
                        "[dry-run] Would prune {} to {} files",
                        report.res_dir.display(),
                        report.allowlist_entries
                    );
                }
                Some((data_totals, res_totals)) => {
                    report_totals("Data/", data_totals);
                    report_totals("frontend-qt6/res", res_totals);
                }
            }
        }

        Command::Split {
            input,
            chunk_mb,
            delete_original,
        } => {
            let chunk_bytes = chunk_mb * 1024 * 1024;
            let parts = split_file(&input, chunk_bytes, delete_original)?;
            for part in parts {
                println!("{}", part.display());
            }
        }
    }

    Ok(())
}
