//! Splitting a bundled data pack into fixed-size chunks.
//!
//! Static hosts often cap single-file sizes, so the Emscripten `.data` pack
//! is split into sequential `.partN` siblings the loader can fetch and
//! reassemble.

use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

const COPY_BUF_BYTES: usize = 1024 * 1024;

/// Split `src` into chunks of at most `chunk_bytes`, named
/// `<file-name>.part0`, `.part1`, ... next to the input. Returns the part
/// paths in order. An empty input produces no parts. With
/// `delete_original`, the input is removed after a fully successful split.
pub fn split_file(src: &Path, chunk_bytes: u64, delete_original: bool) -> Result<Vec<PathBuf>> {
    if chunk_bytes == 0 {
        bail!("chunk size must be > 0");
    }

    let size = fs::metadata(src)
        .with_context(|| format!("input not found: {}", src.display()))?
        .len();
    if size == 0 {
        return Ok(Vec::new());
    }

    let parts = size.div_ceil(chunk_bytes);
    let mut out_paths = Vec::with_capacity(parts as usize);

    let mut reader = BufReader::new(
        File::open(src).with_context(|| format!("Failed to open {}", src.display()))?,
    );
    let mut buf = vec![0u8; COPY_BUF_BYTES];

    for i in 0..parts {
        let out_path = part_path(src, i)?;
        let mut out = BufWriter::new(
            File::create(&out_path)
                .with_context(|| format!("Failed to create {}", out_path.display()))?,
        );

        let mut remaining = chunk_bytes;
        while remaining > 0 {
            let want = remaining.min(COPY_BUF_BYTES as u64) as usize;
            let n = reader
                .read(&mut buf[..want])
                .with_context(|| format!("Failed to read {}", src.display()))?;
            if n == 0 {
                break;
            }
            out.write_all(&buf[..n])
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
            remaining -= n as u64;
        }

        out.flush()
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        out_paths.push(out_path);
    }

    if delete_original {
        fs::remove_file(src).with_context(|| format!("Failed to remove {}", src.display()))?;
    }

    Ok(out_paths)
}

fn part_path(src: &Path, index: u64) -> Result<PathBuf> {
    let mut name = src
        .file_name()
        .with_context(|| format!("input has no file name: {}", src.display()))?
        .to_os_string();
    name.push(format!(".part{}", index));
    Ok(src.with_file_name(name))
}
