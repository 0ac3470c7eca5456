//! `--get-size`: print a file's size in bytes, for feeding back into `--size`.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Size of the file at `path` in bytes.
pub fn file_size(path: &Path) -> Result<u64> {
    let meta = fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    Ok(meta.len())
}

/// Print the size of `path` on stdout.
pub fn run_get_size(path: &Path) -> Result<()> {
    println!("{}", file_size(path)?);
    Ok(())
}
