// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        let e = io::Error::new(io::ErrorKind::AlreadyExists, "path exists but is not a directory");
        return Err(Error::io(dir, e));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}

/// Create or truncate `path`, creating parent directories first.
pub fn create_truncated(path: &Path) -> Result<BufWriter<File>> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    Ok(BufWriter::new(file))
}

/// Open an existing file for appending.
pub fn open_append(path: &Path) -> Result<BufWriter<File>> {
    let file = OpenOptions::new().append(true).open(path).map_err(|e| Error::io(path, e))?;
    Ok(BufWriter::new(file))
}

/// `out/` and `out\` both mean "a directory", even before it exists.
pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

/// Use the platform separator throughout a user-typed path.
pub fn normalize_separators(p: &str) -> PathBuf {
    let sep = std::path::MAIN_SEPARATOR;
    PathBuf::from(p.chars().map(|c| if c == '/' || c == '\\' { sep } else { c }).collect::<String>())
}
