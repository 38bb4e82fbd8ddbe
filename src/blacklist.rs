//! Common-password registry
//!
//! A bundled list of frequently used and breached passwords is always active.
//! Deployments may extend it with an external file. Matching is
//! case-insensitive: entries and candidates are trimmed and lowercased.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, RwLock};
use thiserror::Error;

pub const BLACKLIST_PATH_ENV: &str = "PWD_BLACKLIST_PATH";

static BUNDLED_PASSWORDS: LazyLock<HashSet<String>> =
    LazyLock::new(|| normalize_lines(include_str!("../assets/common-passwords.txt")));

static LOADED_PASSWORDS: RwLock<Option<HashSet<String>>> = RwLock::new(None);

#[derive(Error, Debug)]
pub enum BlacklistError {
    #[error("Blacklist file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read blacklist file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Blacklist file is empty")]
    EmptyFile,
}

fn normalize_lines(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Returns the extra blacklist file configured through `PWD_BLACKLIST_PATH`.
pub fn get_blacklist_path() -> Option<PathBuf> {
    std::env::var(BLACKLIST_PATH_ENV).ok().map(PathBuf::from)
}

/// Extends the bundled list with the file named by `PWD_BLACKLIST_PATH`.
///
/// Returns the number of entries loaded from the file, or `0` when the
/// variable is not set (the bundled list alone stays active).
///
/// # Errors
///
/// Returns error if:
/// - File does not exist
/// - File cannot be read
/// - File is empty
pub fn init_blacklist() -> Result<usize, BlacklistError> {
    match get_blacklist_path() {
        Some(path) => init_blacklist_from_path(path),
        None => Ok(0),
    }
}

/// Extends the bundled list with the entries of `path`.
///
/// Idempotent: once a file has been loaded, later calls return the size of
/// the already loaded set without touching the filesystem.
pub fn init_blacklist_from_path<P: AsRef<Path>>(path: P) -> Result<usize, BlacklistError> {
    {
        let guard = LOADED_PASSWORDS.read().unwrap_or_else(|e| e.into_inner());
        if let Some(loaded) = guard.as_ref() {
            return Ok(loaded.len());
        }
    }

    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!(path = %path.display(), "Blacklist initialization failed: file not found");
        return Err(BlacklistError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!(path = %path.display(), "Blacklist initialization failed: empty file");
        return Err(BlacklistError::EmptyFile);
    }

    let set = normalize_lines(&content);
    let count = set.len();
    {
        let mut guard = LOADED_PASSWORDS.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(set);
    }

    #[cfg(feature = "tracing")]
    tracing::info!(count, path = %path.display(), "Blacklist extended");

    Ok(count)
}

/// Returns a snapshot of the effective list (bundled plus loaded entries).
pub fn get_blacklist() -> HashSet<String> {
    let mut set = BUNDLED_PASSWORDS.clone();
    let guard = LOADED_PASSWORDS.read().unwrap_or_else(|e| e.into_inner());
    if let Some(loaded) = guard.as_ref() {
        set.extend(loaded.iter().cloned());
    }
    set
}

/// Checks if a password is on the effective list (case-insensitive).
pub fn is_blacklisted(password: &str) -> bool {
    let candidate = password.trim().to_lowercase();
    if candidate.is_empty() {
        return false;
    }
    if BUNDLED_PASSWORDS.contains(&candidate) {
        return true;
    }
    let guard = LOADED_PASSWORDS.read().unwrap_or_else(|e| e.into_inner());
    guard
        .as_ref()
        .map(|bl| bl.contains(&candidate))
        .unwrap_or(false)
}

/// Drops the loaded entries for testing purposes. The bundled list stays.
#[cfg(test)]
pub fn reset_blacklist_for_testing() {
    let mut guard = LOADED_PASSWORDS.write().unwrap_or_else(|e| e.into_inner());
    *guard = None;
}
