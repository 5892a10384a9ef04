//! Wordlist loading module
//!
//! Reads the candidate passwords used by the dictionary phase.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the wordlist location.
pub const WORDLIST_PATH_ENV: &str = "PWD_WORDLIST_PATH";

/// Wordlist location used when no override is set.
pub const DEFAULT_WORDLIST_PATH: &str = "dictionary.txt";

#[derive(Error, Debug)]
pub enum WordlistError {
    #[error("Wordlist file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read wordlist file: {0}")]
    ReadError(#[from] std::io::Error),
}

/// Returns the wordlist file path.
///
/// Priority:
/// 1. Environment variable `PWD_WORDLIST_PATH`
/// 2. Default path `dictionary.txt`
pub fn get_wordlist_path() -> PathBuf {
    std::env::var(WORDLIST_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_WORDLIST_PATH))
}

/// Loads the candidate passwords from `path`.
///
/// Every line becomes one candidate with surrounding whitespace trimmed.
/// Blank lines are kept as empty candidates and the file order is preserved.
/// The file is read in a single call and closed before returning.
///
/// # Errors
///
/// Returns error if:
/// - File does not exist
/// - File cannot be read or is not valid UTF-8
pub fn load_wordlist<P: AsRef<Path>>(path: P) -> Result<Vec<String>, WordlistError> {
    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Wordlist load FAILED: FileNotFound {:?}", path);
        return Err(WordlistError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).inspect_err(|_e| {
        #[cfg(feature = "tracing")]
        tracing::error!("Wordlist load FAILED: {} ({:?})", _e, path);
    })?;

    let candidates: Vec<String> = content.lines().map(|l| l.trim().to_string()).collect();

    #[cfg(feature = "tracing")]
    tracing::info!("Wordlist loaded: {} candidates from {:?}", candidates.len(), path);

    Ok(candidates)
}
