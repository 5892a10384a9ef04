//! Dictionary attack - scans a candidate list for the target password.

use secrecy::{ExposeSecret, SecretString};

/// Looks for `target` in `candidates`.
///
/// # Returns
/// - `Some(candidate)` for the first exact (case-sensitive) match
/// - `None` if the list is exhausted without a match
pub fn dictionary_attack<'a>(target: &SecretString, candidates: &'a [String]) -> Option<&'a str> {
    let target = target.expose_secret();
    candidates
        .iter()
        .map(String::as_str)
        .find(|candidate| *candidate == target)
}
