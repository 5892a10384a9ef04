//! Brute-force attack - exhaustive enumeration of fixed-length strings.
//!
//! Candidates are produced in lexicographic order over the alphabet, the
//! first position varying slowest. The search state is the tuple of
//! alphabet positions of the current candidate; the successor is obtained
//! by incrementing the last position and carrying to the left.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

/// Length of the generated candidates.
pub const DEFAULT_LENGTH: usize = 5;

/// Number of candidates between two progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1 << 22;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("Alphabet is empty")]
    Empty,
    #[error("Alphabet contains duplicate character {0:?}")]
    DuplicateChar(char),
}

/// Ordered set of distinct characters candidates are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    pub fn new(chars: &str) -> Result<Self, AlphabetError> {
        let mut seen = Vec::new();
        for c in chars.chars() {
            if seen.contains(&c) {
                return Err(AlphabetError::DuplicateChar(c));
            }
            seen.push(c);
        }
        if seen.is_empty() {
            return Err(AlphabetError::Empty);
        }
        Ok(Self { chars: seen })
    }

    /// The 52 Latin letters, lowercase first: `a..z` then `A..Z`.
    pub fn ascii_letters() -> Self {
        Self {
            chars: ('a'..='z').chain('A'..='Z').collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.chars.len()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn index_of(&self, c: char) -> Option<usize> {
        self.chars.iter().position(|&a| a == c)
    }

    fn render(&self, indices: &[usize]) -> String {
        indices.iter().map(|&i| self.chars[i]).collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::ascii_letters()
    }
}

#[derive(Debug, Clone)]
pub struct BruteForceConfig {
    pub alphabet: Alphabet,
    pub length: usize,
    pub progress_interval: u64,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::ascii_letters(),
            length: DEFAULT_LENGTH,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl BruteForceConfig {
    /// Number of candidates, `alphabet.size() ^ length`, saturating at `u64::MAX`.
    pub fn search_space(&self) -> u64 {
        u32::try_from(self.length)
            .ok()
            .and_then(|exp| (self.alphabet.size() as u64).checked_pow(exp))
            .unwrap_or(u64::MAX)
    }

    /// Zero-based position of `candidate` in enumeration order.
    ///
    /// `None` if the candidate has the wrong length or uses characters
    /// outside the alphabet, i.e. it is never generated.
    pub fn position_of(&self, candidate: &str) -> Option<u64> {
        let base = self.alphabet.size() as u64;
        self.indices_of(candidate)?
            .into_iter()
            .try_fold(0u64, |acc, i| acc.checked_mul(base)?.checked_add(i as u64))
    }

    fn indices_of(&self, candidate: &str) -> Option<Vec<usize>> {
        let indices = candidate
            .chars()
            .map(|c| self.alphabet.index_of(c))
            .collect::<Option<Vec<_>>>()?;
        (indices.len() == self.length).then_some(indices)
    }
}

/// Advances `indices` to the lexicographic successor.
///
/// Returns `false` once the last combination has been passed.
fn increment(indices: &mut [usize], base: usize) -> bool {
    for slot in indices.iter_mut().rev() {
        *slot += 1;
        if *slot < base {
            return true;
        }
        *slot = 0;
    }
    false
}

/// Iterator over every candidate of a given length, in search order.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    alphabet: &'a Alphabet,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl<'a> Combinations<'a> {
    pub fn new(alphabet: &'a Alphabet, length: usize) -> Self {
        Self {
            alphabet,
            indices: vec![0; length],
            started: false,
            done: false,
        }
    }

    /// Steps to the next candidate and returns its alphabet positions,
    /// without building the string.
    pub fn next_indices(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if !increment(&mut self.indices, self.alphabet.size()) {
            self.done = true;
            return None;
        }
        Some(&self.indices)
    }
}

impl Iterator for Combinations<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let alphabet = self.alphabet;
        self.next_indices().map(|indices| alphabet.render(indices))
    }
}

/// Result of a brute-force run. `tried` counts compared candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BruteForceOutcome {
    Found { password: String, tried: u64 },
    Exhausted { tried: u64 },
    Cancelled { tried: u64 },
}

/// Enumerates candidates until one equals `target`.
///
/// Every `config.progress_interval` candidates `on_progress` receives the
/// number tried so far and the cancellation token (async only) is checked.
///
/// A target that can never be generated (wrong length, or characters
/// outside the alphabet) is reported as `Exhausted { tried: 0 }` without
/// enumerating.
pub fn brute_force_attack<F: FnMut(u64)>(
    target: &SecretString,
    config: &BruteForceConfig,
    #[cfg(feature = "async")] token: Option<&CancellationToken>,
    mut on_progress: F,
) -> BruteForceOutcome {
    let Some(target_indices) = config.indices_of(target.expose_secret()) else {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            "Target outside the search space ({} chars from {} letters), skipping enumeration",
            config.length,
            config.alphabet.size()
        );
        return BruteForceOutcome::Exhausted { tried: 0 };
    };

    let interval = config.progress_interval.max(1);
    let mut combinations = Combinations::new(&config.alphabet, config.length);
    let mut tried: u64 = 0;

    #[cfg(feature = "tracing")]
    tracing::info!("Brute force started over {} candidates", config.search_space());

    loop {
        if tried % interval == 0 {
            if tried > 0 {
                on_progress(tried);
            }
            #[cfg(feature = "async")]
            {
                if token.is_some_and(|t| t.is_cancelled()) {
                    #[cfg(feature = "tracing")]
                    tracing::info!("Brute force cancelled after {} candidates", tried);
                    return BruteForceOutcome::Cancelled { tried };
                }
            }
        }

        let Some(indices) = combinations.next_indices() else {
            return BruteForceOutcome::Exhausted { tried };
        };
        tried += 1;
        if indices == target_indices.as_slice() {
            return BruteForceOutcome::Found {
                password: config.alphabet.render(indices),
                tried,
            };
        }
    }
}
