//! Dictionary and brute-force password attack demo
//!
//! This library recovers the password of an account from a small in-memory
//! credential table, first by looking it up in a wordlist and then by
//! enumerating every fixed-length string over an alphabet.
//!
//! # Features
//!
//! - `async` (default): Background attacks with cancellation and progress
//! - `tracing`: Enables logging via tracing crate
//! - `cli` (default): Terminal form (`AttackForm`, `indicatif` progress) and the
//!   `pwd-attack` binary
//!
//! # Environment Variables
//!
//! - `PWD_WORDLIST_PATH`: Custom path to the wordlist file
//!   (default: `dictionary.txt`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_attack::{attempt_login, AttackConfig, AttackContext, AttackOutcome, CredentialStore};
//!
//! let ctx = AttackContext::new(CredentialStore::with_default_users(), AttackConfig::from_env());
//!
//! #[cfg(feature = "async")]
//! let outcome = attempt_login(&ctx, "admin", None, |_| {});
//!
//! #[cfg(not(feature = "async"))]
//! let outcome = attempt_login(&ctx, "admin", |_| {});
//!
//! match outcome.expect("wordlist should load") {
//!     AttackOutcome::DictionaryHit(pwd) => println!("Found in wordlist: {pwd}"),
//!     other => println!("{other:?}"),
//! }
//! ```

// Internal modules
mod credentials;
mod form;
mod orchestrator;
mod wordlist;

pub mod attacks;

// Public API
pub use attacks::{
    Alphabet, AlphabetError, BruteForceConfig, BruteForceOutcome, Combinations,
    brute_force_attack, dictionary_attack,
};
pub use credentials::CredentialStore;
pub use form::{Dialog, DialogKind, START_BUTTON, USERNAME_LABEL, WINDOW_TITLE};
pub use orchestrator::{
    AttackConfig, AttackContext, AttackError, AttackEvent, AttackOutcome, attempt_login,
};
pub use wordlist::{WordlistError, get_wordlist_path, load_wordlist};

#[cfg(feature = "cli")]
pub use form::AttackForm;

#[cfg(feature = "async")]
pub use orchestrator::attempt_login_tx;
