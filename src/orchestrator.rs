//! Attack orchestrator - username lookup, dictionary phase, brute-force fallback.

use std::path::PathBuf;

use thiserror::Error;

#[cfg(feature = "async")]
use std::sync::Arc;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::attacks::{BruteForceConfig, BruteForceOutcome, brute_force_attack, dictionary_attack};
use crate::credentials::CredentialStore;
use crate::wordlist::{DEFAULT_WORDLIST_PATH, WordlistError, get_wordlist_path, load_wordlist};

#[derive(Error, Debug)]
pub enum AttackError {
    #[error(transparent)]
    Wordlist(#[from] WordlistError),
    #[error("Attack worker stopped unexpectedly: {0}")]
    Worker(String),
}

#[cfg(feature = "async")]
impl From<tokio::task::JoinError> for AttackError {
    fn from(e: tokio::task::JoinError) -> Self {
        AttackError::Worker(e.to_string())
    }
}

/// The single result of one attack attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackOutcome {
    UserNotFound,
    DictionaryHit(String),
    BruteForceHit(String),
    BruteForceExhausted,
    Cancelled,
}

/// Notifications emitted while an attack is running.
#[derive(Debug)]
pub enum AttackEvent {
    /// The dictionary phase missed; brute force starts next.
    DictionaryMiss,
    BruteForceProgress { tried: u64, total: u64 },
    /// Final result, only sent by the channel-based runner.
    Finished(Result<AttackOutcome, AttackError>),
}

#[derive(Debug, Clone)]
pub struct AttackConfig {
    pub wordlist_path: PathBuf,
    pub brute_force: BruteForceConfig,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            wordlist_path: PathBuf::from(DEFAULT_WORDLIST_PATH),
            brute_force: BruteForceConfig::default(),
        }
    }
}

impl AttackConfig {
    /// Default settings with the wordlist path resolved from the environment.
    pub fn from_env() -> Self {
        Self {
            wordlist_path: get_wordlist_path(),
            brute_force: BruteForceConfig::default(),
        }
    }
}

/// Everything an attack needs, built once at startup.
#[derive(Debug, Default)]
pub struct AttackContext {
    pub store: CredentialStore,
    pub config: AttackConfig,
}

impl AttackContext {
    pub fn new(store: CredentialStore, config: AttackConfig) -> Self {
        Self { store, config }
    }
}

/// Runs one attack attempt against `username`.
///
/// # Arguments
/// * `ctx` - Credential store and settings
/// * `username` - Account to attack
/// * `token` - Optional cancellation token (async feature only)
/// * `on_event` - Receives `DictionaryMiss` and brute-force progress
///
/// # Returns
/// The outcome of the attempt, or an error if the wordlist cannot be loaded.
/// Unknown users short-circuit before the wordlist is read.
pub fn attempt_login<F: FnMut(AttackEvent)>(
    ctx: &AttackContext,
    username: &str,
    #[cfg(feature = "async")] token: Option<&CancellationToken>,
    mut on_event: F,
) -> Result<AttackOutcome, AttackError> {
    let Some(target) = ctx.store.lookup(username) else {
        #[cfg(feature = "tracing")]
        tracing::info!("Attack aborted: unknown user {:?}", username);
        return Ok(AttackOutcome::UserNotFound);
    };

    let candidates = load_wordlist(&ctx.config.wordlist_path)?;
    if let Some(password) = dictionary_attack(target, &candidates) {
        #[cfg(feature = "tracing")]
        tracing::info!("Dictionary attack succeeded for {:?}", username);
        return Ok(AttackOutcome::DictionaryHit(password.to_string()));
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Dictionary attack failed for {:?}, starting brute force", username);
    on_event(AttackEvent::DictionaryMiss);

    let brute_force = &ctx.config.brute_force;
    let total = brute_force.search_space();
    let report = |tried| on_event(AttackEvent::BruteForceProgress { tried, total });

    #[cfg(feature = "async")]
    let outcome = brute_force_attack(target, brute_force, token, report);

    #[cfg(not(feature = "async"))]
    let outcome = brute_force_attack(target, brute_force, report);

    #[cfg(feature = "tracing")]
    tracing::info!("Brute force for {:?} finished: {:?}", username, outcome);

    Ok(match outcome {
        BruteForceOutcome::Found { password, .. } => AttackOutcome::BruteForceHit(password),
        BruteForceOutcome::Exhausted { .. } => AttackOutcome::BruteForceExhausted,
        BruteForceOutcome::Cancelled { .. } => AttackOutcome::Cancelled,
    })
}

/// Async version that runs the attack on the blocking pool and sends
/// progress plus the final result via channel.
#[cfg(feature = "async")]
pub async fn attempt_login_tx(
    ctx: Arc<AttackContext>,
    username: String,
    token: CancellationToken,
    tx: mpsc::Sender<AttackEvent>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("attack on {:?} is about to start...", username);

    let worker_tx = tx.clone();
    let task = tokio::task::spawn_blocking(move || {
        // Stops the search once nobody is listening.
        let search_token = token.child_token();
        let result = attempt_login(&ctx, &username, Some(&search_token), |event| {
            if worker_tx.blocking_send(event).is_err() {
                search_token.cancel();
            }
        });
        let _ = worker_tx.blocking_send(AttackEvent::Finished(result));
    });

    if let Err(e) = task.await {
        #[cfg(feature = "tracing")]
        tracing::error!("Attack task failed: {}", e);
        // The worker never got to report; unblock the receiver.
        let _ = tx.send(AttackEvent::Finished(Err(e.into()))).await;
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use crate::attacks::Alphabet;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn setup_with_tempfile(passwords: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for pwd in passwords {
            writeln!(temp_file, "{}", pwd).expect("Failed to write");
        }
        temp_file
    }

    async fn collect(rx: &mut mpsc::Receiver<AttackEvent>) -> Vec<AttackEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            let done = matches!(event, AttackEvent::Finished(_));
            events.push(event);
            if done {
                break;
            }
        }
        events
    }

    #[tokio::test]
    async fn test_attempt_login_tx_dictionary_hit() {
        let wordlist = setup_with_tempfile(&["admin"]);
        let config = AttackConfig {
            wordlist_path: wordlist.path().to_path_buf(),
            ..AttackConfig::default()
        };
        let ctx = Arc::new(AttackContext::new(CredentialStore::with_default_users(), config));
        let (tx, mut rx) = mpsc::channel(8);

        attempt_login_tx(ctx, "admin".to_string(), CancellationToken::new(), tx).await;

        let events = collect(&mut rx).await;
        assert_eq!(events.len(), 1);
        match &events[0] {
            AttackEvent::Finished(Ok(outcome)) => {
                assert_eq!(*outcome, AttackOutcome::DictionaryHit("admin".to_string()));
            }
            other => panic!("Expected Finished, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_attempt_login_tx_streams_miss_and_progress() {
        let wordlist = setup_with_tempfile(&["nope"]);
        let config = AttackConfig {
            wordlist_path: wordlist.path().to_path_buf(),
            brute_force: BruteForceConfig {
                alphabet: Alphabet::new("ab").unwrap(),
                length: 4,
                progress_interval: 4,
            },
        };
        let store = CredentialStore::new().with_user("bob", "bbba");
        let ctx = Arc::new(AttackContext::new(store, config));
        let (tx, mut rx) = mpsc::channel(64);

        attempt_login_tx(ctx, "bob".to_string(), CancellationToken::new(), tx).await;

        let events = collect(&mut rx).await;
        assert!(matches!(events.first(), Some(AttackEvent::DictionaryMiss)));
        let progress = events
            .iter()
            .filter(|e| matches!(e, AttackEvent::BruteForceProgress { .. }))
            .count();
        assert_eq!(progress, 3);
        assert!(matches!(
            events.last(),
            Some(AttackEvent::Finished(Ok(AttackOutcome::BruteForceHit(p)))) if p == "bbba"
        ));
    }

    #[tokio::test]
    async fn test_attempt_login_tx_cancelled() {
        let wordlist = setup_with_tempfile(&["nope"]);
        let config = AttackConfig {
            wordlist_path: wordlist.path().to_path_buf(),
            ..AttackConfig::default()
        };
        let ctx = Arc::new(AttackContext::new(CredentialStore::with_default_users(), config));
        let (tx, mut rx) = mpsc::channel(8);
        let token = CancellationToken::new();
        token.cancel();

        attempt_login_tx(ctx, "hacker".to_string(), token, tx).await;

        let events = collect(&mut rx).await;
        assert!(matches!(
            events.last(),
            Some(AttackEvent::Finished(Ok(AttackOutcome::Cancelled)))
        ));
    }

    #[tokio::test]
    async fn test_attempt_login_tx_cancelled_mid_search() {
        let wordlist = setup_with_tempfile(&["nope"]);
        let config = AttackConfig {
            wordlist_path: wordlist.path().to_path_buf(),
            brute_force: BruteForceConfig {
                progress_interval: 1000,
                ..BruteForceConfig::default()
            },
        };
        let ctx = Arc::new(AttackContext::new(CredentialStore::with_default_users(), config));
        let (tx, mut rx) = mpsc::channel(8);
        let token = CancellationToken::new();

        let task = tokio::spawn(attempt_login_tx(ctx, "hacker".to_string(), token.clone(), tx));

        let mut saw_progress = false;
        let mut finished = None;
        while let Some(event) = rx.recv().await {
            match event {
                AttackEvent::BruteForceProgress { .. } => {
                    saw_progress = true;
                    token.cancel();
                }
                AttackEvent::Finished(result) => {
                    finished = Some(result);
                    break;
                }
                AttackEvent::DictionaryMiss => {}
            }
        }
        task.await.expect("runner should not panic");

        assert!(saw_progress);
        assert!(matches!(finished, Some(Ok(AttackOutcome::Cancelled))));
    }

    #[tokio::test]
    async fn test_attempt_login_tx_stops_when_receiver_dropped() {
        let wordlist = setup_with_tempfile(&["nope"]);
        let config = AttackConfig {
            wordlist_path: wordlist.path().to_path_buf(),
            brute_force: BruteForceConfig {
                progress_interval: 1000,
                ..BruteForceConfig::default()
            },
        };
        let ctx = Arc::new(AttackContext::new(CredentialStore::with_default_users(), config));
        let (tx, rx) = mpsc::channel(8);
        drop(rx);

        // "LmNop" sits ~270 million candidates in; only an early stop finishes in time.
        let run = attempt_login_tx(ctx, "hacker".to_string(), CancellationToken::new(), tx);
        let result = tokio::time::timeout(Duration::from_secs(10), run).await;

        assert!(result.is_ok(), "search kept running without a receiver");
    }

    #[tokio::test]
    async fn test_worker_panic_is_reported_as_error() {
        let join_err = tokio::spawn(async { panic!("boom") })
            .await
            .expect_err("task should panic");

        let err = AttackError::from(join_err);

        assert!(matches!(err, AttackError::Worker(_)));
        assert!(err.to_string().starts_with("Attack worker stopped unexpectedly"));
    }

    #[tokio::test]
    async fn test_attempt_login_tx_wordlist_error() {
        let config = AttackConfig {
            wordlist_path: PathBuf::from("/nonexistent/dictionary.txt"),
            ..AttackConfig::default()
        };
        let ctx = Arc::new(AttackContext::new(CredentialStore::with_default_users(), config));
        let (tx, mut rx) = mpsc::channel(8);

        attempt_login_tx(ctx, "rana".to_string(), CancellationToken::new(), tx).await;

        let events = collect(&mut rx).await;
        assert!(matches!(
            events.as_slice(),
            [AttackEvent::Finished(Err(AttackError::Wordlist(_)))]
        ));
    }
}
