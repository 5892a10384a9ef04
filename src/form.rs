//! Terminal front end: one username field and one "Start Attack" action.
//!
//! Outcomes are shown as titled dialog lines, brute-force progress as an
//! `indicatif` bar.

use std::fmt;

use crate::orchestrator::{AttackError, AttackOutcome};

#[cfg(feature = "cli")]
use std::io::{self, Write};

#[cfg(feature = "cli")]
use std::sync::Arc;

#[cfg(feature = "cli")]
use indicatif::{ProgressBar, ProgressStyle};

#[cfg(feature = "cli")]
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[cfg(feature = "cli")]
use tokio::sync::mpsc;

#[cfg(feature = "cli")]
use tokio_util::sync::CancellationToken;

#[cfg(feature = "cli")]
use crate::orchestrator::{AttackContext, AttackEvent, attempt_login_tx};

pub const WINDOW_TITLE: &str = "Dictionary & Brute Force Attack";
pub const USERNAME_LABEL: &str = "Enter Username:";
pub const START_BUTTON: &str = "Start Attack";

#[cfg(feature = "cli")]
const EVENT_BUFFER: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Error,
    Info,
    Success,
    Failure,
}

impl DialogKind {
    pub fn title(self) -> &'static str {
        match self {
            DialogKind::Error => "Error",
            DialogKind::Info => "Info",
            DialogKind::Success => "Success",
            DialogKind::Failure => "Failure",
        }
    }
}

/// A modal notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub message: String,
}

impl Dialog {
    fn new(kind: DialogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shown when the dictionary phase misses and brute force begins.
    pub fn dictionary_miss() -> Self {
        Self::new(
            DialogKind::Info,
            "Dictionary attack failed! Starting brute force attack...",
        )
    }

    /// Dialog reporting the final result of an attack.
    pub fn from_result(result: &Result<AttackOutcome, AttackError>) -> Self {
        match result {
            Ok(AttackOutcome::UserNotFound) => Self::new(DialogKind::Error, "Username not found!"),
            Ok(AttackOutcome::DictionaryHit(password)) => Self::new(
                DialogKind::Success,
                format!("Dictionary attack succeeded! Password: {}", password),
            ),
            Ok(AttackOutcome::BruteForceHit(password)) => Self::new(
                DialogKind::Success,
                format!("Brute force attack succeeded! Password: {}", password),
            ),
            Ok(AttackOutcome::BruteForceExhausted) => {
                Self::new(DialogKind::Failure, "Brute force attack failed!")
            }
            Ok(AttackOutcome::Cancelled) => {
                Self::new(DialogKind::Info, "Brute force attack cancelled.")
            }
            Err(AttackError::Wordlist(e)) => {
                Self::new(DialogKind::Error, format!("Could not load wordlist: {}", e))
            }
            Err(e) => Self::new(DialogKind::Error, format!("Attack failed: {}", e)),
        }
    }
}

impl fmt::Display for Dialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.title(), self.message)
    }
}

/// Progress bar for the brute-force phase.
#[cfg(feature = "cli")]
fn brute_force_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}, {eta} remaining)",
    ) {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}

/// The attack form. Each entered username presses "Start Attack".
#[cfg(feature = "cli")]
pub struct AttackForm {
    ctx: Arc<AttackContext>,
}

#[cfg(feature = "cli")]
impl AttackForm {
    pub fn new(ctx: Arc<AttackContext>) -> Self {
        Self { ctx }
    }

    /// Reads usernames from `input` until end of input or `shutdown`.
    pub async fn run<R, W>(&self, input: R, out: &mut W, shutdown: CancellationToken) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "== {} ==", WINDOW_TITLE)?;
        let mut lines = input.lines();

        loop {
            write!(out, "{} ", USERNAME_LABEL)?;
            out.flush()?;

            let line = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                line = lines.next_line() => line?,
            };
            // `lines()` strips the terminator; the rest is the field as typed.
            let Some(username) = line else { break };

            writeln!(out, "[{}] {}", START_BUTTON, username)?;
            self.start_attack(&username, out, &shutdown).await?;
        }

        writeln!(out)?;
        Ok(())
    }

    /// Runs one attack in the background and renders its events.
    pub async fn start_attack<W: Write>(
        &self,
        username: &str,
        out: &mut W,
        shutdown: &CancellationToken,
    ) -> io::Result<()> {
        let (tx, mut rx) = mpsc::channel(EVENT_BUFFER);
        let task = tokio::spawn(attempt_login_tx(
            Arc::clone(&self.ctx),
            username.to_string(),
            shutdown.child_token(),
            tx,
        ));

        let mut progress: Option<ProgressBar> = None;
        while let Some(event) = rx.recv().await {
            match event {
                AttackEvent::DictionaryMiss => writeln!(out, "{}", Dialog::dictionary_miss())?,
                AttackEvent::BruteForceProgress { tried, total } => progress
                    .get_or_insert_with(|| brute_force_bar(total))
                    .set_position(tried),
                AttackEvent::Finished(result) => {
                    if let Some(bar) = progress.take() {
                        bar.finish_and_clear();
                    }
                    writeln!(out, "{}", Dialog::from_result(&result))?;
                    break;
                }
            }
        }
        if let Some(bar) = progress {
            bar.finish_and_clear();
        }

        if let Err(_e) = task.await {
            #[cfg(feature = "tracing")]
            tracing::error!("Attack runner failed: {}", _e);
        }
        Ok(())
    }
}
