//! `pwd-attack` terminal form.
//!
//! Type a username and press Enter to start an attack. Ctrl-C cancels a
//! running brute force and exits.

use std::sync::Arc;

use pwd_attack::{AttackConfig, AttackContext, AttackForm, CredentialStore};
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

fn main() -> std::io::Result<()> {
    env_logger::init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run());
    // stdin may still be parked in a blocking read
    runtime.shutdown_background();
    result
}

async fn run() -> std::io::Result<()> {
    let config = AttackConfig::from_env();
    tracing::info!("Using wordlist {:?}", config.wordlist_path);
    let ctx = Arc::new(AttackContext::new(CredentialStore::with_default_users(), config));

    let shutdown = CancellationToken::new();
    let on_ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, cancelling");
            on_ctrl_c.cancel();
        }
    });

    let form = AttackForm::new(ctx);
    let mut stdout = std::io::stdout();
    form.run(BufReader::new(tokio::io::stdin()), &mut stdout, shutdown)
        .await
}
