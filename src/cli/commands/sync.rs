//! Manual sync command handler

use crate::config::Config;

use super::{open_store, sync_service};

pub async fn cmd_sync(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let (pending, _) = store.outbox_counts().await?;

    if pending == 0 {
        println!("Sync queue is empty, nothing to replicate.");
        return Ok(());
    }

    println!("Replicating {pending} pending entries to {}...", config.sync.backend_url);

    let service = sync_service(config, store.clone())?;
    let processed = service.sync_if_possible().await;

    if processed == 0 {
        println!("Nothing replicated: backend unreachable or every entry failed.");
    } else {
        let (remaining, _) = store.outbox_counts().await?;
        println!("✓ Replicated {processed} entries ({remaining} still pending)");
    }

    Ok(())
}
