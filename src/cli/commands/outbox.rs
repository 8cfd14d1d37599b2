//! Replication queue inspection command handler

use crate::config::Config;

use super::open_store;

pub async fn cmd_outbox(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let (pending, processed) = store.outbox_counts().await?;
    println!("Sync outbox: {pending} pending, {processed} replicated");

    let entries = store.recent_outbox(limit).await?;
    if entries.is_empty() {
        return Ok(());
    }

    println!("{:-<70}", "");
    for entry in entries {
        let status = if entry.processed { "✓" } else { "•" };
        println!(
            "{} #{:<5} {:<6} {:<7} created {}",
            status, entry.id, entry.entity, entry.action, entry.created_at
        );
    }
    println!();
    println!("Legend: ✓ replicated | • pending");

    Ok(())
}
