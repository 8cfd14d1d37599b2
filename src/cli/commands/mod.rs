//! Command handlers.

mod add;
mod export;
mod list;
mod login;
mod outbox;
mod register;
mod serve;
mod sync;

pub use add::cmd_add_vital;
pub use export::cmd_export;
pub use list::cmd_list_vitals;
pub use login::cmd_login;
pub use outbox::cmd_outbox;
pub use register::cmd_register;
pub use serve::cmd_serve;
pub use sync::cmd_sync;

use crate::clients::BackendClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::SyncService;

pub(crate) async fn open_store(config: &Config) -> anyhow::Result<Store> {
    Store::with_pool_options(
        &config.database_url(),
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await
}

pub(crate) fn sync_service(config: &Config, store: Store) -> anyhow::Result<SyncService> {
    let backend = BackendClient::new(
        &config.sync.backend_url,
        config.sync.health_timeout_seconds,
        config.sync.request_timeout_seconds,
    )?;
    Ok(SyncService::new(store, backend))
}

/// Opportunistic post-mutation sync. Returns how many entries were
/// replicated; 0 covers both "offline" and "nothing pending".
pub(crate) async fn sync_after_mutation(config: &Config, store: &Store) -> anyhow::Result<usize> {
    if !config.sync.after_mutation {
        return Ok(0);
    }
    let service = sync_service(config, store.clone())?;
    Ok(service.sync_if_possible().await)
}
