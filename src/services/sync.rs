//! Outbox drain: best-effort replication of pending local mutations.
//!
//! Everything here degrades to "no progress" or "partial progress". Failures
//! are classified per entry and logged, never raised to the caller: sync is
//! opportunistic and will simply run again on the next trigger.

use tracing::{debug, info, warn};

use crate::clients::BackendClient;
use crate::db::{OutboxEntry, Store};
use crate::models::outbox::OutboxPayload;

/// What happened to a single outbox entry during one sync pass.
///
/// Only `Delivered` flips the processed flag. Both failure classes leave the
/// entry pending; the distinction exists so a retry/backoff policy can be
/// layered on without re-deriving failure classification.
#[derive(Debug)]
pub enum DeliveryOutcome {
    Delivered { remote_id: i64 },
    TransientFailure(String),
    PermanentFailure(String),
}

pub struct SyncService {
    store: Store,
    backend: BackendClient,
}

impl SyncService {
    #[must_use]
    pub const fn new(store: Store, backend: BackendClient) -> Self {
        Self { store, backend }
    }

    /// Probe the backend, then drain all pending outbox entries in insertion
    /// order. Returns the number of entries marked processed by this call.
    pub async fn sync_if_possible(&self) -> usize {
        if !self.backend.is_reachable().await {
            debug!("Backend {} not reachable, skipping sync", self.backend.base_url());
            return 0;
        }

        let pending = match self.store.pending_outbox().await {
            Ok(rows) => rows,
            Err(err) => {
                warn!("Could not read the sync outbox: {err}");
                return 0;
            }
        };

        if pending.is_empty() {
            return 0;
        }

        let mut processed = 0;
        for entry in pending {
            let entry_id = entry.id;
            match self.deliver(&entry).await {
                DeliveryOutcome::Delivered { remote_id } => {
                    // Per-entry commit: a later failure must not take earlier
                    // successes down with it.
                    if let Err(err) = self.store.mark_outbox_processed(entry_id).await {
                        warn!(
                            "Entry {entry_id} delivered (remote id {remote_id}) but not marked: {err}"
                        );
                        continue;
                    }
                    debug!("Outbox entry {entry_id} replicated as remote id {remote_id}");
                    processed += 1;
                }
                DeliveryOutcome::TransientFailure(reason) => {
                    debug!("Outbox entry {entry_id} not delivered, will retry: {reason}");
                }
                DeliveryOutcome::PermanentFailure(reason) => {
                    warn!("Outbox entry {entry_id} rejected by backend: {reason}");
                }
            }
        }

        if processed > 0 {
            info!("Replicated {processed} outbox entries");
        }
        processed
    }

    async fn deliver(&self, entry: &OutboxEntry) -> DeliveryOutcome {
        let payload: OutboxPayload = match serde_json::from_str(&entry.payload) {
            Ok(payload) => payload,
            Err(err) => {
                return DeliveryOutcome::PermanentFailure(format!("undecodable payload: {err}"));
            }
        };

        let result = match &payload {
            OutboxPayload::User(user) => self.backend.create_user(user).await,
            OutboxPayload::Vital(vital) => self.backend.create_vital(vital).await,
        };

        match result {
            Ok(remote_id) => DeliveryOutcome::Delivered { remote_id },
            Err(err) if err.is_transient() => DeliveryOutcome::TransientFailure(err.to_string()),
            Err(err) => DeliveryOutcome::PermanentFailure(err.to_string()),
        }
    }
}
