use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::db::StoreError;
use crate::entities::sync_outbox;
use crate::models::outbox::OutboxPayload;

pub struct OutboxRepository {
    conn: DatabaseConnection,
}

impl OutboxRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Append one pending operation. Called synchronously right after the
    /// local mutation it mirrors; no transaction spans the two (a crash in
    /// between leaves the remote copy missing; accepted durability gap).
    pub async fn enqueue(&self, entity_id: i32, payload: &OutboxPayload) -> Result<i32, StoreError> {
        let active = sync_outbox::ActiveModel {
            entity: Set(payload.entity().as_str().to_string()),
            entity_id: Set(entity_id),
            action: Set(payload.action().as_str().to_string()),
            payload: Set(serde_json::to_string(payload)?),
            processed: Set(false),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let result = sync_outbox::Entity::insert(active).exec(&self.conn).await?;
        Ok(result.last_insert_id)
    }

    /// All unprocessed entries in strict insertion order. FIFO matters:
    /// a user row must replicate before the vitals that reference it by
    /// username.
    pub async fn pending(&self) -> Result<Vec<sync_outbox::Model>, StoreError> {
        let rows = sync_outbox::Entity::find()
            .filter(sync_outbox::Column::Processed.eq(false))
            .order_by_asc(sync_outbox::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    /// Flip one entry to processed. Committed per entry so a later delivery
    /// failure cannot roll back earlier successes. The processed-only filter
    /// keeps the entry immutable once it has been replicated.
    pub async fn mark_processed(&self, id: i32) -> Result<(), StoreError> {
        sync_outbox::Entity::update_many()
            .col_expr(
                sync_outbox::Column::Processed,
                sea_orm::sea_query::Expr::value(true),
            )
            .filter(sync_outbox::Column::Id.eq(id))
            .filter(sync_outbox::Column::Processed.eq(false))
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn counts(&self) -> Result<(u64, u64), StoreError> {
        let pending = sync_outbox::Entity::find()
            .filter(sync_outbox::Column::Processed.eq(false))
            .count(&self.conn)
            .await?;
        let processed = sync_outbox::Entity::find()
            .filter(sync_outbox::Column::Processed.eq(true))
            .count(&self.conn)
            .await?;

        Ok((pending, processed))
    }

    /// Most recent entries, for the audit view.
    pub async fn recent(&self, limit: u64) -> Result<Vec<sync_outbox::Model>, StoreError> {
        let rows = sync_outbox::Entity::find()
            .order_by_desc(sync_outbox::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }
}
