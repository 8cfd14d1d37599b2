use sea_orm::entity::prelude::*;

/// One pending (or already replicated) remote operation.
///
/// Rows are append-only: `processed` flips false -> true exactly once and the
/// row is never deleted, so the table doubles as a replication audit log.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sync_outbox")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Entity kind: `user` or `vital`.
    pub entity: String,

    /// Local id of the entity the payload was built from.
    pub entity_id: i32,

    /// Only `create` today.
    pub action: String,

    /// JSON document, tagged by entity kind (`models::outbox::OutboxPayload`).
    pub payload: String,

    pub processed: bool,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
