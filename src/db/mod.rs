use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

mod error;
pub use error::StoreError;

pub use crate::entities::sync_outbox::Model as OutboxEntry;
pub use repositories::user::{NewUser, User};
pub use repositories::vital::Vital;

use crate::models::outbox::OutboxPayload;

/// Local store: users, vitals, and the sync outbox in one SQLite file.
///
/// Holds a connection pool; every operation acquires a connection scoped to
/// the call and releases it on all exit paths.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Local store ready & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn vital_repo(&self) -> repositories::vital::VitalRepository {
        repositories::vital::VitalRepository::new(self.conn.clone())
    }

    fn outbox_repo(&self) -> repositories::outbox::OutboxRepository {
        repositories::outbox::OutboxRepository::new(self.conn.clone())
    }

    pub async fn register_user(&self, new: &NewUser) -> Result<i32, StoreError> {
        self.user_repo().register(new).await
    }

    pub async fn login_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        self.user_repo().login(username, password).await
    }

    pub async fn add_vital(
        &self,
        user_id: i32,
        date: &str,
        pressure_text: &str,
        glucose_text: &str,
        notes: &str,
    ) -> Result<i32, StoreError> {
        self.vital_repo()
            .add(user_id, date, pressure_text, glucose_text, notes)
            .await
    }

    pub async fn list_vitals(&self, user_id: i32) -> Result<Vec<Vital>, StoreError> {
        self.vital_repo().list_for_user(user_id).await
    }

    pub async fn enqueue(&self, entity_id: i32, payload: &OutboxPayload) -> Result<i32, StoreError> {
        self.outbox_repo().enqueue(entity_id, payload).await
    }

    pub async fn pending_outbox(&self) -> Result<Vec<OutboxEntry>, StoreError> {
        self.outbox_repo().pending().await
    }

    pub async fn mark_outbox_processed(&self, id: i32) -> Result<(), StoreError> {
        self.outbox_repo().mark_processed(id).await
    }

    pub async fn outbox_counts(&self) -> Result<(u64, u64), StoreError> {
        self.outbox_repo().counts().await
    }

    pub async fn recent_outbox(&self, limit: u64) -> Result<Vec<OutboxEntry>, StoreError> {
        self.outbox_repo().recent(limit).await
    }
}

/// Resolve the local database file once at startup: user data directory when
/// writable, working directory otherwise.
#[must_use]
pub fn default_database_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("vitalog");
        if std::fs::create_dir_all(&dir).is_ok() {
            let probe = dir.join(".write-probe");
            if std::fs::write(&probe, b"").is_ok() {
                let _ = std::fs::remove_file(&probe);
                return dir.join("vitalog.db");
            }
        }
    }

    PathBuf::from("vitalog.db")
}
