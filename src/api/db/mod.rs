use anyhow::Result;
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Set, Statement,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub mod migrator;

use crate::api::entities::{users, vitals};

#[derive(Debug, Clone)]
pub struct NewServerUser {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub birthdate: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewServerVital {
    pub date: String,
    pub pressure_systolic: Option<i32>,
    pub pressure_diastolic: Option<i32>,
    pub glucose: Option<f64>,
    pub notes: Option<String>,
}

/// The server's own two-table store. Keys are assigned here and mean nothing
/// to clients; users reconcile by username.
#[derive(Clone)]
pub struct ServerStore {
    pub conn: DatabaseConnection,
}

impl ServerStore {
    pub async fn new(db_url: &str) -> Result<Self> {
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
        opt.max_connections(5)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!("Server store ready & migrations applied");

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Insert a user, or resolve a duplicate username to the existing row.
    /// Replaying the same registration must converge on one remote id, so a
    /// unique-constraint violation falls back to a lookup instead of erroring.
    pub async fn create_user(&self, new: &NewServerUser) -> Result<i32> {
        let active = users::ActiveModel {
            username: Set(new.username.clone()),
            password: Set(new.password.clone()),
            full_name: Set(new.full_name.clone()),
            birthdate: Set(new.birthdate.clone()),
            email: Set(new.email.clone()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        match users::Entity::insert(active).exec(&self.conn).await {
            Ok(result) => Ok(result.last_insert_id),
            Err(err) => {
                if matches!(
                    err.sql_err(),
                    Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
                ) {
                    let existing = self
                        .find_user_id_by_username(&new.username)
                        .await?
                        .ok_or_else(|| {
                            anyhow::anyhow!("duplicate username vanished: {}", new.username)
                        })?;
                    Ok(existing)
                } else {
                    Err(err.into())
                }
            }
        }
    }

    pub async fn find_user_id_by_username(&self, username: &str) -> Result<Option<i32>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await?;

        Ok(user.map(|u| u.id))
    }

    pub async fn create_vital(&self, user_id: i32, new: &NewServerVital) -> Result<i32> {
        let now = chrono::Utc::now().to_rfc3339();
        let active = vitals::ActiveModel {
            user_id: Set(user_id),
            date: Set(new.date.clone()),
            pressure_systolic: Set(new.pressure_systolic),
            pressure_diastolic: Set(new.pressure_diastolic),
            glucose: Set(new.glucose),
            notes: Set(new.notes.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = vitals::Entity::insert(active).exec(&self.conn).await?;
        Ok(result.last_insert_id)
    }
}

/// Server database file: user data directory when writable, working
/// directory otherwise. Distinct from the client's file on purpose.
#[must_use]
pub fn default_server_database_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("vitalog");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir.join("server.db");
        }
    }

    PathBuf::from("server.db")
}
