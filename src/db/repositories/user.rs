use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::db::StoreError;
use crate::entities::users;

/// User data returned from the repository (without the stored password).
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub full_name: Option<String>,
    pub birthdate: String,
    pub email: Option<String>,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            full_name: model.full_name,
            birthdate: model.birthdate,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

/// Registration input. Optional fields are `None` when the form left them
/// blank.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub birthdate: String,
    pub email: Option<String>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new user, relying on the unique constraint for duplicate
    /// detection. No existence pre-check: that would race with the insert.
    pub async fn register(&self, new: &NewUser) -> Result<i32, StoreError> {
        let username = new.username.trim();
        let password = new.password.trim();
        let birthdate = new.birthdate.trim();

        let mut errors = Vec::new();
        if username.is_empty() {
            errors.push("username is required".to_string());
        }
        if password.is_empty() {
            errors.push("password is required".to_string());
        }
        if birthdate.is_empty() {
            errors.push("birthdate is required".to_string());
        } else if chrono::NaiveDate::parse_from_str(birthdate, "%Y-%m-%d").is_err() {
            errors.push("birthdate must be an ISO date (YYYY-MM-DD)".to_string());
        }
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        let active = users::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password.to_string()),
            full_name: Set(new.full_name.clone()),
            birthdate: Set(birthdate.to_string()),
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
                    Err(StoreError::DuplicateUser(username.to_string()))
                } else {
                    Err(err.into())
                }
            }
        }
    }

    /// Exact string match on username and password. Plain-text comparison
    /// is intentional here; see DESIGN.md before changing it.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<User>, StoreError> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username.trim()))
            .filter(users::Column::Password.eq(password.trim()))
            .one(&self.conn)
            .await?;

        Ok(user.map(User::from))
    }
}
