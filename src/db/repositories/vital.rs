use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::db::StoreError;
use crate::entities::vitals;
use crate::parser::{parse_glucose, parse_pressure};

#[derive(Debug, Clone)]
pub struct Vital {
    pub id: i32,
    pub user_id: i32,
    pub date: String,
    pub pressure_systolic: Option<i32>,
    pub pressure_diastolic: Option<i32>,
    pub glucose: Option<f64>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<vitals::Model> for Vital {
    fn from(model: vitals::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            date: model.date,
            pressure_systolic: model.pressure_systolic,
            pressure_diastolic: model.pressure_diastolic,
            glucose: model.glucose,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

pub struct VitalRepository {
    conn: DatabaseConnection,
}

impl VitalRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Record a reading. Pressure and glucose are free-text form values;
    /// unparseable input stores nulls rather than rejecting the row.
    pub async fn add(
        &self,
        user_id: i32,
        date: &str,
        pressure_text: &str,
        glucose_text: &str,
        notes: &str,
    ) -> Result<i32, StoreError> {
        let (systolic, diastolic) = parse_pressure(pressure_text);
        let glucose = parse_glucose(glucose_text);
        let notes = notes.trim();
        let now = chrono::Utc::now().to_rfc3339();

        let active = vitals::ActiveModel {
            user_id: Set(user_id),
            date: Set(date.trim().to_string()),
            pressure_systolic: Set(systolic),
            pressure_diastolic: Set(diastolic),
            glucose: Set(glucose),
            notes: Set((!notes.is_empty()).then(|| notes.to_string())),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = vitals::Entity::insert(active).exec(&self.conn).await?;
        Ok(result.last_insert_id)
    }

    /// History for one user, newest first. Id breaks ties between readings
    /// recorded for the same date (most recent insert first).
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Vital>, StoreError> {
        let rows = vitals::Entity::find()
            .filter(vitals::Column::UserId.eq(user_id))
            .order_by_desc(vitals::Column::Date)
            .order_by_desc(vitals::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Vital::from).collect())
    }
}
