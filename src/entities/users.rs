use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    /// Stored in plain text. Known flaw, kept deliberately; see DESIGN.md.
    pub password: String,

    pub full_name: Option<String>,

    /// ISO date, `YYYY-MM-DD`.
    pub birthdate: String,

    pub email: Option<String>,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vitals::Entity")]
    Vitals,
}

impl Related<super::vitals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vitals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
