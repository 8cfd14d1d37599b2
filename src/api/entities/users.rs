use sea_orm::entity::prelude::*;

/// Server-side user replica. Independently keyed: the id space here has no
/// relation to any client's local ids, reconciliation happens by username.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    pub password: String,

    pub full_name: Option<String>,

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
