use sea_orm::entity::prelude::*;

/// Per-user company research record. `(owner_user_id, name)` carries a
/// unique index; global scope adds a system-wide unique index on `name`
/// at migration time (see COMPANY_NAME_SCOPE config).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub name: String,
    pub wishpoint: i32,
    pub step: String,
    pub scale: i32,
    pub startmoney: i32,
    pub numemploy: i32,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerUserId",
        to = "super::users::Column::Id"
    )]
    Owner,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
