//! Click entity: one row per successful redirect

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "clicks")]
pub struct Model {
    /// Insertion sequence, breaks ties between equal timestamps
    #[sea_orm(primary_key)]
    pub id: i64,
    pub link_id: String,
    pub school_id: String,
    pub grade: i32,
    pub week: i32,
    pub tech_level: String,
    pub device_type: String,
    pub ip_address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub user_agent: Option<String>,
    pub clicked_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
