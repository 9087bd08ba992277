use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub subject: String,
    pub grade: i32,
    pub week: i32,
    pub tech_level: String,
    #[sea_orm(column_type = "Text")]
    pub slides_link: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Minutes
    pub duration: Option<i32>,
    /// JSON array of tags, order preserved
    #[sea_orm(column_type = "Text")]
    pub tags: String,
    pub difficulty: Option<String>,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
