//! 查询索引
//!
//! - lessons(grade, week, tech_level)：链接解析的匹配键
//! - links(school_id) / links(grade)：分析过滤
//! - clicks(link_id, clicked_at)：按链接聚合 + 时间范围过滤

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lessons_match_key")
                    .table(Lessons::Table)
                    .col(Lessons::Grade)
                    .col(Lessons::Week)
                    .col(Lessons::TechLevel)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_school_id")
                    .table(Links::Table)
                    .col(Links::SchoolId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_grade")
                    .table(Links::Table)
                    .col(Links::Grade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clicks_link_time")
                    .table(Clicks::Table)
                    .col(Clicks::LinkId)
                    .col(Clicks::ClickedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_clicks_link_time").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_links_grade").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_links_school_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_lessons_match_key").to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Lessons {
    #[sea_orm(iden = "lessons")]
    Table,
    Grade,
    Week,
    TechLevel,
}

#[derive(DeriveIden)]
enum Links {
    #[sea_orm(iden = "links")]
    Table,
    SchoolId,
    Grade,
}

#[derive(DeriveIden)]
enum Clicks {
    #[sea_orm(iden = "clicks")]
    Table,
    LinkId,
    ClickedAt,
}
