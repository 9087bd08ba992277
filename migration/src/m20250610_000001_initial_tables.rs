//! 初始表结构
//!
//! 创建 schools、lessons、links、clicks 四张表。
//! links.school_id 与 clicks.link_id 均为弱引用，不建外键约束。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 schools 表
        manager
            .create_table(
                Table::create()
                    .table(Schools::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schools::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schools::Name).string().not_null())
                    .col(ColumnDef::new(Schools::City).string().not_null())
                    .col(ColumnDef::new(Schools::State).string().not_null())
                    .col(ColumnDef::new(Schools::Board).string().not_null())
                    .col(
                        ColumnDef::new(Schools::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Schools::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 lessons 表
        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lessons::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lessons::Subject).string().not_null())
                    .col(ColumnDef::new(Lessons::Grade).integer().not_null())
                    .col(ColumnDef::new(Lessons::Week).integer().not_null())
                    .col(ColumnDef::new(Lessons::TechLevel).string_len(16).not_null())
                    .col(ColumnDef::new(Lessons::SlidesLink).text().not_null())
                    .col(ColumnDef::new(Lessons::Description).text().null())
                    .col(ColumnDef::new(Lessons::Duration).integer().null())
                    // JSON 数组，保留顺序
                    .col(ColumnDef::new(Lessons::Tags).text().not_null())
                    .col(ColumnDef::new(Lessons::Difficulty).string().null())
                    .col(
                        ColumnDef::new(Lessons::Status)
                            .string_len(32)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Lessons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Lessons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 links 表
        manager
            .create_table(
                Table::create()
                    .table(Links::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Links::Id)
                            .string_len(16)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Links::SchoolId).string_len(64).not_null())
                    .col(ColumnDef::new(Links::Grade).integer().not_null())
                    .col(ColumnDef::new(Links::Week).integer().not_null())
                    .col(ColumnDef::new(Links::TechLevel).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Links::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 clicks 表（只追加）
        manager
            .create_table(
                Table::create()
                    .table(Clicks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clicks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clicks::LinkId).string_len(16).not_null())
                    .col(ColumnDef::new(Clicks::SchoolId).string_len(64).not_null())
                    .col(ColumnDef::new(Clicks::Grade).integer().not_null())
                    .col(ColumnDef::new(Clicks::Week).integer().not_null())
                    .col(ColumnDef::new(Clicks::TechLevel).string_len(16).not_null())
                    .col(ColumnDef::new(Clicks::DeviceType).string_len(32).not_null())
                    .col(ColumnDef::new(Clicks::IpAddress).string_len(45).null())
                    .col(ColumnDef::new(Clicks::UserAgent).text().null())
                    .col(
                        ColumnDef::new(Clicks::ClickedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clicks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Links::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lessons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schools::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Schools {
    #[sea_orm(iden = "schools")]
    Table,
    Id,
    Name,
    City,
    State,
    Board,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Lessons {
    #[sea_orm(iden = "lessons")]
    Table,
    Id,
    Subject,
    Grade,
    Week,
    TechLevel,
    SlidesLink,
    Description,
    Duration,
    Tags,
    Difficulty,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Links {
    #[sea_orm(iden = "links")]
    Table,
    Id,
    SchoolId,
    Grade,
    Week,
    TechLevel,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Clicks {
    #[sea_orm(iden = "clicks")]
    Table,
    Id,
    LinkId,
    SchoolId,
    Grade,
    Week,
    TechLevel,
    DeviceType,
    IpAddress,
    UserAgent,
    ClickedAt,
}
