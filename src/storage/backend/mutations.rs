//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, sea_query::OnConflict};
use tracing::{error, info};

use super::SeaOrmStorage;
use super::converters::{
    lesson_to_active_model, link_to_active_model, model_to_click, school_to_active_model,
};
use crate::errors::{LessonLinkerError, Result};
use crate::storage::{Click, Lesson, Link, NewClick, School};

use migration::entities::{click, lesson, link, school};

fn mutation_error(operation: &str, e: DbErr) -> LessonLinkerError {
    error!("{} 失败: {}", operation, e);
    LessonLinkerError::database_operation(format!("{} 失败: {}", operation, e))
}

/// update 未命中任何行时转为 NotFound
fn update_error(operation: &str, what: &str, id: &str, e: DbErr) -> LessonLinkerError {
    match e {
        DbErr::RecordNotUpdated => LessonLinkerError::not_found(format!("{} not found: {}", what, id)),
        other => mutation_error(operation, other),
    }
}

impl SeaOrmStorage {
    // ---------------- schools ----------------

    /// 使用 ON CONFLICT 的原子 upsert，冲突时保留原 created_at
    pub async fn upsert_school(&self, school: &School) -> Result<School> {
        let active_model = school_to_active_model(school);

        school::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(school::Column::Id)
                    .update_columns([
                        school::Column::Name,
                        school::Column::City,
                        school::Column::State,
                        school::Column::Board,
                        school::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| mutation_error("upsert_school", e))?;

        info!("School upserted: {}", school.id);

        self.get_school(&school.id).await?.ok_or_else(|| {
            LessonLinkerError::database_operation(format!("School vanished after upsert: {}", school.id))
        })
    }

    /// 更新已存在的学校，不存在时返回 NotFound
    pub async fn update_school(&self, school: &School) -> Result<School> {
        let mut active_model = school_to_active_model(school);
        active_model.created_at = sea_orm::ActiveValue::NotSet;

        school::Entity::update(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| update_error("update_school", "School", &school.id, e))?;

        info!("School updated: {}", school.id);

        self.get_school(&school.id)
            .await?
            .ok_or_else(|| LessonLinkerError::not_found(format!("School not found: {}", school.id)))
    }

    pub async fn delete_school(&self, id: &str) -> Result<()> {
        let result = school::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| mutation_error("delete_school", e))?;

        if result.rows_affected == 0 {
            return Err(LessonLinkerError::not_found(format!("School not found: {}", id)));
        }

        info!("School deleted: {}", id);
        Ok(())
    }

    // ---------------- lessons ----------------

    pub async fn upsert_lesson(&self, lesson: &Lesson) -> Result<Lesson> {
        let active_model = lesson_to_active_model(lesson)?;

        lesson::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(lesson::Column::Id)
                    .update_columns([
                        lesson::Column::Subject,
                        lesson::Column::Grade,
                        lesson::Column::Week,
                        lesson::Column::TechLevel,
                        lesson::Column::SlidesLink,
                        lesson::Column::Description,
                        lesson::Column::Duration,
                        lesson::Column::Tags,
                        lesson::Column::Difficulty,
                        lesson::Column::Status,
                        lesson::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| mutation_error("upsert_lesson", e))?;

        info!(
            "Lesson upserted: {} (grade {}, week {}, {})",
            lesson.id, lesson.grade, lesson.week, lesson.tech_level
        );

        self.get_lesson(&lesson.id).await?.ok_or_else(|| {
            LessonLinkerError::database_operation(format!("Lesson vanished after upsert: {}", lesson.id))
        })
    }

    pub async fn update_lesson(&self, lesson: &Lesson) -> Result<Lesson> {
        let mut active_model = lesson_to_active_model(lesson)?;
        active_model.created_at = sea_orm::ActiveValue::NotSet;

        lesson::Entity::update(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| update_error("update_lesson", "Lesson", &lesson.id, e))?;

        info!("Lesson updated: {}", lesson.id);

        self.get_lesson(&lesson.id)
            .await?
            .ok_or_else(|| LessonLinkerError::not_found(format!("Lesson not found: {}", lesson.id)))
    }

    pub async fn delete_lesson(&self, id: &str) -> Result<()> {
        let result = lesson::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| mutation_error("delete_lesson", e))?;

        if result.rows_affected == 0 {
            return Err(LessonLinkerError::not_found(format!("Lesson not found: {}", id)));
        }

        info!("Lesson deleted: {}", id);
        Ok(())
    }

    // ---------------- links ----------------

    /// 插入新链接；主键冲突直接报错，不覆盖已有链接
    pub async fn insert_link(&self, link: &Link) -> Result<()> {
        link::Entity::insert(link_to_active_model(link))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| mutation_error("insert_link", e))?;

        info!(
            "Link created: {} -> school {} (grade {}, week {}, {})",
            link.id, link.school_id, link.grade, link.week, link.tech_level
        );
        Ok(())
    }

    // ---------------- clicks ----------------

    /// 追加点击记录，时间戳取服务器当前 UTC 时间
    pub async fn insert_click(&self, new_click: NewClick) -> Result<Click> {
        use sea_orm::ActiveValue::*;

        let active_model = click::ActiveModel {
            id: NotSet,
            link_id: Set(new_click.link_id),
            school_id: Set(new_click.school_id),
            grade: Set(new_click.grade),
            week: Set(new_click.week),
            tech_level: Set(new_click.tech_level.to_string()),
            device_type: Set(new_click.device_type),
            ip_address: Set(new_click.ip_address),
            user_agent: Set(new_click.user_agent),
            clicked_at: Set(Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| mutation_error("insert_click", e))?;

        model_to_click(model)
    }
}
