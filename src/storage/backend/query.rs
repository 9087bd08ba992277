//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use tracing::error;

use super::SeaOrmStorage;
use super::converters::{model_to_click, model_to_lesson, model_to_link, model_to_school};
use crate::errors::{LessonLinkerError, Result};
use crate::storage::{Click, ClickFilter, Lesson, Link, LinkFilter, School, TechLevel};

use migration::entities::{click, lesson, link, school};

fn query_error(operation: &str, e: sea_orm::DbErr) -> LessonLinkerError {
    error!("{} 查询失败: {}", operation, e);
    LessonLinkerError::database_operation(format!("{} 查询失败: {}", operation, e))
}

impl SeaOrmStorage {
    // ---------------- schools ----------------

    pub async fn get_school(&self, id: &str) -> Result<Option<School>> {
        let model = school::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| query_error("get_school", e))?;
        Ok(model.map(model_to_school))
    }

    pub async fn list_schools(&self) -> Result<Vec<School>> {
        let models = school::Entity::find()
            .order_by_asc(school::Column::CreatedAt)
            .order_by_asc(school::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| query_error("list_schools", e))?;
        Ok(models.into_iter().map(model_to_school).collect())
    }

    /// 批量获取学校（用于分析报表的名称补全）
    pub async fn get_schools_by_ids(&self, ids: &[String]) -> Result<HashMap<String, School>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let models = school::Entity::find()
            .filter(school::Column::Id.is_in(ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| query_error("get_schools_by_ids", e))?;

        Ok(models
            .into_iter()
            .map(|m| {
                let school = model_to_school(m);
                (school.id.clone(), school)
            })
            .collect())
    }

    // ---------------- lessons ----------------

    pub async fn get_lesson(&self, id: &str) -> Result<Option<Lesson>> {
        let model = lesson::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| query_error("get_lesson", e))?;
        model.map(model_to_lesson).transpose()
    }

    pub async fn list_lessons(&self) -> Result<Vec<Lesson>> {
        let models = lesson::Entity::find()
            .order_by_asc(lesson::Column::CreatedAt)
            .order_by_asc(lesson::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| query_error("list_lessons", e))?;
        models.into_iter().map(model_to_lesson).collect()
    }

    /// 按 (grade, week, tech_level) 精确匹配课程
    ///
    /// 结果按创建时间升序，同一时刻按 id 升序，首个即为跳转目标。
    pub async fn find_matching_lessons(
        &self,
        grade: i32,
        week: i32,
        tech_level: TechLevel,
    ) -> Result<Vec<Lesson>> {
        let models = lesson::Entity::find()
            .filter(lesson::Column::Grade.eq(grade))
            .filter(lesson::Column::Week.eq(week))
            .filter(lesson::Column::TechLevel.eq(tech_level.to_string()))
            .order_by_asc(lesson::Column::CreatedAt)
            .order_by_asc(lesson::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| query_error("find_matching_lessons", e))?;
        models.into_iter().map(model_to_lesson).collect()
    }

    // ---------------- links ----------------

    pub async fn get_link(&self, id: &str) -> Result<Option<Link>> {
        let model = link::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| query_error("get_link", e))?;
        model.map(model_to_link).transpose()
    }

    pub async fn list_links(&self) -> Result<Vec<Link>> {
        self.find_links(&LinkFilter::default()).await
    }

    /// 按学校 / 年级过滤链接，按创建时间升序
    pub async fn find_links(&self, filter: &LinkFilter) -> Result<Vec<Link>> {
        let mut condition = Condition::all();

        if let Some(ref school_id) = filter.school_id {
            condition = condition.add(link::Column::SchoolId.eq(school_id.clone()));
        }

        if let Some(grade) = filter.grade {
            condition = condition.add(link::Column::Grade.eq(grade));
        }

        let models = link::Entity::find()
            .filter(condition)
            .order_by_asc(link::Column::CreatedAt)
            .order_by_asc(link::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| query_error("find_links", e))?;
        models.into_iter().map(model_to_link).collect()
    }

    // ---------------- clicks ----------------

    pub async fn list_clicks(&self) -> Result<Vec<Click>> {
        let models = click::Entity::find()
            .order_by_asc(click::Column::ClickedAt)
            .order_by_asc(click::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| query_error("list_clicks", e))?;
        models.into_iter().map(model_to_click).collect()
    }

    /// 按链接集合与闭区间时间范围过滤点击，按时间升序（同一时刻按插入顺序）
    pub async fn find_clicks(&self, filter: &ClickFilter) -> Result<Vec<Click>> {
        if filter.link_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut condition =
            Condition::all().add(click::Column::LinkId.is_in(filter.link_ids.iter().cloned()));

        if let Some(start) = filter.start {
            condition = condition.add(click::Column::ClickedAt.gte(start));
        }

        if let Some(end) = filter.end {
            condition = condition.add(click::Column::ClickedAt.lte(end));
        }

        let models = click::Entity::find()
            .filter(condition)
            .order_by_asc(click::Column::ClickedAt)
            .order_by_asc(click::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| query_error("find_clicks", e))?;
        models.into_iter().map(model_to_click).collect()
    }
}
