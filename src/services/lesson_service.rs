//! Lesson management service

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

use super::validation::{
    MissingFields, NumberInput, optional_text, parse_positive, parse_tech_level, required_text,
};
use crate::errors::{LessonLinkerError, Result};
use crate::storage::models::TS_EXPORT_PATH;
use crate::storage::{Lesson, SeaOrmStorage};

/// 课程默认状态
pub const DEFAULT_LESSON_STATUS: &str = "active";

/// Lesson create / update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct LessonInput {
    pub id: Option<String>,
    pub subject: Option<String>,
    pub grade: Option<NumberInput>,
    pub week: Option<NumberInput>,
    pub tech_level: Option<String>,
    pub slides_link: Option<String>,
    pub description: Option<String>,
    pub duration: Option<NumberInput>,
    pub tags: Option<Vec<String>>,
    pub difficulty: Option<String>,
    pub status: Option<String>,
}

/// 校验后的课程字段（不含 id 与时间戳）
struct LessonFields {
    subject: String,
    grade: i32,
    week: i32,
    tech_level: crate::storage::TechLevel,
    slides_link: String,
    description: Option<String>,
    duration: Option<i32>,
    tags: Vec<String>,
    difficulty: Option<String>,
    status: String,
}

impl LessonInput {
    fn into_fields(self) -> Result<(Option<String>, LessonFields)> {
        MissingFields::new()
            .text("subject", self.subject.as_ref())
            .number("grade", self.grade.as_ref())
            .number("week", self.week.as_ref())
            .text("techLevel", self.tech_level.as_ref())
            .text("slidesLink", self.slides_link.as_ref())
            .check()?;

        // 必填字段已确认存在
        let grade = parse_positive("grade", &self.grade.unwrap_or(NumberInput::Int(0)))?;
        let week = parse_positive("week", &self.week.unwrap_or(NumberInput::Int(0)))?;
        let tech_level = parse_tech_level(self.tech_level.as_deref().unwrap_or_default())?;
        let duration = match self.duration {
            Some(NumberInput::Text(ref s)) if s.trim().is_empty() => None,
            Some(ref d) => Some(parse_positive("duration", d)?),
            None => None,
        };

        // 标签按原样保存（顺序与内容不变）
        let tags = self.tags.unwrap_or_default();

        let fields = LessonFields {
            subject: required_text(self.subject),
            grade,
            week,
            tech_level,
            slides_link: required_text(self.slides_link),
            description: optional_text(self.description),
            duration,
            tags,
            difficulty: optional_text(self.difficulty),
            status: optional_text(self.status).unwrap_or_else(|| DEFAULT_LESSON_STATUS.to_string()),
        };

        Ok((optional_text(self.id), fields))
    }
}

fn build_lesson(
    id: String,
    fields: LessonFields,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
) -> Lesson {
    Lesson {
        id,
        subject: fields.subject,
        grade: fields.grade,
        week: fields.week,
        tech_level: fields.tech_level,
        slides_link: fields.slides_link,
        description: fields.description,
        duration: fields.duration,
        tags: fields.tags,
        difficulty: fields.difficulty,
        status: fields.status,
        created_at,
        updated_at,
    }
}

pub struct LessonService {
    storage: Arc<SeaOrmStorage>,
}

impl LessonService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Create or replace a lesson keyed on `id`
    pub async fn create(&self, input: LessonInput) -> Result<Lesson> {
        let (id, fields) = input.into_fields()?;

        let now = Utc::now();
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let lesson = build_lesson(id, fields, now, now);

        let saved = self.storage.upsert_lesson(&lesson).await?;
        info!("Lesson saved: {} ({})", saved.id, saved.subject);
        Ok(saved)
    }

    pub async fn update(&self, id: &str, input: LessonInput) -> Result<Lesson> {
        let (_, fields) = input.into_fields()?;

        let existing = self.get(id).await?;
        let lesson = build_lesson(existing.id, fields, existing.created_at, Utc::now());

        self.storage.update_lesson(&lesson).await
    }

    pub async fn get(&self, id: &str) -> Result<Lesson> {
        self.storage
            .get_lesson(id)
            .await?
            .ok_or_else(|| LessonLinkerError::not_found("Lesson not found"))
    }

    pub async fn list(&self) -> Result<Vec<Lesson>> {
        self.storage.list_lessons().await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.storage.delete_lesson(id).await.map_err(|e| match e {
            LessonLinkerError::NotFound(_) => LessonLinkerError::not_found("Lesson not found"),
            other => other,
        })
    }
}
