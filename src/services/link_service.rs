//! Link generation and resolution
//!
//! A link stores only the (school, grade, week, tech level) tuple. The lesson
//! it points to is chosen again on every resolution, so uploading or removing
//! lessons changes where an existing link goes.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use super::validation::{MissingFields, NumberInput, parse_positive, parse_tech_level};
use crate::errors::{LessonLinkerError, Result};
use crate::storage::models::TS_EXPORT_PATH;
use crate::storage::{Lesson, Link, SeaOrmStorage, TechLevel};
use crate::utils::generate_link_id;

/// Link creation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkInput {
    pub school_id: Option<String>,
    pub grade: Option<NumberInput>,
    pub week: Option<NumberInput>,
    pub tech_level: Option<String>,
}

/// Outcome of resolving a link id
#[derive(Debug, Clone)]
pub struct Resolution {
    pub link: Link,
    /// Selected lesson id
    pub lesson_id: String,
    /// Redirect destination (the lesson's slides link)
    pub destination: String,
}

/// Build `<base>/r/<id>`
pub fn redirect_url(base: &str, link_id: &str) -> String {
    format!("{}/r/{}", base.trim_end_matches('/'), link_id)
}

/// Pick the lesson a link resolves to: earliest created, then lowest id
pub fn select_lesson(lessons: &[Lesson]) -> Option<&Lesson> {
    lessons
        .iter()
        .min_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
}

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Mint a new link for a tuple that currently has at least one lesson
    pub async fn create_link(&self, input: CreateLinkInput) -> Result<Link> {
        MissingFields::new()
            .text("schoolId", input.school_id.as_ref())
            .number("grade", input.grade.as_ref())
            .number("week", input.week.as_ref())
            .text("techLevel", input.tech_level.as_ref())
            .check()?;

        let school_id = input.school_id.unwrap_or_default().trim().to_string();
        let grade = parse_positive("grade", &input.grade.unwrap_or(NumberInput::Int(0)))?;
        let week = parse_positive("week", &input.week.unwrap_or(NumberInput::Int(0)))?;
        let tech_level = parse_tech_level(input.tech_level.as_deref().unwrap_or_default())?;

        if self.storage.get_school(&school_id).await?.is_none() {
            return Err(LessonLinkerError::not_found("School not found"));
        }

        self.ensure_lessons_exist(grade, week, tech_level).await?;

        let link = Link {
            id: generate_link_id(),
            school_id,
            grade,
            week,
            tech_level,
            created_at: Utc::now(),
        };

        self.storage.insert_link(&link).await?;
        Ok(link)
    }

    async fn ensure_lessons_exist(&self, grade: i32, week: i32, tech_level: TechLevel) -> Result<()> {
        let lessons = self
            .storage
            .find_matching_lessons(grade, week, tech_level)
            .await?;

        if lessons.is_empty() {
            debug!(
                "No lessons for grade {}, week {}, {}",
                grade, week, tech_level
            );
            return Err(LessonLinkerError::no_match(
                "No lessons found for the specified criteria",
            ));
        }
        Ok(())
    }

    /// Resolve a link id to the currently best-matching lesson
    pub async fn resolve(&self, link_id: &str) -> Result<Resolution> {
        let link = self
            .storage
            .get_link(link_id)
            .await?
            .ok_or_else(|| LessonLinkerError::not_found("Link not found"))?;

        let lessons = self
            .storage
            .find_matching_lessons(link.grade, link.week, link.tech_level)
            .await?;

        let lesson = select_lesson(&lessons)
            .ok_or_else(|| LessonLinkerError::no_match("No matching lessons found"))?;

        info!("Link {} resolved to lesson {}", link.id, lesson.id);

        Ok(Resolution {
            lesson_id: lesson.id.clone(),
            destination: lesson.slides_link.clone(),
            link,
        })
    }

    pub async fn list_links(&self) -> Result<Vec<Link>> {
        self.storage.list_links().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn lesson(id: &str, offset_secs: i64) -> Lesson {
        let created = Utc::now() + Duration::seconds(offset_secs);
        Lesson {
            id: id.to_string(),
            subject: "Math".to_string(),
            grade: 5,
            week: 3,
            tech_level: TechLevel::Low,
            slides_link: format!("https://example.com/{}", id),
            description: None,
            duration: None,
            tags: Vec::new(),
            difficulty: None,
            status: "active".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_redirect_url_trims_trailing_slash() {
        assert_eq!(
            redirect_url("https://go.example.org/", "abcd1234"),
            "https://go.example.org/r/abcd1234"
        );
        assert_eq!(
            redirect_url("http://localhost:5000", "abcd1234"),
            "http://localhost:5000/r/abcd1234"
        );
    }

    #[test]
    fn test_select_lesson_prefers_earliest() {
        let lessons = vec![lesson("b", 10), lesson("a", 20), lesson("c", 0)];
        assert_eq!(select_lesson(&lessons).unwrap().id, "c");
    }

    #[test]
    fn test_select_lesson_breaks_ties_by_id() {
        let mut first = lesson("zeta", 0);
        let mut second = lesson("alpha", 0);
        let at = Utc::now();
        first.created_at = at;
        second.created_at = at;
        let lessons = vec![first, second];
        assert_eq!(select_lesson(&lessons).unwrap().id, "alpha");
    }

    #[test]
    fn test_select_lesson_empty() {
        assert!(select_lesson(&[]).is_none());
    }
}
