//! School management service

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

use super::validation::{MissingFields, optional_text, required_text};
use crate::errors::{LessonLinkerError, Result};
use crate::storage::models::TS_EXPORT_PATH;
use crate::storage::{School, SeaOrmStorage};

/// School create / update payload
///
/// `id` is only read on create; when omitted a UUID is generated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct SchoolInput {
    pub id: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub board: Option<String>,
}

impl SchoolInput {
    fn validate(&self) -> Result<()> {
        MissingFields::new()
            .text("name", self.name.as_ref())
            .text("city", self.city.as_ref())
            .text("state", self.state.as_ref())
            .text("board", self.board.as_ref())
            .check()
    }
}

pub struct SchoolService {
    storage: Arc<SeaOrmStorage>,
}

impl SchoolService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Create or replace a school; an existing school keeps its `created_at`
    pub async fn create(&self, input: SchoolInput) -> Result<School> {
        input.validate()?;

        let now = Utc::now();
        let id = optional_text(input.id).unwrap_or_else(|| Uuid::new_v4().to_string());
        let school = School {
            id,
            name: required_text(input.name),
            city: required_text(input.city),
            state: required_text(input.state),
            board: required_text(input.board),
            created_at: now,
            updated_at: now,
        };

        let saved = self.storage.upsert_school(&school).await?;
        info!("School saved: {} ({})", saved.id, saved.name);
        Ok(saved)
    }

    /// Replace the fields of an existing school
    pub async fn update(&self, id: &str, input: SchoolInput) -> Result<School> {
        input.validate()?;

        let existing = self.get(id).await?;
        let school = School {
            id: existing.id,
            name: required_text(input.name),
            city: required_text(input.city),
            state: required_text(input.state),
            board: required_text(input.board),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        self.storage.update_school(&school).await
    }

    pub async fn get(&self, id: &str) -> Result<School> {
        self.storage
            .get_school(id)
            .await?
            .ok_or_else(|| LessonLinkerError::not_found("School not found"))
    }

    pub async fn list(&self) -> Result<Vec<School>> {
        self.storage.list_schools().await
    }

    /// Hard delete; links and clicks that reference the school are kept
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.storage.delete_school(id).await.map_err(|e| match e {
            LessonLinkerError::NotFound(_) => LessonLinkerError::not_found("School not found"),
            other => other,
        })
    }
}
