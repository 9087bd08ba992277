//! Shared test setup: a fresh SQLite database per test

#![allow(dead_code)]

use std::sync::Arc;

use lessonlinker::config::{ChatConfig, DatabaseConfig};
use lessonlinker::runtime::lifetime::StartupContext;
use lessonlinker::services::{
    ChatService, CompletionClient, CreateLinkInput, LessonInput, NumberInput, SchoolInput,
};
use lessonlinker::storage::{Lesson, Link, School, StorageFactory};
use tempfile::TempDir;

pub struct TestEnv {
    // 保持临时目录存活
    _dir: TempDir,
    pub ctx: StartupContext,
}

pub async fn setup() -> TestEnv {
    setup_with_chat(None).await
}

pub async fn setup_with_chat(client: Option<Arc<dyn CompletionClient>>) -> TestEnv {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("lessonlinker_test.db");

    let config = DatabaseConfig {
        database_url: db_path.display().to_string(),
        ..DatabaseConfig::default()
    };
    let storage = StorageFactory::create(&config)
        .await
        .expect("Failed to create storage");

    let chat = ChatService::new(client, &ChatConfig::default());

    TestEnv {
        _dir: dir,
        ctx: StartupContext::from_storage(storage, chat),
    }
}

pub fn school_input(id: &str, name: &str) -> SchoolInput {
    SchoolInput {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        city: Some("Springfield".to_string()),
        state: Some("IL".to_string()),
        board: Some("CBSE".to_string()),
    }
}

pub fn lesson_input(id: &str, grade: i64, week: i64, tech_level: &str, slides: &str) -> LessonInput {
    LessonInput {
        id: Some(id.to_string()),
        subject: Some("Science".to_string()),
        grade: Some(NumberInput::Int(grade)),
        week: Some(NumberInput::Int(week)),
        tech_level: Some(tech_level.to_string()),
        slides_link: Some(slides.to_string()),
        ..LessonInput::default()
    }
}

pub fn link_input(school_id: &str, grade: i64, week: i64, tech_level: &str) -> CreateLinkInput {
    CreateLinkInput {
        school_id: Some(school_id.to_string()),
        grade: Some(NumberInput::Int(grade)),
        week: Some(NumberInput::Int(week)),
        tech_level: Some(tech_level.to_string()),
    }
}

impl TestEnv {
    pub async fn add_school(&self, id: &str, name: &str) -> School {
        self.ctx
            .school_service
            .create(school_input(id, name))
            .await
            .expect("Failed to create school")
    }

    pub async fn add_lesson(
        &self,
        id: &str,
        grade: i64,
        week: i64,
        tech_level: &str,
        slides: &str,
    ) -> Lesson {
        self.ctx
            .lesson_service
            .create(lesson_input(id, grade, week, tech_level, slides))
            .await
            .expect("Failed to create lesson")
    }

    pub async fn add_link(&self, school_id: &str, grade: i64, week: i64, tech_level: &str) -> Link {
        self.ctx
            .link_service
            .create_link(link_input(school_id, grade, week, tech_level))
            .await
            .expect("Failed to create link")
    }
}
