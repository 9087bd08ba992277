use std::str::FromStr;

use crate::errors::{LessonLinkerError, Result};
use crate::storage::{Click, Lesson, Link, School, TechLevel};
use migration::entities::{click, lesson, link, school};

fn parse_tech_level(raw: &str) -> Result<TechLevel> {
    TechLevel::from_str(raw).map_err(|_| {
        LessonLinkerError::database_operation(format!("存储中的 techLevel 无效: {}", raw))
    })
}

/// 将 Sea-ORM Model 转换为 School
pub fn model_to_school(model: school::Model) -> School {
    School {
        id: model.id,
        name: model.name,
        city: model.city,
        state: model.state,
        board: model.board,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 将 School 转换为 ActiveModel（用于插入/更新）
///
/// created_at 始终 Set，由 upsert 的冲突更新列决定是否覆盖
pub fn school_to_active_model(school: &School) -> school::ActiveModel {
    use sea_orm::ActiveValue::*;

    school::ActiveModel {
        id: Set(school.id.clone()),
        name: Set(school.name.clone()),
        city: Set(school.city.clone()),
        state: Set(school.state.clone()),
        board: Set(school.board.clone()),
        created_at: Set(school.created_at),
        updated_at: Set(school.updated_at),
    }
}

/// 将 Sea-ORM Model 转换为 Lesson（tags 为 JSON 数组）
pub fn model_to_lesson(model: lesson::Model) -> Result<Lesson> {
    let tags: Vec<String> = if model.tags.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(&model.tags)?
    };

    Ok(Lesson {
        tech_level: parse_tech_level(&model.tech_level)?,
        id: model.id,
        subject: model.subject,
        grade: model.grade,
        week: model.week,
        slides_link: model.slides_link,
        description: model.description,
        duration: model.duration,
        tags,
        difficulty: model.difficulty,
        status: model.status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub fn lesson_to_active_model(lesson: &Lesson) -> Result<lesson::ActiveModel> {
    use sea_orm::ActiveValue::*;

    Ok(lesson::ActiveModel {
        id: Set(lesson.id.clone()),
        subject: Set(lesson.subject.clone()),
        grade: Set(lesson.grade),
        week: Set(lesson.week),
        tech_level: Set(lesson.tech_level.to_string()),
        slides_link: Set(lesson.slides_link.clone()),
        description: Set(lesson.description.clone()),
        duration: Set(lesson.duration),
        tags: Set(serde_json::to_string(&lesson.tags)?),
        difficulty: Set(lesson.difficulty.clone()),
        status: Set(lesson.status.clone()),
        created_at: Set(lesson.created_at),
        updated_at: Set(lesson.updated_at),
    })
}

pub fn model_to_link(model: link::Model) -> Result<Link> {
    Ok(Link {
        tech_level: parse_tech_level(&model.tech_level)?,
        id: model.id,
        school_id: model.school_id,
        grade: model.grade,
        week: model.week,
        created_at: model.created_at,
    })
}

pub fn link_to_active_model(link: &Link) -> link::ActiveModel {
    use sea_orm::ActiveValue::*;

    link::ActiveModel {
        id: Set(link.id.clone()),
        school_id: Set(link.school_id.clone()),
        grade: Set(link.grade),
        week: Set(link.week),
        tech_level: Set(link.tech_level.to_string()),
        created_at: Set(link.created_at),
    }
}

pub fn model_to_click(model: click::Model) -> Result<Click> {
    Ok(Click {
        tech_level: parse_tech_level(&model.tech_level)?,
        id: model.id,
        link_id: model.link_id,
        school_id: model.school_id,
        grade: model.grade,
        week: model.week,
        device_type: model.device_type,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
        timestamp: model.clicked_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    fn create_test_lesson_model() -> lesson::Model {
        lesson::Model {
            id: "L1".to_string(),
            subject: "Science".to_string(),
            grade: 5,
            week: 3,
            tech_level: "low".to_string(),
            slides_link: "https://example.com/slides1".to_string(),
            description: None,
            duration: Some(45),
            tags: r#"["plants","biology"]"#.to_string(),
            difficulty: None,
            status: "active".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_lesson_keeps_tag_order() {
        let lesson = model_to_lesson(create_test_lesson_model()).unwrap();
        assert_eq!(lesson.tags, vec!["plants", "biology"]);
        assert_eq!(lesson.tech_level, TechLevel::Low);
        assert_eq!(lesson.duration, Some(45));
    }

    #[test]
    fn test_model_to_lesson_empty_tags() {
        let mut model = create_test_lesson_model();
        model.tags = String::new();
        let lesson = model_to_lesson(model).unwrap();
        assert!(lesson.tags.is_empty());
    }

    #[test]
    fn test_model_to_lesson_invalid_tech_level() {
        let mut model = create_test_lesson_model();
        model.tech_level = "ultra".to_string();
        let err = model_to_lesson(model).unwrap_err();
        assert!(matches!(err, LessonLinkerError::DatabaseOperation(_)));
    }

    #[test]
    fn test_lesson_to_active_model_serializes_tags() {
        let lesson = model_to_lesson(create_test_lesson_model()).unwrap();
        let active = lesson_to_active_model(&lesson).unwrap();

        if let ActiveValue::Set(tags) = active.tags {
            assert_eq!(tags, r#"["plants","biology"]"#);
        } else {
            panic!("tags should be set");
        }
        if let ActiveValue::Set(level) = active.tech_level {
            assert_eq!(level, "low");
        }
    }

    #[test]
    fn test_model_to_click_maps_timestamp() {
        let now = Utc::now();
        let model = click::Model {
            id: 7,
            link_id: "abcd1234".to_string(),
            school_id: "S1".to_string(),
            grade: 5,
            week: 3,
            tech_level: "medium".to_string(),
            device_type: "mobile".to_string(),
            ip_address: Some("10.0.0.1".to_string()),
            user_agent: None,
            clicked_at: now,
        };

        let click = model_to_click(model).unwrap();
        assert_eq!(click.timestamp, now);
        assert_eq!(click.tech_level, TechLevel::Medium);
        assert_eq!(click.id, 7);
    }
}
