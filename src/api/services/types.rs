//! API 响应类型定义

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::storage::models::TS_EXPORT_PATH;
use crate::storage::{Lesson, Link, School, TechLevel};

/// 错误响应体
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SchoolSaved {
    pub message: String,
    pub school: School,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LessonSaved {
    pub message: String,
    pub lesson: Lesson,
}

/// 链接创建结果，`link` 为完整跳转 URL
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct LinkCreated {
    pub link: String,
    pub link_id: String,
    pub school_id: String,
    pub grade: i32,
    pub week: i32,
    pub tech_level: TechLevel,
}

impl LinkCreated {
    pub fn new(link: Link, url: String) -> Self {
        Self {
            link: url,
            link_id: link.id,
            school_id: link.school_id,
            grade: link.grade,
            week: link.week,
            tech_level: link.tech_level,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthStatus {
    pub status: String,
    pub storage: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
