use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use ts_rs::TS;

/// TypeScript 类型输出路径（相对 TS_RS_EXPORT_DIR）
pub const TS_EXPORT_PATH: &str = "lessonlinker.generated.ts";

/// 课程技术等级
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    TS,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TechLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub board: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub subject: String,
    pub grade: i32,
    pub week: i32,
    pub tech_level: TechLevel,
    pub slides_link: String,
    pub description: Option<String>,
    /// 时长（分钟）
    pub duration: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub difficulty: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 短链接：只记录匹配元组，不绑定具体课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub school_id: String,
    pub grade: i32,
    pub week: i32,
    pub tech_level: TechLevel,
    pub created_at: DateTime<Utc>,
}

/// 点击记录，学校/年级/周/等级为链接的快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct Click {
    #[ts(type = "number")]
    pub id: i64,
    pub link_id: String,
    pub school_id: String,
    pub grade: i32,
    pub week: i32,
    pub tech_level: TechLevel,
    pub device_type: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// 新点击（id 与时间戳由存储层分配）
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: String,
    pub school_id: String,
    pub grade: i32,
    pub week: i32,
    pub tech_level: TechLevel,
    pub device_type: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// 链接过滤条件
#[derive(Default, Clone, Debug)]
pub struct LinkFilter {
    pub school_id: Option<String>,
    pub grade: Option<i32>,
}

/// 点击过滤条件，时间边界均为闭区间
#[derive(Default, Clone, Debug)]
pub struct ClickFilter {
    pub link_ids: Vec<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_tech_level_parse_and_display() {
        assert_eq!(TechLevel::from_str("low").unwrap(), TechLevel::Low);
        assert_eq!(TechLevel::from_str("medium").unwrap(), TechLevel::Medium);
        assert_eq!(TechLevel::High.to_string(), "high");
        assert!(TechLevel::from_str("extreme").is_err());
        assert!(TechLevel::from_str("").is_err());
    }

    #[test]
    fn test_tech_level_serde_lowercase() {
        let json = serde_json::to_string(&TechLevel::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let level: TechLevel = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(level, TechLevel::High);
    }

    #[test]
    fn test_link_serializes_camel_case() {
        let link = Link {
            id: "a1b2c3d4".to_string(),
            school_id: "S1".to_string(),
            grade: 5,
            week: 3,
            tech_level: TechLevel::Low,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["schoolId"], "S1");
        assert_eq!(value["techLevel"], "low");
        assert!(value.get("createdAt").is_some());
    }
}
