//! Request field validation shared by the services
//!
//! Missing fields are collected first so a single error names all of them;
//! format checks (positive integers, tech level) run afterwards.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{LessonLinkerError, Result};
use crate::storage::TechLevel;
use crate::storage::models::TS_EXPORT_PATH;

/// 整数输入：接受 JSON 数字或数字字符串（表单提交时常见）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(untagged)]
pub enum NumberInput {
    Int(i64),
    Text(String),
}

impl NumberInput {
    fn is_blank(&self) -> bool {
        matches!(self, NumberInput::Text(s) if s.trim().is_empty())
    }
}

impl From<i64> for NumberInput {
    fn from(value: i64) -> Self {
        NumberInput::Int(value)
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        NumberInput::Text(value.to_string())
    }
}

/// 缺失字段收集器
#[derive(Debug, Default)]
pub struct MissingFields(Vec<&'static str>);

impl MissingFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, field: &'static str, value: Option<&String>) -> &mut Self {
        if value.is_none_or(|v| v.trim().is_empty()) {
            self.0.push(field);
        }
        self
    }

    pub fn number(&mut self, field: &'static str, value: Option<&NumberInput>) -> &mut Self {
        if value.is_none_or(NumberInput::is_blank) {
            self.0.push(field);
        }
        self
    }

    pub fn fields(&self) -> &[&'static str] {
        &self.0
    }

    pub fn check(&self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(LessonLinkerError::validation(format!(
                "Missing required fields: {}",
                self.0.join(", ")
            )))
        }
    }
}

/// 解析正整数（grade / week）
pub fn parse_positive(field: &str, value: &NumberInput) -> Result<i32> {
    let parsed = match value {
        NumberInput::Int(n) => Some(*n),
        NumberInput::Text(s) => s.trim().parse::<i64>().ok(),
    };

    parsed
        .filter(|n| *n > 0)
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| {
            LessonLinkerError::validation(format!("{} must be a positive integer", field))
        })
}

/// 解析技术等级（忽略大小写与首尾空白）
pub fn parse_tech_level(value: &str) -> Result<TechLevel> {
    TechLevel::from_str(&value.trim().to_lowercase()).map_err(|_| {
        LessonLinkerError::validation(format!(
            "techLevel must be one of low, medium, high (got '{}')",
            value
        ))
    })
}

/// 取已校验过的必填文本字段
pub fn required_text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// 可选文本字段，空白视为未提供
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_names_every_field() {
        let name = Some("Springfield High".to_string());
        let blank = Some("   ".to_string());
        let mut missing = MissingFields::new();
        missing
            .text("name", name.as_ref())
            .text("city", None)
            .text("state", blank.as_ref())
            .number("grade", None);

        assert_eq!(missing.fields(), &["city", "state", "grade"]);
        let err = missing.check().unwrap_err();
        assert!(matches!(err, LessonLinkerError::Validation(_)));
        assert_eq!(err.message(), "Missing required fields: city, state, grade");
    }

    #[test]
    fn test_missing_fields_ok_when_complete() {
        let value = Some("x".to_string());
        let grade = NumberInput::Int(5);
        let mut missing = MissingFields::new();
        missing.text("a", value.as_ref()).number("grade", Some(&grade));
        assert!(missing.check().is_ok());
    }

    #[test]
    fn test_parse_positive_accepts_numbers_and_strings() {
        assert_eq!(parse_positive("grade", &NumberInput::Int(5)).unwrap(), 5);
        assert_eq!(parse_positive("week", &NumberInput::from(" 12 ")).unwrap(), 12);
    }

    #[test]
    fn test_parse_positive_rejects_invalid() {
        assert!(parse_positive("grade", &NumberInput::Int(0)).is_err());
        assert!(parse_positive("grade", &NumberInput::Int(-3)).is_err());
        assert!(parse_positive("grade", &NumberInput::from("five")).is_err());
        assert!(parse_positive("grade", &NumberInput::Int(i64::MAX)).is_err());
    }

    #[test]
    fn test_number_input_deserializes_both_forms() {
        let n: NumberInput = serde_json::from_str("5").unwrap();
        assert_eq!(n, NumberInput::Int(5));
        let s: NumberInput = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(s, NumberInput::Text("5".to_string()));
    }

    #[test]
    fn test_parse_tech_level() {
        assert_eq!(parse_tech_level("low").unwrap(), TechLevel::Low);
        assert_eq!(parse_tech_level(" High ").unwrap(), TechLevel::High);
        assert!(parse_tech_level("advanced").is_err());
    }

    #[test]
    fn test_optional_text_drops_blank() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some(" a ".to_string())), Some("a".to_string()));
        assert_eq!(optional_text(None), None);
    }
}
