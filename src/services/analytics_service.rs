//! Analytics service
//!
//! Per-link click summaries joined from links, clicks and schools.
//! Everything is returned in one response; there is no pagination.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use super::validation::{NumberInput, optional_text, parse_positive};
use crate::errors::{LessonLinkerError, Result};
use crate::storage::models::TS_EXPORT_PATH;
use crate::storage::{Click, ClickFilter, LinkFilter, SeaOrmStorage, TechLevel};

/// Raw analytics query (query string)
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub school_id: Option<String>,
    pub grade: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Parsed analytics filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsFilter {
    pub school_id: Option<String>,
    pub grade: Option<i32>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl AnalyticsFilter {
    /// Parse query values; blank values count as absent
    pub fn parse(query: AnalyticsQuery) -> Result<Self> {
        let grade = match optional_text(query.grade) {
            Some(raw) => Some(parse_positive("grade", &NumberInput::Text(raw))?),
            None => None,
        };

        let start = optional_text(query.start_date)
            .map(|raw| parse_date("startDate", &raw))
            .transpose()?;
        let end = optional_text(query.end_date)
            .map(|raw| parse_date("endDate", &raw))
            .transpose()?;

        Ok(Self {
            school_id: optional_text(query.school_id),
            grade,
            start,
            end,
        })
    }
}

/// 解析日期：RFC 3339，或 `YYYY-MM-DD`（当天 00:00 UTC），或不带时区的日期时间（按 UTC）
///
/// 仅日期的 `endDate` 同样取当天 00:00，当天其余时间的点击不在范围内。
pub fn parse_date(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    Err(LessonLinkerError::validation(format!(
        "Invalid {}: '{}' (expected YYYY-MM-DD or RFC 3339)",
        field, raw
    )))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct ClickSummary {
    pub device_type: String,
    pub ip_address: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<Click> for ClickSummary {
    fn from(click: Click) -> Self {
        Self {
            device_type: click.device_type,
            ip_address: click.ip_address,
            timestamp: click.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    pub link_id: String,
    pub school_id: String,
    /// School name, or the raw school id when the school no longer exists
    pub school_name: String,
    pub grade: i32,
    pub week: i32,
    pub tech_level: TechLevel,
    pub click_count: usize,
    pub clicks: Vec<ClickSummary>,
}

pub struct AnalyticsService {
    storage: Arc<SeaOrmStorage>,
}

impl AnalyticsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn get_analytics(&self, filter: &AnalyticsFilter) -> Result<Vec<LinkSummary>> {
        let links = self
            .storage
            .find_links(&LinkFilter {
                school_id: filter.school_id.clone(),
                grade: filter.grade,
            })
            .await?;

        if links.is_empty() {
            return Ok(Vec::new());
        }

        let link_ids: Vec<String> = links.iter().map(|l| l.id.clone()).collect();
        let clicks = self
            .storage
            .find_clicks(&ClickFilter {
                link_ids,
                start: filter.start,
                end: filter.end,
            })
            .await?;

        let mut school_ids: Vec<String> = links.iter().map(|l| l.school_id.clone()).collect();
        school_ids.sort();
        school_ids.dedup();
        let schools = self.storage.get_schools_by_ids(&school_ids).await?;

        // 点击已按时间排序，分组后保持顺序
        let mut clicks_by_link: HashMap<String, Vec<ClickSummary>> = HashMap::new();
        for click in clicks {
            clicks_by_link
                .entry(click.link_id.clone())
                .or_default()
                .push(click.into());
        }

        let summaries: Vec<LinkSummary> = links
            .into_iter()
            .map(|link| {
                let clicks = clicks_by_link.remove(&link.id).unwrap_or_default();
                let school_name = schools
                    .get(&link.school_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| link.school_id.clone());

                LinkSummary {
                    link_id: link.id,
                    school_id: link.school_id,
                    school_name,
                    grade: link.grade,
                    week: link.week,
                    tech_level: link.tech_level,
                    click_count: clicks.len(),
                    clicks,
                }
            })
            .collect();

        debug!("Analytics computed for {} links", summaries.len());
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date("startDate", "2024-03-01").unwrap(), expected);
        assert_eq!(
            parse_date("startDate", "2024-03-01T00:00:00Z").unwrap(),
            expected
        );
        assert_eq!(
            parse_date("startDate", "2024-03-01T05:30:00+05:30").unwrap(),
            expected
        );
        assert_eq!(
            parse_date("startDate", "2024-03-01T00:00:00").unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("endDate", "yesterday").unwrap_err();
        assert!(matches!(err, LessonLinkerError::Validation(_)));
        assert!(err.message().contains("endDate"));
        assert!(parse_date("endDate", "2024-13-01").is_err());
    }

    #[test]
    fn test_filter_parse_blank_values_are_absent() {
        let filter = AnalyticsFilter::parse(AnalyticsQuery {
            school_id: Some("".to_string()),
            grade: Some(" ".to_string()),
            start_date: None,
            end_date: Some("".to_string()),
        })
        .unwrap();
        assert_eq!(filter, AnalyticsFilter::default());
    }

    #[test]
    fn test_filter_parse_values() {
        let filter = AnalyticsFilter::parse(AnalyticsQuery {
            school_id: Some("S1".to_string()),
            grade: Some("5".to_string()),
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-01-31".to_string()),
        })
        .unwrap();
        assert_eq!(filter.school_id.as_deref(), Some("S1"));
        assert_eq!(filter.grade, Some(5));
        assert!(filter.start.unwrap() < filter.end.unwrap());
    }

    #[test]
    fn test_filter_parse_invalid_grade() {
        let err = AnalyticsFilter::parse(AnalyticsQuery {
            grade: Some("five".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, LessonLinkerError::Validation(_)));
    }
}
