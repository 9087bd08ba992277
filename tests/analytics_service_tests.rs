//! AnalyticsService tests

mod common;

use chrono::{Duration, Utc};

use lessonlinker::services::{AnalyticsFilter, AnalyticsQuery};
use lessonlinker::storage::TechLevel;

use common::{TestEnv, setup};

const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1";

async fn click(env: &TestEnv, link_id: &str, ua: Option<&str>, ip: &str) {
    let resolution = env.ctx.link_service.resolve(link_id).await.unwrap();
    env.ctx
        .click_recorder
        .record_click(&resolution, ua, Some(ip))
        .await
        .unwrap();
}

async fn seeded() -> (TestEnv, String, String) {
    let env = setup().await;
    env.add_school("S1", "Springfield High").await;
    env.add_school("S2", "Shelbyville Elementary").await;
    env.add_lesson("L1", 5, 3, "low", "https://example.com/g5").await;
    env.add_lesson("L2", 6, 1, "high", "https://example.com/g6").await;

    let link_a = env.add_link("S1", 5, 3, "low").await.id;
    let link_b = env.add_link("S2", 6, 1, "high").await.id;

    click(&env, &link_a, Some(IPHONE_UA), "203.0.113.1").await;
    click(&env, &link_a, None, "203.0.113.2").await;
    click(&env, &link_b, None, "198.51.100.9").await;

    (env, link_a, link_b)
}

#[tokio::test]
async fn test_analytics_without_filters() {
    let (env, link_a, link_b) = seeded().await;

    let summaries = env
        .ctx
        .analytics_service
        .get_analytics(&AnalyticsFilter::default())
        .await
        .unwrap();

    assert_eq!(summaries.len(), 2);

    let a = summaries.iter().find(|s| s.link_id == link_a).unwrap();
    assert_eq!(a.school_name, "Springfield High");
    assert_eq!(a.grade, 5);
    assert_eq!(a.week, 3);
    assert_eq!(a.tech_level, TechLevel::Low);
    assert_eq!(a.click_count, 2);
    assert_eq!(a.clicks[0].device_type, "mobile");
    assert_eq!(a.clicks[0].ip_address.as_deref(), Some("203.0.113.1"));
    assert_eq!(a.clicks[1].device_type, "desktop");
    assert!(a.clicks[0].timestamp <= a.clicks[1].timestamp);

    let b = summaries.iter().find(|s| s.link_id == link_b).unwrap();
    assert_eq!(b.click_count, 1);
    assert_eq!(b.school_name, "Shelbyville Elementary");
}

#[tokio::test]
async fn test_analytics_filters_by_school_and_grade() {
    let (env, link_a, _) = seeded().await;

    let by_school = env
        .ctx
        .analytics_service
        .get_analytics(&AnalyticsFilter {
            school_id: Some("S1".to_string()),
            ..AnalyticsFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_school.len(), 1);
    assert_eq!(by_school[0].link_id, link_a);

    let by_grade = env
        .ctx
        .analytics_service
        .get_analytics(&AnalyticsFilter {
            grade: Some(6),
            ..AnalyticsFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_grade.len(), 1);
    assert_eq!(by_grade[0].school_id, "S2");

    let none = env
        .ctx
        .analytics_service
        .get_analytics(&AnalyticsFilter {
            school_id: Some("S1".to_string()),
            grade: Some(6),
            ..AnalyticsFilter::default()
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_analytics_date_range_keeps_links_with_zero_clicks() {
    let (env, _, _) = seeded().await;

    let future = AnalyticsFilter {
        start: Some(Utc::now() + Duration::days(1)),
        ..AnalyticsFilter::default()
    };
    let summaries = env
        .ctx
        .analytics_service
        .get_analytics(&future)
        .await
        .unwrap();

    assert_eq!(summaries.len(), 2);
    assert!(summaries.iter().all(|s| s.click_count == 0 && s.clicks.is_empty()));

    let window = AnalyticsFilter {
        start: Some(Utc::now() - Duration::hours(1)),
        end: Some(Utc::now() + Duration::hours(1)),
        ..AnalyticsFilter::default()
    };
    let summaries = env
        .ctx
        .analytics_service
        .get_analytics(&window)
        .await
        .unwrap();
    let total: usize = summaries.iter().map(|s| s.click_count).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_analytics_falls_back_to_school_id_when_school_deleted() {
    let (env, link_a, _) = seeded().await;
    env.ctx.school_service.delete("S1").await.unwrap();

    let summaries = env
        .ctx
        .analytics_service
        .get_analytics(&AnalyticsFilter::default())
        .await
        .unwrap();

    let a = summaries.iter().find(|s| s.link_id == link_a).unwrap();
    assert_eq!(a.school_name, "S1");
    assert_eq!(a.click_count, 2);
}

#[tokio::test]
async fn test_analytics_query_parsing() {
    let filter = AnalyticsFilter::parse(AnalyticsQuery {
        school_id: Some("  ".to_string()),
        grade: Some("5".to_string()),
        start_date: Some("2024-01-01".to_string()),
        end_date: None,
    })
    .unwrap();

    assert_eq!(filter.school_id, None);
    assert_eq!(filter.grade, Some(5));
    assert_eq!(
        filter.start.map(|d| d.to_rfc3339()),
        Some("2024-01-01T00:00:00+00:00".to_string())
    );

    assert!(
        AnalyticsFilter::parse(AnalyticsQuery {
            start_date: Some("yesterday".to_string()),
            ..AnalyticsQuery::default()
        })
        .is_err()
    );
}

#[tokio::test]
async fn test_analytics_date_bounds_are_inclusive() {
    let (env, link_a, _) = seeded().await;
    let clicks = env.ctx.click_recorder.list_clicks().await.unwrap();
    let first = clicks.iter().find(|c| c.link_id == link_a).unwrap();

    let exact = AnalyticsFilter {
        school_id: Some("S1".to_string()),
        start: Some(first.timestamp),
        end: Some(first.timestamp),
        ..AnalyticsFilter::default()
    };
    let summaries = env
        .ctx
        .analytics_service
        .get_analytics(&exact)
        .await
        .unwrap();

    assert_eq!(summaries.len(), 1);
    assert!(summaries[0].click_count >= 1);
    assert!(
        summaries[0]
            .clicks
            .iter()
            .all(|c| c.timestamp == first.timestamp)
    );
}

#[tokio::test]
async fn test_date_only_end_bound_is_start_of_day() {
    let (env, _, _) = seeded().await;
    let today = Utc::now().format("%Y-%m-%d").to_string();

    let until_today = AnalyticsFilter::parse(AnalyticsQuery {
        end_date: Some(today.clone()),
        ..AnalyticsQuery::default()
    })
    .unwrap();
    let summaries = env
        .ctx
        .analytics_service
        .get_analytics(&until_today)
        .await
        .unwrap();
    assert_eq!(summaries.len(), 2);
    assert!(summaries.iter().all(|s| s.click_count == 0));

    let tomorrow = (Utc::now() + Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    let through_today = AnalyticsFilter::parse(AnalyticsQuery {
        start_date: Some(today),
        end_date: Some(tomorrow),
        ..AnalyticsQuery::default()
    })
    .unwrap();
    let summaries = env
        .ctx
        .analytics_service
        .get_analytics(&through_today)
        .await
        .unwrap();
    let total: usize = summaries.iter().map(|s| s.click_count).sum();
    assert_eq!(total, 3);
}
