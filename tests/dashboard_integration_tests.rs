use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use opsboard::api::{ApiError, ErrorKind, MockRemoteDataSource};
use opsboard::domain::{EscalationStatus, ProjectStatus, ResourceType};
use opsboard::services::{DashboardService, DateRangeProvider, StaticRatioBreakdowns};
use opsboard::test_helpers::{
    sample_escalation, sample_project, sample_resource, sample_summary,
};

fn service_with(source: MockRemoteDataSource) -> Arc<DashboardService> {
    let periods = Arc::new(DateRangeProvider::anchored_at(
        chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
    ));
    Arc::new(DashboardService::new(
        Arc::new(source),
        Arc::new(StaticRatioBreakdowns),
        periods,
    ))
}

fn healthy_mock() -> MockRemoteDataSource {
    let mut mock = MockRemoteDataSource::new();
    mock.expect_kpi_summary().returning(|| Ok(sample_summary()));
    mock.expect_projects().returning(|| {
        Ok(vec![
            sample_project(1, ProjectStatus::Active),
            sample_project(2, ProjectStatus::AtRisk),
        ])
    });
    mock.expect_resources().returning(|| {
        let mut resources: Vec<_> = (0..7)
            .map(|i| sample_resource(i, ResourceType::Billable))
            .collect();
        resources.extend((7..10).map(|i| sample_resource(i, ResourceType::NonBillable)));
        Ok(resources)
    });
    mock.expect_escalations().returning(|| {
        Ok(vec![
            sample_escalation(1, EscalationStatus::Open),
            sample_escalation(2, EscalationStatus::Open),
            sample_escalation(3, EscalationStatus::Resolved),
        ])
    });
    mock.expect_financials().returning(|| Ok(Vec::new()));
    mock
}

#[tokio::test]
async fn test_snapshot_withheld_until_first_refresh_settles() {
    let service = service_with(healthy_mock());
    assert!(service.snapshot().is_none());

    service.refresh().await;
    assert!(service.snapshot().is_some());
}

#[tokio::test]
async fn test_full_refresh_produces_dashboard_view_models() {
    let service = service_with(healthy_mock());
    service.refresh().await;

    let data = service.snapshot().expect("all cells settled");

    // Summary-provided counters win over raw counts.
    let kpis = &data.kpis;
    assert_eq!(kpis.len(), 4);
    assert_eq!(data.kpi("active-projects").unwrap().value, 14);
    assert_eq!(data.kpi("escalations").unwrap().value, 2);
    assert_eq!(data.kpi("escalations").unwrap().subtitle, "Score: 88/100");
    assert_eq!(data.kpi("at-risk").unwrap().value, 2);
    assert!(data.kpi("at-risk").unwrap().subtitle.contains("14%"));

    assert_eq!(data.project_health.len(), 2);
    assert_eq!(data.project_health[0].health_status, "Green");
    assert_eq!(data.escalations.len(), 3);
    assert_eq!(data.escalations[0].date_raised, "2024-03-01");
}

#[tokio::test]
async fn test_billable_ratio_from_raw_counts_when_summary_is_bare() {
    let mut mock = MockRemoteDataSource::new();
    mock.expect_kpi_summary()
        .returning(|| Ok(Default::default()));
    mock.expect_projects().returning(|| Ok(Vec::new()));
    mock.expect_resources().returning(|| {
        let mut resources: Vec<_> = (0..7)
            .map(|i| sample_resource(i, ResourceType::Billable))
            .collect();
        resources.extend((7..10).map(|i| sample_resource(i, ResourceType::NonBillable)));
        Ok(resources)
    });
    mock.expect_escalations().returning(|| Ok(Vec::new()));
    mock.expect_financials().returning(|| Ok(Vec::new()));

    let service = service_with(mock);
    service.refresh().await;

    let data = service.snapshot().unwrap();
    let ratio = &data.resource_overview.billable_ratio;
    assert_eq!(ratio.billable, 7);
    assert_eq!(ratio.non_billable, 3);
    assert_eq!(ratio.billable_percentage, 70);
}

#[tokio::test]
async fn test_one_failing_endpoint_degrades_to_empty_collection() {
    let mut mock = MockRemoteDataSource::new();
    mock.expect_kpi_summary().returning(|| Ok(sample_summary()));
    mock.expect_projects()
        .returning(|| Ok(vec![sample_project(1, ProjectStatus::Active)]));
    mock.expect_resources()
        .returning(|| Ok(vec![sample_resource(1, ResourceType::Billable)]));
    mock.expect_escalations().returning(|| {
        Err(ApiError::ServerError {
            status: 500,
            message: "escalations unavailable".to_string(),
        })
    });
    mock.expect_financials().returning(|| Ok(Vec::new()));

    let service = service_with(mock);
    service.refresh().await;

    let data = service.snapshot().expect("settled despite the failure");
    assert!(data.escalations.is_empty());
    assert_eq!(data.project_health.len(), 1);

    let error = service.escalations.error().expect("error recorded");
    assert_eq!(error.kind, ErrorKind::ServerError);
    assert!(service.projects.error().is_none());
}

#[tokio::test]
async fn test_auth_failure_is_distinguishable() {
    let mut mock = MockRemoteDataSource::new();
    mock.expect_kpi_summary().returning(|| Err(ApiError::AuthFailed));
    mock.expect_projects().returning(|| Ok(Vec::new()));
    mock.expect_resources().returning(|| Ok(Vec::new()));
    mock.expect_escalations().returning(|| Ok(Vec::new()));
    mock.expect_financials().returning(|| Ok(Vec::new()));

    let service = service_with(mock);
    service.refresh().await;

    let error = service.kpi_summary.error().expect("auth error recorded");
    assert!(error.is_auth_failure());
}

#[tokio::test]
async fn test_resource_and_financial_snapshots() {
    let service = service_with(healthy_mock());
    service.refresh().await;

    let resources = service.resource_snapshot().expect("resources settled");
    assert_eq!(resources.metrics.total, 120);
    assert_eq!(resources.metrics.utilization_rate, 82.5);
    assert_eq!(resources.engagement.len(), 3);

    let financials = service.financial_snapshot().expect("financials settled");
    assert_eq!(financials.projects.len(), 2);
    assert!(financials.monthly.is_empty());
}

#[tokio::test]
async fn test_period_change_triggers_refresh() {
    let calls = Arc::new(AtomicU32::new(0));

    let mut mock = MockRemoteDataSource::new();
    let seen = Arc::clone(&calls);
    mock.expect_kpi_summary().returning(move || {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(sample_summary())
    });
    mock.expect_projects().returning(|| Ok(Vec::new()));
    mock.expect_resources().returning(|| Ok(Vec::new()));
    mock.expect_escalations().returning(|| Ok(Vec::new()));
    mock.expect_financials().returning(|| Ok(Vec::new()));

    let service = service_with(mock);
    let listener = service.spawn_period_refresh();

    service.refresh().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    service.periods().select("prev1");
    tokio::time::timeout(Duration::from_secs(2), async {
        while calls.load(Ordering::SeqCst) < 2 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("period change re-fetches");

    listener.abort();
}
