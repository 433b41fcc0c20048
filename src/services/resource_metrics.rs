use serde::Serialize;

use super::breakdown::{BreakdownProvider, CountBucket, percent_of};
use super::dashboard::date_only;
use crate::domain::{KpiSummary, Resource, ResourceStatus};

const DEFAULT_RELEASE_UTILIZATION: f64 = 85.0;
const MAX_UPCOMING_RELEASES: usize = 5;

/// Headline counters for the resource-management view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceMetrics {
    pub total: u32,
    pub billable: u32,
    pub non_billable: u32,
    pub bench: u32,
    pub utilization_rate: f64,
}

/// One row of the upcoming-release table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseRow {
    pub id: String,
    pub name: String,
    pub current_project: String,
    pub release_date: String,
    pub role: String,
    pub experience: String,
    pub skillset: Vec<String>,
    pub utilization_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceDashboard {
    pub metrics: ResourceMetrics,
    pub seniority: Vec<CountBucket>,
    pub skills: Vec<CountBucket>,
    pub bench_aging: Vec<CountBucket>,
    pub engagement: Vec<CountBucket>,
    pub upcoming_releases: Vec<ReleaseRow>,
}

/// Pure aggregation for the resource-management view. Counters come from
/// the KPI summary when present, otherwise from counting the raw rows.
pub fn aggregate_resources(
    resources: &[Resource],
    summary: Option<&KpiSummary>,
    breakdowns: &dyn BreakdownProvider,
) -> ResourceDashboard {
    let total = summary
        .and_then(|s| s.total_resources)
        .unwrap_or(resources.len() as u32);
    let billable = summary
        .and_then(|s| s.billable_resources)
        .unwrap_or_else(|| resources.iter().filter(|r| r.is_billable()).count() as u32);
    let non_billable = summary
        .and_then(|s| s.non_billable_resources)
        .unwrap_or(total.saturating_sub(billable));
    let bench = summary
        .and_then(|s| s.bench_resources)
        .unwrap_or_else(|| resources.iter().filter(|r| r.is_on_bench()).count() as u32);
    let utilization_rate = summary
        .and_then(|s| s.utilization_rate)
        .unwrap_or_else(|| mean_utilization(resources));

    let engagement = vec![
        bucket("Billable", billable, total),
        bucket("Non-Billable", non_billable, total),
        bucket("Bench", bench, total),
    ];

    ResourceDashboard {
        metrics: ResourceMetrics {
            total,
            billable,
            non_billable,
            bench,
            utilization_rate,
        },
        seniority: breakdowns.seniority_distribution(total),
        skills: breakdowns.skill_distribution(total),
        bench_aging: breakdowns.bench_aging(bench),
        engagement,
        upcoming_releases: upcoming_releases(resources),
    }
}

fn bucket(label: &str, count: u32, total: u32) -> CountBucket {
    CountBucket {
        label: label.to_string(),
        count,
        percentage: percent_of(count, total),
    }
}

fn mean_utilization(resources: &[Resource]) -> f64 {
    if resources.is_empty() {
        return 0.0;
    }
    let sum: f64 = resources.iter().map(|r| r.utilization_percentage).sum();
    sum / resources.len() as f64
}

/// Allocated resources nearest the top of the roster, shown as candidates
/// rolling off their projects. Deterministic: same roster, same rows.
fn upcoming_releases(resources: &[Resource]) -> Vec<ReleaseRow> {
    resources
        .iter()
        .filter(|r| r.status == ResourceStatus::Allocated)
        .take(MAX_UPCOMING_RELEASES)
        .map(|r| ReleaseRow {
            id: r.id.to_string(),
            name: r.display_name(),
            current_project: r
                .assigned_project
                .clone()
                .unwrap_or_else(|| "TBD".to_string()),
            release_date: date_only(r.available_from_date.as_deref()),
            role: r.designation.clone(),
            experience: r
                .experience_level
                .clone()
                .unwrap_or_else(|| format!("{} years", r.years_of_experience)),
            skillset: r.skill_category.clone().into_iter().collect(),
            utilization_percentage: if r.utilization_percentage > 0.0 {
                r.utilization_percentage
            } else {
                DEFAULT_RELEASE_UTILIZATION
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::breakdown::StaticRatioBreakdowns;
    use crate::test_helpers::sample_resource;
    use crate::domain::ResourceType;

    fn aggregate(resources: &[Resource], summary: Option<&KpiSummary>) -> ResourceDashboard {
        aggregate_resources(resources, summary, &StaticRatioBreakdowns)
    }

    #[test]
    fn test_counters_fall_back_to_raw_counts() {
        let mut resources: Vec<_> = (0..4)
            .map(|i| sample_resource(i, ResourceType::Billable))
            .collect();
        let mut benched = sample_resource(4, ResourceType::NonBillable);
        benched.status = ResourceStatus::Bench;
        resources.push(benched);

        let dashboard = aggregate(&resources, None);
        assert_eq!(dashboard.metrics.total, 5);
        assert_eq!(dashboard.metrics.billable, 4);
        assert_eq!(dashboard.metrics.non_billable, 1);
        assert_eq!(dashboard.metrics.bench, 1);
    }

    #[test]
    fn test_summary_counters_take_precedence() {
        let resources = vec![sample_resource(1, ResourceType::Billable)];
        let summary = KpiSummary {
            total_resources: Some(100),
            billable_resources: Some(80),
            non_billable_resources: Some(20),
            bench_resources: Some(10),
            utilization_rate: Some(77.5),
            ..Default::default()
        };

        let dashboard = aggregate(&resources, Some(&summary));
        assert_eq!(dashboard.metrics.total, 100);
        assert_eq!(dashboard.metrics.billable, 80);
        assert_eq!(dashboard.metrics.utilization_rate, 77.5);
        assert_eq!(dashboard.engagement[0].percentage, 80);
    }

    #[test]
    fn test_mean_utilization_fallback() {
        let mut a = sample_resource(1, ResourceType::Billable);
        a.utilization_percentage = 90.0;
        let mut b = sample_resource(2, ResourceType::Billable);
        b.utilization_percentage = 70.0;

        let dashboard = aggregate(&[a, b], None);
        assert_eq!(dashboard.metrics.utilization_rate, 80.0);

        let empty = aggregate(&[], None);
        assert_eq!(empty.metrics.utilization_rate, 0.0);
    }

    #[test]
    fn test_upcoming_releases_deterministic_and_capped() {
        let mut resources: Vec<_> = (0..8)
            .map(|i| {
                let mut r = sample_resource(i, ResourceType::Billable);
                r.status = ResourceStatus::Allocated;
                r.available_from_date = Some(format!("2024-0{}-01T00:00:00Z", (i % 9) + 1));
                r
            })
            .collect();
        resources[2].status = ResourceStatus::Bench;

        let first = aggregate(&resources, None);
        let second = aggregate(&resources, None);
        assert_eq!(first.upcoming_releases, second.upcoming_releases);
        assert_eq!(first.upcoming_releases.len(), 5);
        assert!(first.upcoming_releases.iter().all(|row| row.id != "2"));
        assert_eq!(first.upcoming_releases[0].release_date, "2024-01-01");
    }

    #[test]
    fn test_release_row_defaults() {
        let mut r = sample_resource(3, ResourceType::Billable);
        r.status = ResourceStatus::Allocated;
        r.assigned_project = None;
        r.experience_level = None;
        r.years_of_experience = 4.5;
        r.utilization_percentage = 0.0;
        r.skill_category = None;

        let dashboard = aggregate(&[r], None);
        let row = &dashboard.upcoming_releases[0];
        assert_eq!(row.current_project, "TBD");
        assert_eq!(row.experience, "4.5 years");
        assert_eq!(row.utilization_percentage, 85.0);
        assert!(row.skillset.is_empty());
    }
}
