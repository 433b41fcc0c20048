use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::breakdown::{BreakdownProvider, CountBucket, percent_of};
use super::date_filter::{DatePeriod, DateRangeProvider};
use super::fetch_cache::FetchCell;
use super::financial_metrics::{FinancialDashboard, aggregate_financials};
use super::resource_metrics::{ResourceDashboard, aggregate_resources};
use crate::api::RemoteDataSource;
use crate::domain::{
    Escalation, EscalationStatus, FinancialRecord, KpiSummary, Priority, Project, Resource,
};

pub const KPI_ACTIVE_PROJECTS: &str = "active-projects";
pub const KPI_TOTAL_RESOURCES: &str = "total-resources";
pub const KPI_AT_RISK: &str = "at-risk";
pub const KPI_ESCALATIONS: &str = "escalations";

const DEFAULT_ESCALATION_SCORE: u32 = 75;
const DEFAULT_ON_TIME_PERCENTAGE: f64 = 85.0;
const MISSING_NAME: &str = "TBD";

/// One headline tile on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiTile {
    pub id: &'static str,
    pub title: &'static str,
    pub value: u32,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillableRatio {
    pub billable: u32,
    pub non_billable: u32,
    pub billable_percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceOverview {
    pub total_engineers: u32,
    pub bench_percentage: f64,
    pub allocation_percentage: f64,
    pub role_distribution: Vec<CountBucket>,
    pub experience_distribution: Vec<CountBucket>,
    pub billable_ratio: BillableRatio,
}

/// Escalation table row, display-ready.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EscalationRow {
    pub id: String,
    pub title: String,
    pub customer: String,
    pub project: String,
    pub owner: String,
    pub priority: Priority,
    pub status: EscalationStatus,
    pub date_raised: String,
    pub resolution_eta: String,
    pub description: String,
    pub business_impact: String,
    pub escalation_type: String,
}

/// Project health table row, display-ready.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectHealthRow {
    pub id: String,
    pub project_name: String,
    pub customer: String,
    pub health_status: &'static str,
    pub current_stage: String,
    pub on_time_percentage: f64,
    pub end_date: String,
    pub risk_level: String,
    pub dm_po: String,
}

/// The four view-model groups the dashboard renders, produced together or
/// not at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub period: DatePeriod,
    pub kpis: Vec<KpiTile>,
    pub resource_overview: ResourceOverview,
    pub escalations: Vec<EscalationRow>,
    pub project_health: Vec<ProjectHealthRow>,
}

impl DashboardData {
    pub fn kpi(&self, id: &str) -> Option<&KpiTile> {
        self.kpis.iter().find(|tile| tile.id == id)
    }
}

/// Raw collections feeding one aggregation pass. The summary is optional;
/// any field it lacks is recomputed from the raw collections.
#[derive(Debug, Clone, Copy)]
pub struct DashboardInputs<'a> {
    pub summary: Option<&'a KpiSummary>,
    pub projects: &'a [Project],
    pub resources: &'a [Resource],
    pub escalations: &'a [Escalation],
}

/// Pure aggregation from raw collections to display models. Deterministic:
/// identical inputs always yield identical output, and nothing is mutated.
pub fn aggregate_dashboard(
    inputs: &DashboardInputs<'_>,
    period: DatePeriod,
    breakdowns: &dyn BreakdownProvider,
) -> DashboardData {
    DashboardData {
        period,
        kpis: kpi_tiles(inputs),
        resource_overview: resource_overview(inputs, breakdowns),
        escalations: escalation_rows(inputs.escalations),
        project_health: project_health_rows(inputs.projects),
    }
}

fn kpi_tiles(inputs: &DashboardInputs<'_>) -> Vec<KpiTile> {
    let summary = inputs.summary;

    let active_projects = summary
        .and_then(|s| s.active_projects)
        .unwrap_or_else(|| inputs.projects.iter().filter(|p| p.is_active()).count() as u32);
    let at_risk_projects = summary
        .and_then(|s| s.at_risk_projects)
        .unwrap_or_else(|| inputs.projects.iter().filter(|p| p.is_at_risk()).count() as u32);
    let total_resources = summary
        .and_then(|s| s.total_resources)
        .unwrap_or(inputs.resources.len() as u32);
    let billable_resources = summary
        .and_then(|s| s.billable_resources)
        .unwrap_or_else(|| inputs.resources.iter().filter(|r| r.is_billable()).count() as u32);
    // Always the raw count; the backend summary lags behind the list view.
    let open_escalations = inputs.escalations.iter().filter(|e| e.is_open()).count() as u32;
    let escalation_score = summary
        .and_then(|s| s.escalation_score)
        .unwrap_or(DEFAULT_ESCALATION_SCORE);

    let at_risk_share = percent_of(at_risk_projects, active_projects.max(1));

    vec![
        KpiTile {
            id: KPI_ACTIVE_PROJECTS,
            title: "Active Projects",
            value: active_projects,
            subtitle: "Currently in progress".to_string(),
        },
        KpiTile {
            id: KPI_TOTAL_RESOURCES,
            title: "Total Resources",
            value: total_resources,
            subtitle: format!("{billable_resources} billable"),
        },
        KpiTile {
            id: KPI_AT_RISK,
            title: "At Risk",
            value: at_risk_projects,
            subtitle: format!("{at_risk_share}% Need attention"),
        },
        KpiTile {
            id: KPI_ESCALATIONS,
            title: "Escalations",
            value: open_escalations,
            subtitle: format!("Score: {escalation_score}/100"),
        },
    ]
}

fn resource_overview(
    inputs: &DashboardInputs<'_>,
    breakdowns: &dyn BreakdownProvider,
) -> ResourceOverview {
    let summary = inputs.summary;

    let total = summary
        .and_then(|s| s.total_resources)
        .unwrap_or(inputs.resources.len() as u32);
    let billable = summary
        .and_then(|s| s.billable_resources)
        .unwrap_or_else(|| inputs.resources.iter().filter(|r| r.is_billable()).count() as u32);
    let non_billable = total.saturating_sub(billable);

    ResourceOverview {
        total_engineers: total,
        bench_percentage: summary.and_then(|s| s.bench_percentage).unwrap_or(0.0),
        allocation_percentage: summary.and_then(|s| s.utilization_rate).unwrap_or(0.0),
        role_distribution: breakdowns.role_distribution(total),
        experience_distribution: breakdowns.experience_distribution(total),
        billable_ratio: BillableRatio {
            billable,
            non_billable,
            billable_percentage: percent_of(billable, total),
        },
    }
}

fn escalation_rows(escalations: &[Escalation]) -> Vec<EscalationRow> {
    escalations
        .iter()
        .map(|e| EscalationRow {
            id: e.id.to_string(),
            title: e.title.clone(),
            customer: or_tbd(e.client_name.as_deref()),
            project: or_tbd(e.project_name.as_deref()),
            owner: e
                .assigned_to
                .clone()
                .or_else(|| e.raised_by.clone())
                .unwrap_or_default(),
            priority: e.priority,
            status: e.status,
            date_raised: date_only(e.raised_date.as_deref()),
            resolution_eta: date_only(e.target_resolution_date.as_deref()),
            description: e.description.clone().unwrap_or_default(),
            business_impact: e
                .business_impact
                .clone()
                .unwrap_or_else(|| "Medium".to_string()),
            escalation_type: e
                .escalation_type
                .clone()
                .unwrap_or_else(|| "Technical".to_string()),
        })
        .collect()
}

fn project_health_rows(projects: &[Project]) -> Vec<ProjectHealthRow> {
    projects
        .iter()
        .map(|p| ProjectHealthRow {
            id: p.id.to_string(),
            project_name: p.project_name.clone(),
            customer: or_tbd(p.client_name.as_deref()),
            health_status: p.health_status.display_label(),
            current_stage: p
                .current_milestone
                .clone()
                .unwrap_or_else(|| "Development".to_string()),
            on_time_percentage: p.on_time_percentage.unwrap_or(DEFAULT_ON_TIME_PERCENTAGE),
            end_date: date_only(p.end_date.as_deref().or(p.planned_end_date.as_deref())),
            risk_level: p.risk_level.clone().unwrap_or_else(|| "Low".to_string()),
            dm_po: or_tbd(p.project_manager.as_deref()),
        })
        .collect()
}

fn or_tbd(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING_NAME.to_string(),
    }
}

/// `YYYY-MM-DD` prefix of a backend ISO timestamp; empty when absent.
pub(crate) fn date_only(timestamp: Option<&str>) -> String {
    timestamp
        .and_then(|t| t.split('T').next())
        .unwrap_or_default()
        .to_string()
}

/// Orchestrates the dashboard's endpoint fetches and exposes gated
/// view-model snapshots.
///
/// Endpoints load concurrently and independently; one failing collection
/// never blocks the others. A snapshot is withheld (`None`) while any of
/// its dependencies is still loading; once all have settled, collections
/// that ended in error are treated as empty so the dashboard degrades
/// instead of disappearing (their errors stay visible on the cells).
pub struct DashboardService {
    source: Arc<dyn RemoteDataSource>,
    breakdowns: Arc<dyn BreakdownProvider>,
    periods: Arc<DateRangeProvider>,
    pub kpi_summary: FetchCell<KpiSummary>,
    pub projects: FetchCell<Vec<Project>>,
    pub resources: FetchCell<Vec<Resource>>,
    pub escalations: FetchCell<Vec<Escalation>>,
    pub financials: FetchCell<Vec<FinancialRecord>>,
}

impl DashboardService {
    pub fn new(
        source: Arc<dyn RemoteDataSource>,
        breakdowns: Arc<dyn BreakdownProvider>,
        periods: Arc<DateRangeProvider>,
    ) -> Self {
        Self {
            source,
            breakdowns,
            periods,
            kpi_summary: FetchCell::new(),
            projects: FetchCell::new(),
            resources: FetchCell::new(),
            escalations: FetchCell::new(),
            financials: FetchCell::new(),
        }
    }

    pub fn periods(&self) -> &DateRangeProvider {
        &self.periods
    }

    /// Fetches all tracked collections concurrently. Completion order does
    /// not matter; a refresh issued later always wins over one still in
    /// flight (per-cell sequencing).
    pub async fn refresh(&self) {
        info!(period = %self.periods.selected_id(), "refreshing dashboard data");

        let src = Arc::clone(&self.source);
        let kpis = self.kpi_summary.load(move || {
            let src = Arc::clone(&src);
            async move { src.kpi_summary().await }
        });

        let src = Arc::clone(&self.source);
        let projects = self.projects.load(move || {
            let src = Arc::clone(&src);
            async move { src.projects().await }
        });

        let src = Arc::clone(&self.source);
        let resources = self.resources.load(move || {
            let src = Arc::clone(&src);
            async move { src.resources().await }
        });

        let src = Arc::clone(&self.source);
        let escalations = self.escalations.load(move || {
            let src = Arc::clone(&src);
            async move { src.escalations().await }
        });

        let src = Arc::clone(&self.source);
        let financials = self.financials.load(move || {
            let src = Arc::clone(&src);
            async move { src.financials().await }
        });

        tokio::join!(kpis, projects, resources, escalations, financials);
    }

    /// Re-runs every refresh whenever the active period changes. Returns
    /// the handle of the spawned listener task.
    pub fn spawn_period_refresh(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let service = Arc::clone(self);
        let mut selection = service.periods.subscribe();
        tokio::spawn(async move {
            while selection.changed().await.is_ok() {
                service.refresh().await;
            }
        })
    }

    /// Main dashboard view models; `None` until the KPI summary, projects,
    /// resources and escalations have all settled.
    pub fn snapshot(&self) -> Option<DashboardData> {
        let kpi = self.kpi_summary.state();
        let projects = self.projects.state();
        let resources = self.resources.state();
        let escalations = self.escalations.state();

        if kpi.loading || projects.loading || resources.loading || escalations.loading {
            return None;
        }

        let inputs = DashboardInputs {
            summary: kpi.data.as_ref(),
            projects: projects.data.as_deref().unwrap_or(&[]),
            resources: resources.data.as_deref().unwrap_or(&[]),
            escalations: escalations.data.as_deref().unwrap_or(&[]),
        };
        Some(aggregate_dashboard(
            &inputs,
            self.periods.active_period(),
            self.breakdowns.as_ref(),
        ))
    }

    /// Resource-management view models; gated on resources and the KPI
    /// summary.
    pub fn resource_snapshot(&self) -> Option<ResourceDashboard> {
        let resources = self.resources.state();
        let kpi = self.kpi_summary.state();
        if resources.loading || kpi.loading {
            return None;
        }
        Some(aggregate_resources(
            resources.data.as_deref().unwrap_or(&[]),
            kpi.data.as_ref(),
            self.breakdowns.as_ref(),
        ))
    }

    /// Financial view models; gated on projects and financial records.
    pub fn financial_snapshot(&self) -> Option<FinancialDashboard> {
        let projects = self.projects.state();
        let financials = self.financials.state();
        if projects.loading || financials.loading {
            return None;
        }
        Some(aggregate_financials(
            financials.data.as_deref().unwrap_or(&[]),
            projects.data.as_deref().unwrap_or(&[]),
        ))
    }
}
