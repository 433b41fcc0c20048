pub mod breakdown;
pub mod dashboard;
pub mod date_filter;
pub mod fetch_cache;
pub mod financial_metrics;
pub mod resource_metrics;

pub use breakdown::{BreakdownProvider, CountBucket, StaticRatioBreakdowns, percent_of};
pub use dashboard::{
    BillableRatio, DashboardData, DashboardInputs, DashboardService, EscalationRow, KpiTile,
    ProjectHealthRow, ResourceOverview, aggregate_dashboard,
};
pub use date_filter::{DatePeriod, DateRangeProvider, PeriodOption};
pub use fetch_cache::{FetchCell, FetchState};
pub use financial_metrics::{
    FinancialDashboard, MonthlyFinancials, ProjectFinancialSummary, YtdSummary,
    aggregate_financials,
};
pub use resource_metrics::{
    ReleaseRow, ResourceDashboard, ResourceMetrics, aggregate_resources,
};
