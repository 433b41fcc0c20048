use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{FinancialRecord, Project};

/// Revenue, cost and margin for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyFinancials {
    pub month: String,
    pub revenue: f64,
    pub cost: f64,
    pub margin: f64,
}

/// Year-to-date roll-up across every monthly record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YtdSummary {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_margin: f64,
    pub margin_percentage: f64,
}

/// Per-project financial posture derived from contract and burn figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectFinancialSummary {
    pub project_name: String,
    pub revenue: f64,
    pub cost: f64,
    pub margin: f64,
    pub margin_percentage: f64,
    pub budget_utilization: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialDashboard {
    pub monthly: Vec<MonthlyFinancials>,
    pub ytd: YtdSummary,
    pub projects: Vec<ProjectFinancialSummary>,
}

/// Pure aggregation for the financial view. Monthly points are grouped by
/// `month_year` in ascending order; every percentage guards a zero
/// denominator with 0 rather than NaN.
pub fn aggregate_financials(
    records: &[FinancialRecord],
    projects: &[Project],
) -> FinancialDashboard {
    let monthly = monthly_points(records);
    FinancialDashboard {
        ytd: ytd_summary(&monthly),
        projects: project_summaries(projects),
        monthly,
    }
}

fn monthly_points(records: &[FinancialRecord]) -> Vec<MonthlyFinancials> {
    let mut by_month: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for record in records {
        let entry = by_month.entry(record.month_year.clone()).or_default();
        entry.0 += record.revenue.unwrap_or(0.0);
        entry.1 += record.cost.unwrap_or(0.0);
    }
    by_month
        .into_iter()
        .map(|(month, (revenue, cost))| MonthlyFinancials {
            month,
            revenue,
            cost,
            margin: revenue - cost,
        })
        .collect()
}

fn ytd_summary(monthly: &[MonthlyFinancials]) -> YtdSummary {
    let total_revenue: f64 = monthly.iter().map(|m| m.revenue).sum();
    let total_cost: f64 = monthly.iter().map(|m| m.cost).sum();
    let total_margin = total_revenue - total_cost;
    YtdSummary {
        total_revenue,
        total_cost,
        total_margin,
        margin_percentage: share_of(total_margin, total_revenue),
    }
}

fn project_summaries(projects: &[Project]) -> Vec<ProjectFinancialSummary> {
    projects
        .iter()
        .map(|p| {
            let revenue = p.sow_value;
            let cost = p.actual_cost;
            let margin = revenue - cost;
            let budget = p.budget_allocated.unwrap_or(p.sow_value);
            ProjectFinancialSummary {
                project_name: p.project_name.clone(),
                revenue,
                cost,
                margin,
                margin_percentage: share_of(margin, revenue),
                budget_utilization: share_of(cost, budget),
            }
        })
        .collect()
}

fn share_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { (part / whole) * 100.0 } else { 0.0 }
}
