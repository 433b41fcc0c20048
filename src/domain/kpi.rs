use serde::{Deserialize, Serialize};

/// Aggregate snapshot computed server-side per request. Every field is
/// optional on the wire; the aggregation layer falls back to counting the
/// raw collections when a field is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    #[serde(default)]
    pub total_resources: Option<u32>,
    #[serde(default)]
    pub billable_resources: Option<u32>,
    #[serde(default)]
    pub non_billable_resources: Option<u32>,
    #[serde(default)]
    pub bench_resources: Option<u32>,
    #[serde(default)]
    pub active_projects: Option<u32>,
    #[serde(default)]
    pub completed_projects: Option<u32>,
    #[serde(default)]
    pub at_risk_projects: Option<u32>,
    #[serde(default)]
    pub open_escalations: Option<u32>,
    #[serde(default)]
    pub total_revenue: Option<f64>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub total_margin: Option<f64>,
    #[serde(default)]
    pub utilization_rate: Option<f64>,
    #[serde(default)]
    pub bench_percentage: Option<f64>,
    #[serde(default)]
    pub avg_bench_days: Option<f64>,
    #[serde(default)]
    pub escalation_score: Option<u32>,
}
