use serde::{Deserialize, Serialize};

/// One month of booked revenue/cost for a project, as served by the
/// `/financials` endpoint. `month_year` is an ISO `YYYY-MM` key so
/// lexicographic order is chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub id: i64,
    pub project_id: i64,
    pub month_year: String,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub margin: Option<f64>,
}
