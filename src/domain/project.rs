use serde::{Deserialize, Serialize};

/// Delivery status of a project. Unrecognized backend values degrade to
/// `Unknown` instead of failing the whole collection fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Completed,
    Cancelled,
    Delayed,
    AtRisk,
    #[serde(other)]
    Unknown,
}

/// RAG health indicator. The backend mixes `yellow` and `amber`; both are
/// kept distinct here and mapped to display labels by the aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Green,
    Yellow,
    Amber,
    Red,
    #[default]
    #[serde(other)]
    Unknown,
}

impl HealthStatus {
    /// Display label for health rows. Anything that is not explicitly
    /// green/amber/yellow renders as "Red".
    pub fn display_label(&self) -> &'static str {
        match self {
            HealthStatus::Green => "Green",
            HealthStatus::Amber => "Amber",
            HealthStatus::Yellow => "Yellow",
            HealthStatus::Red | HealthStatus::Unknown => "Red",
        }
    }
}

/// A client engagement as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    #[serde(default)]
    pub project_code: String,
    pub project_name: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub project_manager: Option<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub health_status: HealthStatus,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub current_milestone: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub planned_end_date: Option<String>,
    #[serde(default)]
    pub sow_value: f64,
    #[serde(default)]
    pub budget_allocated: Option<f64>,
    #[serde(default)]
    pub actual_cost: f64,
    #[serde(default)]
    pub on_time_percentage: Option<f64>,
    #[serde(default)]
    pub utilization_rate: f64,
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    pub fn is_at_risk(&self) -> bool {
        self.status == ProjectStatus::AtRisk
    }

    /// Contracted value minus cost to date. Negative means the project is
    /// running at a loss.
    pub fn margin(&self) -> f64 {
        self.sow_value - self.actual_cost
    }
}

/// Payload for creating a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub project_code: String,
    pub project_name: String,
    pub client_name: String,
    pub start_date: String,
    pub sow_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_status: Option<HealthStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_allocated: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_health_status_tolerated() {
        let json = r#"{
            "id": 3,
            "project_name": "Phoenix",
            "status": "active",
            "health_status": "blue"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.health_status, HealthStatus::Unknown);
        assert_eq!(project.health_status.display_label(), "Red");
    }

    #[test]
    fn test_health_display_labels() {
        assert_eq!(HealthStatus::Green.display_label(), "Green");
        assert_eq!(HealthStatus::Amber.display_label(), "Amber");
        assert_eq!(HealthStatus::Yellow.display_label(), "Yellow");
        assert_eq!(HealthStatus::Red.display_label(), "Red");
        assert_eq!(HealthStatus::Unknown.display_label(), "Red");
    }

    #[test]
    fn test_margin_can_be_negative() {
        let json = r#"{
            "id": 9,
            "project_name": "Rescue",
            "status": "at_risk",
            "health_status": "red",
            "sow_value": 100000.0,
            "actual_cost": 140000.0
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.is_at_risk());
        assert_eq!(project.margin(), -40000.0);
    }
}
