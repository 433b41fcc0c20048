use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Escalation lifecycle. Created `Open`, moves forward through the enum;
/// `Resolved`, `Closed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationStatus {
    Open,
    Acknowledged,
    InProgress,
    PendingClient,
    Resolved,
    Closed,
    Cancelled,
}

impl EscalationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EscalationStatus::Resolved | EscalationStatus::Closed | EscalationStatus::Cancelled
        )
    }
}

/// A tracked customer/project issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Escalation {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub raised_by: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub priority: Priority,
    pub status: EscalationStatus,
    #[serde(default)]
    pub raised_date: Option<String>,
    #[serde(default)]
    pub target_resolution_date: Option<String>,
    #[serde(default)]
    pub business_impact: Option<String>,
    #[serde(default)]
    pub escalation_type: Option<String>,
}

impl Escalation {
    pub fn is_open(&self) -> bool {
        self.status == EscalationStatus::Open
    }
}

/// Payload for raising an escalation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEscalation {
    pub title: String,
    pub project_id: i64,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_resolution_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_type: Option<String>,
}

/// Partial update for an existing escalation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EscalationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EscalationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_resolution_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
