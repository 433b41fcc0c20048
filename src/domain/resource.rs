use serde::{Deserialize, Serialize};

/// Billing classification of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Billable,
    NonBillable,
    Intern,
    Contractor,
}

/// Allocation status of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    Allocated,
    Bench,
    Training,
    Shadow,
    Internal,
    Pip,
    Inactive,
}

/// An employee record as served by the backend. Read-only on the client;
/// edits go back through the typed request structs below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub employee_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    pub resource_type: ResourceType,
    pub status: ResourceStatus,
    #[serde(default)]
    pub utilization_percentage: f64,
    #[serde(default)]
    pub bench_days: u32,
    #[serde(default)]
    pub cost_rate: f64,
    #[serde(default)]
    pub billing_rate: Option<f64>,
    #[serde(default)]
    pub skill_category: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub years_of_experience: f64,
    #[serde(default)]
    pub assigned_project: Option<String>,
    #[serde(default)]
    pub available_from_date: Option<String>,
}

impl Resource {
    pub fn is_billable(&self) -> bool {
        self.resource_type == ResourceType::Billable
    }

    pub fn is_on_bench(&self) -> bool {
        self.status == ResourceStatus::Bench
    }

    /// Backend sends `full_name` for most rows; older rows only carry the
    /// name parts.
    pub fn display_name(&self) -> String {
        match &self.full_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string(),
        }
    }
}

/// Payload for creating a resource (HR form submission).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewResource {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub designation: String,
    pub department: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<String>,
}

/// Partial update for an existing resource. Absent fields are left
/// untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_rate: Option<f64>,
}
