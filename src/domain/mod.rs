pub mod escalation;
pub mod financial;
pub mod kpi;
pub mod project;
pub mod resource;
pub mod user;

pub use escalation::{Escalation, EscalationStatus, EscalationUpdate, NewEscalation, Priority};
pub use financial::FinancialRecord;
pub use kpi::KpiSummary;
pub use project::{HealthStatus, NewProject, Project, ProjectStatus};
pub use resource::{NewResource, Resource, ResourceStatus, ResourceType, ResourceUpdate};
pub use user::{LoginResponse, User};
