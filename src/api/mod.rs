pub mod client;
pub mod error;
pub mod token;

pub use client::HttpDataSource;
pub use error::{ApiError, ErrorKind, FetchError};
pub use token::TokenStore;

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    Escalation, EscalationUpdate, FinancialRecord, KpiSummary, NewEscalation, NewProject,
    NewResource, Project, Resource, ResourceUpdate,
};

/// The backend seam. The dashboard services only ever talk to this trait;
/// production wires in [`HttpDataSource`], tests wire in the generated mock.
#[automock]
#[async_trait]
pub trait RemoteDataSource: Send + Sync {
    async fn resources(&self) -> Result<Vec<Resource>, ApiError>;
    async fn projects(&self) -> Result<Vec<Project>, ApiError>;
    async fn escalations(&self) -> Result<Vec<Escalation>, ApiError>;
    async fn financials(&self) -> Result<Vec<FinancialRecord>, ApiError>;
    async fn kpi_summary(&self) -> Result<KpiSummary, ApiError>;

    async fn create_resource(&self, request: NewResource) -> Result<Resource, ApiError>;
    async fn update_resource(&self, id: i64, request: ResourceUpdate)
    -> Result<Resource, ApiError>;
    async fn create_project(&self, request: NewProject) -> Result<Project, ApiError>;
    async fn create_escalation(&self, request: NewEscalation) -> Result<Escalation, ApiError>;
    async fn update_escalation(
        &self,
        id: i64,
        request: EscalationUpdate,
    ) -> Result<Escalation, ApiError>;
}
