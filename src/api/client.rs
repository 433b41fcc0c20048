use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::ApiError;
use super::token::TokenStore;
use super::RemoteDataSource;
use crate::domain::{
    Escalation, EscalationUpdate, FinancialRecord, KpiSummary, LoginResponse, NewEscalation,
    NewProject, NewResource, Project, Resource, ResourceUpdate, User,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-over-HTTP implementation of [`RemoteDataSource`].
///
/// Attaches the bearer credential from the injected [`TokenStore`] to every
/// request. A 401 answer clears that store before surfacing
/// [`ApiError::AuthFailed`], so a stale token is never retried.
#[derive(Clone)]
pub struct HttpDataSource {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl HttpDataSource {
    pub fn new(base_url: impl Into<String>, tokens: TokenStore) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let request = match self.tokens.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::NetworkUnreachable(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "api response");

        if status == StatusCode::UNAUTHORIZED {
            warn!("received 401, invalidating stored credential");
            self.tokens.clear();
            return Err(ApiError::AuthFailed);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkUnreachable(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::ServerError {
                status: status.as_u16(),
                message: extract_error_message(&body, status),
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ApiError::ParseError(e.to_string()))?;
        serde_json::from_value(unwrap_envelope(value))
            .map_err(|e| ApiError::ParseError(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.get(self.url(path))).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    /// Exchanges credentials for a bearer token, storing it for all
    /// subsequent requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let response: LoginResponse = self
            .post(
                "/auth/login",
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await?;
        self.tokens.set(response.access_token);
        Ok(response.user)
    }

    /// Drops the stored credential. Purely local; the backend session is
    /// token-based.
    pub fn logout(&self) {
        self.tokens.clear();
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get("/auth/me").await
    }
}

#[async_trait]
impl RemoteDataSource for HttpDataSource {
    async fn resources(&self) -> Result<Vec<Resource>, ApiError> {
        self.get("/resources").await
    }

    async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get("/projects").await
    }

    async fn escalations(&self) -> Result<Vec<Escalation>, ApiError> {
        self.get("/escalations").await
    }

    async fn financials(&self) -> Result<Vec<FinancialRecord>, ApiError> {
        self.get("/financials").await
    }

    async fn kpi_summary(&self) -> Result<KpiSummary, ApiError> {
        self.get("/kpis/summary").await
    }

    async fn create_resource(&self, request: NewResource) -> Result<Resource, ApiError> {
        self.post("/resources", &request).await
    }

    async fn update_resource(
        &self,
        id: i64,
        request: ResourceUpdate,
    ) -> Result<Resource, ApiError> {
        self.put(&format!("/resources/{id}"), &request).await
    }

    async fn create_project(&self, request: NewProject) -> Result<Project, ApiError> {
        self.post("/projects", &request).await
    }

    async fn create_escalation(&self, request: NewEscalation) -> Result<Escalation, ApiError> {
        self.post("/escalations", &request).await
    }

    async fn update_escalation(
        &self,
        id: i64,
        request: EscalationUpdate,
    ) -> Result<Escalation, ApiError> {
        self.put(&format!("/escalations/{id}"), &request).await
    }
}

/// The backend wraps some responses in a `{"data": ...}` envelope and
/// serves others bare. Accept both.
fn unwrap_envelope(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) => match map.remove("data") {
            Some(inner) if !inner.is_null() => inner,
            other => {
                if let Some(inner) = other {
                    map.insert("data".to_string(), inner);
                }
                serde_json::Value::Object(map)
            }
        },
        other => other,
    }
}

fn extract_error_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }
    format!(
        "API request failed: {}",
        status.canonical_reason().unwrap_or("unknown status")
    )
}
