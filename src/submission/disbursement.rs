//! Clients for the external disbursement collaborator.
//!
//! The scheduler only sees [`DisbursementClient`]. Any `Err` from a client is
//! treated as a transport failure: the tick is abandoned and every run is left
//! untouched for the next one.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::{PayrollError, PayrollResult};

use super::{DisbursementRequest, DisbursementResponse, IntegrationService};

/// Path of the submit endpoint on a remote integration service.
pub const SUBMIT_PATH: &str = "/integration/payroll/submit";

/// Sends a batch to the disbursement system.
#[async_trait]
pub trait DisbursementClient: Send + Sync {
    /// Submits `request` and returns the structured response.
    async fn submit(&self, request: &DisbursementRequest) -> PayrollResult<DisbursementResponse>;
}

/// Calls an [`IntegrationService`] in the same process.
#[derive(Clone)]
pub struct LocalDisbursementClient {
    integration: IntegrationService,
}

impl LocalDisbursementClient {
    /// Wraps an integration service.
    pub fn new(integration: IntegrationService) -> Self {
        Self { integration }
    }
}

#[async_trait]
impl DisbursementClient for LocalDisbursementClient {
    async fn submit(&self, request: &DisbursementRequest) -> PayrollResult<DisbursementResponse> {
        self.integration.submit(request.clone()).await
    }
}

/// POSTs batches to a remote integration service as JSON.
#[derive(Debug, Clone)]
pub struct HttpDisbursementClient {
    client: Client,
    submit_url: String,
}

impl HttpDisbursementClient {
    /// Creates a client for the service rooted at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            submit_url: format!("{}{}", base_url.trim_end_matches('/'), SUBMIT_PATH),
        }
    }

    /// The full submit URL.
    pub fn submit_url(&self) -> &str {
        &self.submit_url
    }
}

#[async_trait]
impl DisbursementClient for HttpDisbursementClient {
    async fn submit(&self, request: &DisbursementRequest) -> PayrollResult<DisbursementResponse> {
        let response = self
            .client
            .post(&self.submit_url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport(format!("POST {} failed: {}", self.submit_url, e)))?;

        let status = response.status();
        debug!(batch_id = %request.batch_id, http_status = %status, "Disbursement responded");

        if status == StatusCode::CONFLICT {
            return Err(PayrollError::DuplicateBatch {
                batch_id: request.batch_id.clone(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(transport(format!(
                "disbursement returned {}: {}",
                status, body
            )));
        }

        response
            .json::<DisbursementResponse>()
            .await
            .map_err(|e| transport(format!("unreadable disbursement response: {}", e)))
    }
}

fn transport(message: String) -> PayrollError {
    PayrollError::TransientExternal { message }
}
