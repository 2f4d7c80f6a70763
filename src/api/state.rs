//! Application state for the payroll engine API.
//!
//! This module wires the services shared by all request handlers on top of
//! one store.

use std::sync::Arc;

use crate::config::{AppSettings, ConfigLoader, DisbursementMode};
use crate::error::{PayrollError, PayrollResult};
use crate::payroll::PayrollService;
use crate::payslip::{PayslipBuilder, YtdAggregator};
use crate::store::InMemoryStore;
use crate::submission::{
    BatchSubmitter, DisbursementClient, HttpDisbursementClient, IntegrationService,
    LocalDisbursementClient, OutcomeGenerator, RandomOutcomeGenerator,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    payroll: PayrollService,
    integration: IntegrationService,
    submitter: Arc<BatchSubmitter>,
    payslips: PayslipBuilder,
    ytd: YtdAggregator,
}

impl AppState {
    /// Builds the state from loaded configuration, settling batches with the
    /// randomized simulator.
    pub fn new(config: &ConfigLoader) -> PayrollResult<Self> {
        let outcomes = Arc::new(RandomOutcomeGenerator::from(config.settings().simulator));
        Self::with_outcomes(config, outcomes)
    }

    /// Builds the state with a specific outcome generator.
    pub fn with_outcomes(
        config: &ConfigLoader,
        outcomes: Arc<dyn OutcomeGenerator>,
    ) -> PayrollResult<Self> {
        let store = Arc::new(InMemoryStore::with_directory(
            config.employees().to_vec(),
            config.pay_groups().to_vec(),
        ));
        Self::assemble(store, config.settings(), outcomes)
    }

    /// Wires every service on top of `store`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParseError` if `http` disbursement mode is selected
    /// without a base URL.
    pub fn assemble(
        store: Arc<InMemoryStore>,
        settings: &AppSettings,
        outcomes: Arc<dyn OutcomeGenerator>,
    ) -> PayrollResult<Self> {
        let integration = IntegrationService::new(store.clone(), outcomes);

        let client: Arc<dyn DisbursementClient> = match settings.disbursement.mode {
            DisbursementMode::Local => Arc::new(LocalDisbursementClient::new(integration.clone())),
            DisbursementMode::Http => {
                let base_url = settings.disbursement.base_url.as_deref().ok_or_else(|| {
                    PayrollError::ConfigParseError {
                        path: "settings.yaml".to_string(),
                        message: "disbursement.base_url is required when mode is http"
                            .to_string(),
                    }
                })?;
                Arc::new(HttpDisbursementClient::new(base_url))
            }
        };

        Ok(Self {
            payroll: PayrollService::new(store.clone(), store.clone()),
            submitter: Arc::new(BatchSubmitter::new(
                store.clone(),
                client,
                &settings.scheduler,
            )),
            payslips: PayslipBuilder::new(
                store.clone(),
                store.clone(),
                store.clone(),
                settings.payslip.storage_root.clone(),
            ),
            ytd: YtdAggregator::new(store.clone(), store),
            integration,
        })
    }

    /// Payroll calculation.
    pub fn payroll(&self) -> &PayrollService {
        &self.payroll
    }

    /// Receiving side of batch submissions.
    pub fn integration(&self) -> &IntegrationService {
        &self.integration
    }

    /// The batch submitter shared with the periodic loop.
    pub fn submitter(&self) -> Arc<BatchSubmitter> {
        self.submitter.clone()
    }

    /// Payslip generation.
    pub fn payslips(&self) -> &PayslipBuilder {
        &self.payslips
    }

    /// YTD summaries.
    pub fn ytd(&self) -> &YtdAggregator {
        &self.ytd
    }
}
