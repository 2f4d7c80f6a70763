//! Batch submission to the disbursement system.
//!
//! - [`BatchSubmitter`] picks up unsubmitted payroll runs on a schedule and
//!   sends them as one batch per tick.
//! - [`DisbursementClient`] is the seam to the receiving side, either
//!   in-process ([`LocalDisbursementClient`]) or over HTTP.
//! - [`IntegrationService`] is the receiving side: it records batches and
//!   their per-employee logs.

mod disbursement;
mod integration;
mod outcome;
mod policy;
mod scheduler;

pub use disbursement::{
    DisbursementClient, HttpDisbursementClient, LocalDisbursementClient, SUBMIT_PATH,
};
pub use integration::{
    BatchStatusView, DEFAULT_LOG_PAGE_SIZE, DisbursementRequest, DisbursementResponse,
    IntegrationService, MAX_LOG_PAGE_SIZE,
};
pub use outcome::{FixedOutcome, OutcomeGenerator, RandomOutcomeGenerator, ScriptedOutcomes};
pub use policy::SubmissionPolicy;
pub use scheduler::{BatchSubmitter, TickReport, new_batch_id};
