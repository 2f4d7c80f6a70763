//! Year-to-date summaries.

use std::sync::Arc;

use tracing::debug;

use crate::calculation::summarize_year;
use crate::error::{PayrollError, PayrollResult};
use crate::models::YtdSummary;
use crate::store::{EmployeeDirectory, PayslipStore};

use super::require_listed_employee;

/// Folds a year of stored payslips into a [`YtdSummary`].
#[derive(Clone)]
pub struct YtdAggregator {
    directory: Arc<dyn EmployeeDirectory>,
    payslips: Arc<dyn PayslipStore>,
}

impl YtdAggregator {
    /// Creates an aggregator over the given stores.
    pub fn new(directory: Arc<dyn EmployeeDirectory>, payslips: Arc<dyn PayslipStore>) -> Self {
        Self {
            directory,
            payslips,
        }
    }

    /// Summarizes `employee_id`'s payslips for `year`. A year without
    /// payslips yields an all-zero summary.
    pub async fn get_ytd(&self, employee_id: &str, year: i32) -> PayrollResult<YtdSummary> {
        if !(1..=9999).contains(&year) {
            return Err(PayrollError::InvalidInput {
                field: "year".to_string(),
                message: format!("{} is not between 1 and 9999", year),
            });
        }
        require_listed_employee(self.directory.as_ref(), employee_id).await?;

        let payslips = self
            .payslips
            .find_payslips_for_year(employee_id, year)
            .await?;
        debug!(employee_id, year, payslips = payslips.len(), "Aggregating YTD");

        Ok(summarize_year(employee_id, year, &payslips))
    }
}
