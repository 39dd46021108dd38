//! Aggregate report to wire payload

use shared::{AggregateReport, SampleResult};

use crate::types::StatisticEntry;

/// Shapes an [`AggregateReport`] into the success payload: one entry per
/// worker in completion order, followed by the combined entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseAssembler {
    /// Decimal places for `stddev`; `None` leaves values untouched
    round_decimals: Option<u32>,
}

impl ResponseAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rounding(round_decimals: Option<u32>) -> Self {
        Self { round_decimals }
    }

    pub fn assemble(&self, report: &AggregateReport) -> Vec<StatisticEntry> {
        report
            .per_worker_results
            .iter()
            .chain(std::iter::once(&report.combined))
            .map(|sample| self.entry(sample))
            .collect()
    }

    fn entry(&self, sample: &SampleResult) -> StatisticEntry {
        StatisticEntry {
            stddev: self.round(sample.standard_deviation),
            data: sample.data.clone(),
        }
    }

    fn round(&self, value: f64) -> f64 {
        match self.round_decimals {
            Some(decimals) => {
                let factor = 10f64.powi(decimals as i32);
                (value * factor).round() / factor
            }
            None => value,
        }
    }
}
