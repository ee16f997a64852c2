//! Extremum-and-moment aggregation.
//!
//! This module provides the per-metric accumulators: each one collects the
//! value sequence for mean/standard deviation and tracks the running
//! max/min with tie accumulation, in a single pass over the records.

use serde::Serialize;
use thiserror::Error;

/// Errors raised during aggregation.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A metric's value sequence was empty; the statistics are undefined
    /// and must not be defaulted to zero or NaN.
    #[error("no values to aggregate for metric `{metric}`")]
    EmptyInput {
        /// Name of the metric with no values.
        metric: String,
    },
}

impl AnalysisError {
    fn empty(metric: &str) -> Self {
        AnalysisError::EmptyInput {
            metric: metric.to_string(),
        }
    }
}

/// Arithmetic mean of a value sequence.
pub fn mean(metric: &str, values: &[f64]) -> Result<f64, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::empty(metric));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divisor N, not N-1).
pub fn std_dev(metric: &str, values: &[f64]) -> Result<f64, AnalysisError> {
    let mean = mean(metric, values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Ok(variance.sqrt())
}

/// Which end of the ordering an extremum tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Max,
    Min,
}

/// Running extremum state with tie accumulation.
///
/// A strictly better candidate replaces the holder list with a singleton;
/// an exactly equal candidate appends, preserving first-seen order; a
/// worse candidate leaves the state unchanged.
#[derive(Debug, Clone)]
pub struct Extremum {
    direction: Direction,
    value: f64,
    holders: Vec<String>,
}

impl Extremum {
    /// Start tracking a maximum.
    pub fn max() -> Self {
        Self {
            direction: Direction::Max,
            value: f64::NEG_INFINITY,
            holders: Vec::new(),
        }
    }

    /// Start tracking a minimum.
    pub fn min() -> Self {
        Self {
            direction: Direction::Min,
            value: f64::INFINITY,
            holders: Vec::new(),
        }
    }

    /// Offer a candidate value for the named record.
    pub fn observe(&mut self, value: f64, name: &str) {
        let better = match self.direction {
            Direction::Max => value > self.value,
            Direction::Min => value < self.value,
        };
        if better {
            self.value = value;
            self.holders.clear();
            self.holders.push(name.to_string());
        } else if value == self.value {
            self.holders.push(name.to_string());
        }
    }

    /// Finalize into an [`ExtremumSet`]; fails if nothing was observed.
    pub fn into_set(self, metric: &str) -> Result<ExtremumSet, AnalysisError> {
        if self.holders.is_empty() {
            return Err(AnalysisError::empty(metric));
        }
        Ok(ExtremumSet {
            value: self.value,
            holders: self.holders,
        })
    }
}

/// A tracked extreme value and every record tied for it, in first-seen
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremumSet {
    /// The extreme value.
    pub value: f64,
    /// Names of every record whose value equals `value`.
    pub holders: Vec<String>,
}

/// Per-metric accumulator: the value sequence for the moments plus the
/// running max and min.
#[derive(Debug, Clone)]
pub struct MetricAccumulator {
    metric: String,
    values: Vec<f64>,
    max: Extremum,
    min: Extremum,
}

impl MetricAccumulator {
    /// Create an empty accumulator for the named metric.
    pub fn new(metric: &str) -> Self {
        Self {
            metric: metric.to_string(),
            values: Vec::new(),
            max: Extremum::max(),
            min: Extremum::min(),
        }
    }

    /// Fold one record's value into the accumulator.
    pub fn observe(&mut self, value: f64, name: &str) {
        self.values.push(value);
        self.max.observe(value, name);
        self.min.observe(value, name);
    }

    /// Finalize into a [`MetricSummary`].
    pub fn summarize(self) -> Result<MetricSummary, AnalysisError> {
        let mean = mean(&self.metric, &self.values)?;
        let std_dev = std_dev(&self.metric, &self.values)?;
        Ok(MetricSummary {
            count: self.values.len(),
            mean,
            std_dev,
            max: self.max.into_set(&self.metric)?,
            min: self.min.into_set(&self.metric)?,
            metric: self.metric,
        })
    }
}

/// Summary statistics for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    /// Metric name.
    pub metric: String,
    /// Number of values aggregated.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// The maximum and its holders.
    pub max: ExtremumSet,
    /// The minimum and its holders.
    pub min: ExtremumSet,
}

/// Accumulator for metrics whose extrema ignore zero values.
///
/// Exact zeros are diverted into a separate zero-holders list and never
/// enter the comparator logic; the zero-inclusive mean/stddev and the
/// zero-exclusive statistics coexist in the summary.
#[derive(Debug, Clone)]
pub struct NonZeroMetricAccumulator {
    metric: String,
    all_values: Vec<f64>,
    nonzero_values: Vec<f64>,
    max: Extremum,
    min: Extremum,
    zero_holders: Vec<String>,
}

impl NonZeroMetricAccumulator {
    /// Create an empty accumulator for the named metric.
    pub fn new(metric: &str) -> Self {
        Self {
            metric: metric.to_string(),
            all_values: Vec::new(),
            nonzero_values: Vec::new(),
            max: Extremum::max(),
            min: Extremum::min(),
            zero_holders: Vec::new(),
        }
    }

    /// Fold one record's value into the accumulator.
    pub fn observe(&mut self, value: f64, name: &str) {
        self.all_values.push(value);
        if value == 0.0 {
            self.zero_holders.push(name.to_string());
        } else {
            self.nonzero_values.push(value);
            self.max.observe(value, name);
            self.min.observe(value, name);
        }
    }

    /// Finalize into a [`NonZeroMetricSummary`].
    pub fn summarize(self) -> Result<NonZeroMetricSummary, AnalysisError> {
        let nonzero_metric = format!("{} (non-zero)", self.metric);
        Ok(NonZeroMetricSummary {
            count: self.all_values.len(),
            mean: mean(&self.metric, &self.all_values)?,
            std_dev: std_dev(&self.metric, &self.all_values)?,
            nonzero_count: self.nonzero_values.len(),
            nonzero_mean: mean(&nonzero_metric, &self.nonzero_values)?,
            nonzero_std_dev: std_dev(&nonzero_metric, &self.nonzero_values)?,
            max: self.max.into_set(&nonzero_metric)?,
            least_nonzero: self.min.into_set(&nonzero_metric)?,
            zero_holders: self.zero_holders,
            metric: self.metric,
        })
    }
}

/// Summary statistics for a metric with zero-exclusion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonZeroMetricSummary {
    /// Metric name.
    pub metric: String,
    /// Number of values aggregated, zeros included.
    pub count: usize,
    /// Zero-inclusive arithmetic mean.
    pub mean: f64,
    /// Zero-inclusive population standard deviation.
    pub std_dev: f64,
    /// Number of non-zero values.
    pub nonzero_count: usize,
    /// Mean over non-zero values only.
    pub nonzero_mean: f64,
    /// Population standard deviation over non-zero values only.
    pub nonzero_std_dev: f64,
    /// The maximum over non-zero values and its holders.
    pub max: ExtremumSet,
    /// The least non-zero value and its holders.
    pub least_nonzero: ExtremumSet,
    /// Names of records whose value was exactly zero, in first-seen order.
    pub zero_holders: Vec<String>,
}
