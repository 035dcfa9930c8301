//! Plan vs actual metrics and status classification.

pub mod aggregator;
pub mod variance;

#[cfg(test)]
mod tests;

pub use aggregator::{History, MetricAggregator, NodeFigures};
pub use variance::{FinancialMetrics, VarianceStatus, amount_or_zero, exact_percent, percent_of};
