//! Fiscal calendar: Buddhist-Era fiscal years running October to September.

pub mod calendar;

pub use calendar::{FISCAL_MONTHS, FiscalError, FiscalYear, Quarter, month_index};
