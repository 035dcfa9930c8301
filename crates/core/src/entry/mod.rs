//! Actual entry recording and listing.
//!
//! Entries are append-only; corrections are booked as new entries.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::EntryError;
pub use service::ActualEntryService;
pub use types::{EntryListQuery, NewActualEntry};
