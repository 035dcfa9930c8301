//! Fiscal year and month ordering.
//!
//! Fiscal year `N` (Buddhist Era) covers October of CE year `N - 544` through
//! September of CE year `N - 543`. Every monthly series is emitted in
//! [`FISCAL_MONTHS`] order, never in calendar order.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Offset between the Buddhist Era and the Common Era.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Month numbers in fiscal order (October first).
pub const FISCAL_MONTHS: [u32; 12] = [10, 11, 12, 1, 2, 3, 4, 5, 6, 7, 8, 9];

const MIN_YEAR: i32 = 2400;
const MAX_YEAR: i32 = 2800;

/// Errors raised for malformed fiscal inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FiscalError {
    /// Year outside the supported Buddhist-Era range.
    #[error("Fiscal year {0} is outside 2400..=2800 (Buddhist Era)")]
    YearOutOfRange(i32),

    /// Month outside 1..=12.
    #[error("Month {0} is outside 1..=12")]
    InvalidMonth(u32),
}

/// A fiscal year labelled in the Buddhist Era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct FiscalYear(i32);

impl FiscalYear {
    /// Creates a fiscal year after range-checking it.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::YearOutOfRange` for years outside 2400..=2800.
    pub const fn new(year: i32) -> Result<Self, FiscalError> {
        if year < MIN_YEAR || year > MAX_YEAR {
            return Err(FiscalError::YearOutOfRange(year));
        }
        Ok(Self(year))
    }

    /// Returns the Buddhist-Era label.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// The year before this one.
    #[must_use]
    pub const fn previous(self) -> Self {
        self.offset(-1)
    }

    /// The year after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        self.offset(1)
    }

    /// Shifts by `years`. Historical look-backs may step outside the accepted
    /// input range; they simply find no data.
    #[must_use]
    pub const fn offset(self, years: i32) -> Self {
        Self(self.0 + years)
    }

    /// Month numbers of this year in fiscal order.
    #[must_use]
    pub const fn months(self) -> [u32; 12] {
        FISCAL_MONTHS
    }

    /// Common-Era calendar year in which `month` of this fiscal year falls.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidMonth` for months outside 1..=12.
    pub const fn calendar_year_ce(self, month: u32) -> Result<i32, FiscalError> {
        match month {
            10..=12 => Ok(self.0 - BUDDHIST_ERA_OFFSET - 1),
            1..=9 => Ok(self.0 - BUDDHIST_ERA_OFFSET),
            _ => Err(FiscalError::InvalidMonth(month)),
        }
    }

    /// Fiscal year containing a calendar date.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::YearOutOfRange` for dates far outside the supported range.
    pub fn from_date(date: NaiveDate) -> Result<Self, FiscalError> {
        let ce = if date.month() >= 10 {
            date.year() + 1
        } else {
            date.year()
        };
        Self::new(ce + BUDDHIST_ERA_OFFSET)
    }
}

impl TryFrom<i32> for FiscalYear {
    type Error = FiscalError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FiscalYear> for i32 {
    fn from(year: FiscalYear) -> Self {
        year.0
    }
}

impl std::fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY{}", self.0)
    }
}

/// Position of `month` in fiscal order (October = 0, September = 11).
///
/// # Errors
///
/// Returns `FiscalError::InvalidMonth` for months outside 1..=12.
pub const fn month_index(month: u32) -> Result<usize, FiscalError> {
    match month {
        10..=12 => Ok((month - 10) as usize),
        1..=9 => Ok((month + 2) as usize),
        _ => Err(FiscalError::InvalidMonth(month)),
    }
}

/// Fiscal quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// October, November, December.
    Q1,
    /// January, February, March.
    Q2,
    /// April, May, June.
    Q3,
    /// July, August, September.
    Q4,
}

impl Quarter {
    /// All quarters in fiscal order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Quarter containing `month`.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidMonth` for months outside 1..=12.
    pub const fn of_month(month: u32) -> Result<Self, FiscalError> {
        match month_index(month) {
            Ok(0..=2) => Ok(Self::Q1),
            Ok(3..=5) => Ok(Self::Q2),
            Ok(6..=8) => Ok(Self::Q3),
            Ok(_) => Ok(Self::Q4),
            Err(e) => Err(e),
        }
    }

    /// The three months of this quarter in fiscal order.
    #[must_use]
    pub const fn months(self) -> [u32; 3] {
        match self {
            Self::Q1 => [10, 11, 12],
            Self::Q2 => [1, 2, 3],
            Self::Q3 => [4, 5, 6],
            Self::Q4 => [7, 8, 9],
        }
    }
}
