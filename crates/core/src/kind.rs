//! Report kinds and reporting periods

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{CoreError, CoreResult};

/// Kind of financial report
///
/// # Examples
/// ```
/// use serf_core::ReportKind;
///
/// let kind: ReportKind = "sales".parse().unwrap();
/// assert_eq!(kind, ReportKind::Sales);
/// assert_eq!(kind.to_string(), "SALES");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ReportKind {
    Sales,
    Inventory,
    Consolidated,
    Monthly,
    Quarterly,
    Annual,
}

impl ReportKind {
    /// Returns true for the calendar-driven kinds (monthly, quarterly, annual)
    pub fn is_periodic(&self) -> bool {
        matches!(
            self,
            ReportKind::Monthly | ReportKind::Quarterly | ReportKind::Annual
        )
    }
}

/// Reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Period {
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    Year { year: i32 },
}

impl Period {
    /// Calendar month (1..=12)
    pub fn month(year: i32, month: u32) -> CoreResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidPeriod(format!(
                "month must be 1..=12, got {}",
                month
            )));
        }
        Ok(Period::Month { year, month })
    }

    /// Calendar quarter (1..=4)
    pub fn quarter(year: i32, quarter: u32) -> CoreResult<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(CoreError::InvalidPeriod(format!(
                "quarter must be 1..=4, got {}",
                quarter
            )));
        }
        Ok(Period::Quarter { year, quarter })
    }

    /// Whole calendar year
    pub fn year(year: i32) -> Self {
        Period::Year { year }
    }

    /// Year the period belongs to
    pub fn year_number(&self) -> i32 {
        match *self {
            Period::Month { year, .. } | Period::Quarter { year, .. } | Period::Year { year } => {
                year
            }
        }
    }

    /// Check if a date falls inside this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        if date.year() != self.year_number() {
            return false;
        }
        match *self {
            Period::Month { month, .. } => date.month() == month,
            Period::Quarter { quarter, .. } => (date.month() - 1) / 3 + 1 == quarter,
            Period::Year { .. } => true,
        }
    }

    /// Human label: `2025-10`, `Q4 2025`, `2025`
    pub fn label(&self) -> String {
        match *self {
            Period::Month { year, month } => format!("{}-{:02}", year, month),
            Period::Quarter { year, quarter } => format!("Q{} {}", quarter, year),
            Period::Year { year } => year.to_string(),
        }
    }

    /// Periodic report kind matching this window
    pub fn kind(&self) -> ReportKind {
        match self {
            Period::Month { .. } => ReportKind::Monthly,
            Period::Quarter { .. } => ReportKind::Quarterly,
            Period::Year { .. } => ReportKind::Annual,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
