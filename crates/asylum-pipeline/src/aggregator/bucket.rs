//! Fixed-width multi-year period buckets.
//!
//! A year maps to exactly one bucket of a given width:
//! `start = floor(year / width) * width`, label `"<start>-<start + width - 1>"`.
//! Buckets of one width are contiguous and never overlap.

use crate::normalize::coerce_number;
use crate::utils::error::PeriodParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest year a cell may hold and still be bucketed
pub const MAX_YEAR: i64 = i32::MAX as i64;

/// A multi-year window such as 2015-2019
///
/// Ordered by start year, so sorting buckets sorts them chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PeriodBucket {
    start: i64,
    width: u32,
}

impl PeriodBucket {
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Last year in the bucket (inclusive)
    pub fn end(&self) -> i64 {
        self.start + i64::from(self.width) - 1
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

/// Bucket a year into a `width`-year window
///
/// Returns `None` for non-positive years, a zero width, or a window whose
/// end year does not fit in `i64`; callers skip the record instead of
/// producing a malformed label.
pub fn bucket(year: i64, width: u32) -> Option<PeriodBucket> {
    if year <= 0 || width == 0 {
        return None;
    }

    let width_years = i64::from(width);
    let start = year.div_euclid(width_years) * width_years;

    // `end()` is start + width - 1 and must stay representable
    start.checked_add(width_years - 1)?;

    Some(PeriodBucket { start, width })
}

/// Read a year cell
///
/// Uses the same coercion as any numeric cell; a fractional year floors to
/// its integer year. Zero, negative, non-numeric and absurdly large cells
/// (beyond `MAX_YEAR`) yield `None`.
pub fn parse_year(raw: Option<&str>) -> Option<i64> {
    let value = coerce_number(raw);
    if (1.0..=MAX_YEAR as f64).contains(&value) {
        Some(value.floor() as i64)
    } else {
        None
    }
}

impl fmt::Display for PeriodBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end())
    }
}

impl FromStr for PeriodBucket {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PeriodParseError {
            label: s.to_string(),
        };

        let (start, end) = s.trim().split_once('-').ok_or_else(err)?;
        let start: i64 = start.trim().parse().map_err(|_| err())?;
        let end: i64 = end.trim().parse().map_err(|_| err())?;

        if start <= 0 || end < start {
            return Err(err());
        }

        let width = u32::try_from(end - start + 1).map_err(|_| err())?;

        // Only aligned windows are real buckets
        match bucket(start, width) {
            Some(b) if b.start() == start => Ok(b),
            _ => Err(err()),
        }
    }
}

impl From<PeriodBucket> for String {
    fn from(bucket: PeriodBucket) -> Self {
        bucket.to_string()
    }
}

impl TryFrom<String> for PeriodBucket {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
