//! Creation-date inference from the production timespan.
//!
//! The source stores unknown days and months as `1`, which is also a real
//! day/month. The free-text descriptive date is the only evidence for telling
//! the two apart:
//! - a day of 1 is real when the text starts with "1." ("1. mai 1870"),
//! - a month of 1 is real when the text mentions "januar".

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::NormalizeError;

const REAL_FIRST_DAY_PREFIX: &str = "1.";
const JANUARY: &str = "januar";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Best supported creation date of an artwork.
///
/// Ranges carry one granularity for both ends by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationDate {
    Day(NaiveDate),
    Month(YearMonth),
    Year(i32),
    MonthRange { start: YearMonth, end: YearMonth },
    YearRange { start: i32, end: i32 },
    /// No structured timestamps; the cataloguer's own wording.
    Descriptive(String),
}

impl CreationDate {
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            CreationDate::MonthRange { .. } | CreationDate::YearRange { .. }
        )
    }

    pub fn granularity(&self) -> &'static str {
        match self {
            CreationDate::Day(_) => "day",
            CreationDate::Month(_) | CreationDate::MonthRange { .. } => "month",
            CreationDate::Year(_) | CreationDate::YearRange { .. } => "year",
            CreationDate::Descriptive(_) => "free_text",
        }
    }
}

impl Serialize for CreationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("exact", &!self.is_range())?;
        map.serialize_entry("granularity", self.granularity())?;
        match self {
            CreationDate::Day(d) => map.serialize_entry("value", &d.format("%Y-%m-%d").to_string())?,
            CreationDate::Month(ym) => map.serialize_entry("value", &ym.to_string())?,
            CreationDate::Year(y) => map.serialize_entry("value", &format!("{:04}", y))?,
            CreationDate::Descriptive(text) => map.serialize_entry("value", text)?,
            CreationDate::MonthRange { start, end } => {
                map.serialize_entry("start", &start.to_string())?;
                map.serialize_entry("end", &end.to_string())?;
            }
            CreationDate::YearRange { start, end } => {
                map.serialize_entry("start", &format!("{:04}", start))?;
                map.serialize_entry("end", &format!("{:04}", end))?;
            }
        }
        map.end()
    }
}

/// What the two timestamps and the descriptive text say about precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Precision {
    day_is_null: bool,
    month_is_null: bool,
    day_is_precise: bool,
    month_is_precise: bool,
    year_is_precise: bool,
}

impl Precision {
    fn assess(from: NaiveDate, to: NaiveDate, descriptive: &str) -> Self {
        let day_is_null =
            from.day() == 1 && to.day() == 1 && !descriptive.starts_with(REAL_FIRST_DAY_PREFIX);
        // a known day implies a known month
        let month_is_null = from.month() == 1
            && to.month() == 1
            && day_is_null
            && !descriptive.to_lowercase().contains(JANUARY);

        Precision {
            day_is_null,
            month_is_null,
            day_is_precise: from.day() == to.day() && !day_is_null,
            month_is_precise: from.month() == to.month() && !month_is_null,
            year_is_precise: from.year() == to.year(),
        }
    }
}

/// Infer the creation date from already-normalized `from_date`, `to_date`
/// (`YYYY-MM-DD`) and `descriptive_date`.
///
/// Returns `Ok(None)` when there is nothing at all to go on.
pub fn resolve(
    from: Option<&str>,
    to: Option<&str>,
    descriptive: Option<&str>,
) -> Result<Option<CreationDate>, NormalizeError> {
    let (from_raw, to_raw) = match (from, to) {
        (None, None) => {
            return Ok(descriptive.map(|d| {
                CreationDate::Descriptive(d.trim_matches(|c: char| c == '(' || c == ')').to_string())
            }))
        }
        (Some(f), Some(t)) => (f, t),
        _ => return Err(NormalizeError::IncompleteDateRange),
    };

    let from = parse_date(from_raw)?;
    let to = parse_date(to_raw)?;
    let descriptive = descriptive.unwrap_or_default();
    let p = Precision::assess(from, to, descriptive);

    let date = if p.day_is_precise && p.month_is_precise && p.year_is_precise {
        CreationDate::Day(to)
    } else if p.month_is_precise && p.year_is_precise {
        CreationDate::Month(YearMonth::of(to))
    } else if !p.month_is_precise && !p.month_is_null && p.day_is_null && p.year_is_precise {
        CreationDate::MonthRange {
            start: YearMonth::of(from),
            end: YearMonth::of(to),
        }
    } else if p.year_is_precise && p.month_is_null && p.day_is_null {
        CreationDate::Year(to.year())
    } else if !p.year_is_precise {
        CreationDate::YearRange {
            start: from.year(),
            end: to.year(),
        }
    } else {
        // same year, different months, real days
        return Err(NormalizeError::AmbiguousDatePrecision {
            from: from_raw.to_string(),
            to: to_raw.to_string(),
            descriptive: descriptive.to_string(),
        });
    };

    Ok(Some(date))
}

fn parse_date(raw: &str) -> Result<NaiveDate, NormalizeError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| NormalizeError::MalformedDate(raw.to_string()))
}
