use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{KabukaError, Result};

// ---------------------------------------------------------------------------
// Interval — Bar granularity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1h")]
    OneHour,
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1wk")]
    OneWeek,
    #[serde(rename = "1mo")]
    OneMonth,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneHour => "1h",
            Interval::OneDay => "1d",
            Interval::OneWeek => "1wk",
            Interval::OneMonth => "1mo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = KabukaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1h" => Ok(Interval::OneHour),
            "1d" => Ok(Interval::OneDay),
            "1wk" => Ok(Interval::OneWeek),
            "1mo" => Ok(Interval::OneMonth),
            other => Err(KabukaError::InvalidArgument(format!(
                "Unknown interval '{}', expected one of 1h, 1d, 1wk, 1mo",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Period — Preset history spans understood by the provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::Max => "max",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "5d" => Period::FiveDays,
            "1mo" => Period::OneMonth,
            "3mo" => Period::ThreeMonths,
            "6mo" => Period::SixMonths,
            "1y" => Period::OneYear,
            "2y" => Period::TwoYears,
            "5y" => Period::FiveYears,
            "max" => Period::Max,
            _ => return None,
        })
    }
}

// ---------------------------------------------------------------------------
// HistoryRange — How much history to request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryRange {
    Preset(Period),
    /// Trailing calendar days ending now.
    Days(u32),
    /// Absolute dates, both inclusive.
    Between { start: NaiveDate, end: NaiveDate },
}

/// Longest trailing-days range accepted (100 years).
pub const MAX_DAYS: u32 = 36_500;

impl Default for HistoryRange {
    fn default() -> Self {
        HistoryRange::Preset(Period::OneYear)
    }
}

impl HistoryRange {
    /// Check the range is non-empty.
    pub fn validate(&self) -> Result<()> {
        match self {
            HistoryRange::Preset(_) => Ok(()),
            HistoryRange::Days(0) => Err(KabukaError::InvalidArgument(
                "Day count must be positive".into(),
            )),
            HistoryRange::Days(days) if *days > MAX_DAYS => Err(KabukaError::InvalidArgument(
                format!("Day count {} exceeds the maximum of {}", days, MAX_DAYS),
            )),
            HistoryRange::Days(_) => Ok(()),
            HistoryRange::Between { start, end } if start >= end => {
                Err(KabukaError::InvalidArgument(format!(
                    "Start date {} must be before end date {}",
                    start, end
                )))
            }
            HistoryRange::Between { .. } => Ok(()),
        }
    }

    /// Query-string parameters selecting this range, relative to `now`.
    pub fn query_params(&self, now: DateTime<Utc>) -> Result<Vec<(&'static str, String)>> {
        self.validate()?;
        let params = match self {
            HistoryRange::Preset(period) => vec![("range", period.as_str().to_string())],
            HistoryRange::Days(days) => {
                let from = Duration::try_days(i64::from(*days))
                    .and_then(|span| now.checked_sub_signed(span))
                    .ok_or_else(|| {
                        KabukaError::InvalidArgument(format!(
                            "Day count {} reaches outside the supported date range",
                            days
                        ))
                    })?;
                vec![
                    ("period1", from.timestamp().to_string()),
                    ("period2", now.timestamp().to_string()),
                ]
            }
            HistoryRange::Between { start, end } => {
                let from = start.and_hms_opt(0, 0, 0).map(|d| d.and_utc());
                let to = end
                    .succ_opt()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|d| d.and_utc());
                match (from, to) {
                    (Some(from), Some(to)) => vec![
                        ("period1", from.timestamp().to_string()),
                        ("period2", to.timestamp().to_string()),
                    ],
                    _ => {
                        return Err(KabukaError::InvalidArgument(format!(
                            "Date range {}..{} is out of bounds",
                            start, end
                        )))
                    }
                }
            }
        };
        Ok(params)
    }
}

impl FromStr for HistoryRange {
    type Err = KabukaError;

    /// Accepts a preset (`1y`), a day count (`30`), or `YYYY-MM-DD..YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(period) = Period::parse(s) {
            return Ok(HistoryRange::Preset(period));
        }
        if let Ok(days) = s.parse::<u32>() {
            let range = HistoryRange::Days(days);
            range.validate()?;
            return Ok(range);
        }
        if let Some((start, end)) = s.split_once("..") {
            let parse = |d: &str| {
                NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").map_err(|e| {
                    KabukaError::InvalidArgument(format!("Invalid date '{}': {}", d, e))
                })
            };
            let range = HistoryRange::Between {
                start: parse(start)?,
                end: parse(end)?,
            };
            range.validate()?;
            return Ok(range);
        }
        Err(KabukaError::InvalidArgument(format!(
            "Unknown history range '{}'",
            s
        )))
    }
}

// ---------------------------------------------------------------------------
// HistoryRequest — Range + interval, the unit of fetching and caching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub range: HistoryRange,
    pub interval: Interval,
}

impl HistoryRequest {
    pub fn new(range: HistoryRange, interval: Interval) -> Self {
        Self { range, interval }
    }

    /// Recent daily bars, enough to reach the previous session's close
    /// across weekends and holidays.
    pub fn recent_daily() -> Self {
        Self::new(HistoryRange::Preset(Period::FiveDays), Interval::OneDay)
    }
}
