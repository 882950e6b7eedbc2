use crate::constants::{
    DEFAULT_BRAND, MONTH_WINDOW_DAYS, WEEK_WINDOW_DAYS, YEAR_WINDOW_DAYS,
};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Period kind selected by the week/month/year request flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    /// Lookback window length in days
    pub fn window_days(&self) -> i64 {
        match self {
            Period::Week => WEEK_WINDOW_DAYS,
            Period::Month => MONTH_WINDOW_DAYS,
            Period::Year => YEAR_WINDOW_DAYS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw request fields shared by the GET and POST entry points
///
/// The period flags are kept as loose JSON values so the same struct
/// deserializes from a query string (where everything is a string) and a
/// JSON body (where clients usually send numbers). Malformed values are
/// handled during resolution, not at deserialization time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMarketQuery {
    pub brand: Option<String>,
    pub week: Option<Value>,
    pub month: Option<Value>,
    pub year: Option<Value>,
}

/// Resolved request parameters: brand, period kind, and date window
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSelection {
    pub brand: String,
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PeriodSelection {
    /// Resolve raw request fields into a concrete selection.
    ///
    /// Brand is trimmed and falls back to the default when blank. The
    /// week/month/year flags default to 1/0/0; if any present flag is not
    /// an integer, all three reset to their defaults (brand is unaffected).
    /// Period priority is year > month > week.
    ///
    /// `today` is injected so the computation stays deterministic in tests.
    pub fn resolve(raw: &RawMarketQuery, today: NaiveDate) -> Self {
        let brand = raw
            .brand
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_BRAND)
            .to_string();

        // The week flag only matters as the fallback, so its value is
        // never inspected beyond parse success.
        let (_week, month, year) = match (
            parse_flag(raw.week.as_ref(), 1),
            parse_flag(raw.month.as_ref(), 0),
            parse_flag(raw.year.as_ref(), 0),
        ) {
            (Some(w), Some(m), Some(y)) => (w, m, y),
            _ => (1, 0, 0),
        };

        let period = if year == 1 {
            Period::Year
        } else if month == 1 {
            Period::Month
        } else {
            Period::Week
        };

        PeriodSelection {
            brand,
            period,
            start_date: today - Duration::days(period.window_days()),
            end_date: today,
        }
    }
}

/// Parse a period flag that may arrive as a JSON number or string.
///
/// Missing values take the given default; present but non-integer values
/// return None so the caller can reset the whole flag set.
fn parse_flag(value: Option<&Value>, default: i64) -> Option<i64> {
    match value {
        None | Some(Value::Null) => Some(default),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    }
}
