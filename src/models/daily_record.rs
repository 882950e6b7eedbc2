use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of trading data for a brand
///
/// Records are immutable inputs to the aggregation component. The store
/// enforces at most one record per (brand, date).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailyRecord {
    /// Brand name, the grouping key for all queries
    pub brand: String,

    /// Trading date (unique per brand)
    pub date: NaiveDate,

    /// Opening price
    pub open: f64,

    /// Closing price
    pub close: f64,

    /// Highest price of the day
    pub high: f64,

    /// Lowest price of the day
    pub low: f64,

    /// Trading volume (number of shares)
    pub volume: i64,

    /// Monetary turnover
    pub turnover: f64,

    /// Intraday amplitude (%)
    pub amplitude: f64,

    /// Change from previous close (%)
    pub change_pct: f64,

    /// Change from previous close (absolute)
    pub change_amt: f64,

    /// Turnover rate (%)
    pub turnover_rate: f64,
}

impl DailyRecord {
    /// Create a record with only the OHLCV fields set; the derived
    /// percentage fields default to zero. Mostly useful in tests.
    pub fn new(
        brand: impl Into<String>,
        date: NaiveDate,
        open: f64,
        close: f64,
        high: f64,
        low: f64,
        volume: i64,
    ) -> Self {
        Self {
            brand: brand.into(),
            date,
            open,
            close,
            high,
            low,
            volume,
            turnover: 0.0,
            amplitude: 0.0,
            change_pct: 0.0,
            change_amt: 0.0,
            turnover_rate: 0.0,
        }
    }
}
