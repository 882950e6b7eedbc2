use serde::Serialize;

/// One point of the aggregated response series
///
/// For week/month periods this is a verbatim daily record with `date` in
/// `YYYY-MM-DD` format. For the year period it is a calendar-month rollup
/// labeled `YYYY-MM`, with open = min of opens, close = max of closes,
/// high = max of highs, low = min of lows, volume = sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedPoint {
    pub date: String,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: i64,
}
