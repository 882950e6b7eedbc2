use crate::error::Result;
use crate::models::{AggregatedPoint, Period};
use crate::services::store::RecordStore;
use chrono::NaiveDate;
use tracing::debug;

/// Service for aggregating daily records into the response series
pub struct Aggregator;

impl Aggregator {
    /// Aggregate a brand's records over an inclusive date range.
    ///
    /// Week and month periods return the daily records verbatim, one point
    /// per record in ascending date order. The year period returns one
    /// calendar-month rollup per (year, month) bucket, labeled with the
    /// bucket's earliest date as `YYYY-MM`.
    ///
    /// An empty query result yields an empty vector, never an error.
    pub async fn aggregate<S: RecordStore>(
        store: &S,
        brand: &str,
        period: Period,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AggregatedPoint>> {
        let points: Vec<AggregatedPoint> = match period {
            Period::Week | Period::Month => {
                let records = store.query_range(brand, start, end).await?;
                records
                    .into_iter()
                    .map(|r| AggregatedPoint {
                        date: r.date.format("%Y-%m-%d").to_string(),
                        open: r.open,
                        close: r.close,
                        high: r.high,
                        low: r.low,
                        volume: r.volume,
                    })
                    .collect()
            }
            Period::Year => {
                let buckets = store.query_monthly_groups(brand, start, end).await?;
                buckets
                    .into_iter()
                    .map(|b| AggregatedPoint {
                        date: b.first_date.format("%Y-%m").to_string(),
                        open: b.open,
                        close: b.close,
                        high: b.high,
                        low: b.low,
                        volume: b.volume,
                    })
                    .collect()
            }
        };

        debug!(brand, period = %period, points = points.len(), "Aggregated records");
        Ok(points)
    }
}
