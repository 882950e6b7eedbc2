use crate::constants::{
    ASSUMED_TOTAL_SHARES, CALENDAR_DAYS_PER_YEAR, TRADING_DAYS_PER_YEAR,
};
use crate::error::Result;
use crate::models::{DailyRecord, KeyIndicators, VolumeChange};
use crate::services::store::RecordStore;
use chrono::{Duration, NaiveDate};
use tracing::debug;

/// Service computing the key indicator set for a brand and date range
///
/// Queries the record source independently of the aggregator. Each of the
/// four indicators degrades to `None` on its own when the data is
/// insufficient; a store failure propagates as an error.
pub struct IndicatorCalculator;

impl IndicatorCalculator {
    pub async fn calculate<S: RecordStore>(
        store: &S,
        brand: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<KeyIndicators> {
        let records = store.query_range(brand, start, end).await?;

        let volatility = Self::annualized_volatility(&records);
        let market_value = Self::market_value(&records);
        let historical_return = Self::historical_return(&records, start, end);

        let volume_sum = store.sum_volume(brand, start, end).await?;
        let (trading_volume, volume_change) = if volume_sum > 0 {
            let yesterday = end - Duration::days(1);
            let prior_volume = store.sum_volume(brand, yesterday, yesterday).await?;
            let change = (prior_volume != 0).then(|| VolumeChange {
                change: volume_sum - prior_volume,
                pct: (volume_sum - prior_volume) as f64 / prior_volume as f64 * 100.0,
            });
            (Some(volume_sum), change)
        } else {
            (None, None)
        };

        debug!(
            brand,
            records = records.len(),
            volume_sum,
            "Calculated key indicators"
        );

        Ok(KeyIndicators {
            volatility,
            market_value,
            trading_volume,
            volume_change,
            historical_return,
        })
    }

    /// Population standard deviation of day-over-day simple returns,
    /// annualized by sqrt(252). Needs at least two records.
    fn annualized_volatility(records: &[DailyRecord]) -> Option<f64> {
        if records.len() < 2 {
            return None;
        }

        let returns: Vec<f64> = records
            .windows(2)
            .filter(|pair| pair[0].close != 0.0)
            .map(|pair| (pair[1].close - pair[0].close) / pair[0].close)
            .collect();

        if returns.is_empty() {
            return None;
        }

        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let variance = returns
            .iter()
            .map(|r| (r - mean).powi(2))
            .sum::<f64>()
            / returns.len() as f64;

        Some(variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt())
    }

    /// Assumed share count times the most recent close. A rough
    /// illustrative estimate, not a real market-cap calculation.
    fn market_value(records: &[DailyRecord]) -> Option<f64> {
        records.last().map(|r| r.close * ASSUMED_TOTAL_SHARES)
    }

    /// Simple return over the range annualized by 365 / days-in-range.
    /// Needs at least two records and a nonzero-day range.
    fn historical_return(records: &[DailyRecord], start: NaiveDate, end: NaiveDate) -> Option<f64> {
        if records.len() < 2 {
            return None;
        }

        let days = (end - start).num_days();
        if days == 0 {
            return None;
        }

        let first_close = records.first()?.close;
        let last_close = records.last()?.close;
        if first_close == 0.0 {
            return None;
        }

        let simple_return = last_close / first_close - 1.0;
        Some(simple_return * (CALENDAR_DAYS_PER_YEAR / days as f64))
    }
}
