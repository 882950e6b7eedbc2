mod aggregated_point;
mod daily_record;
mod indicators;
mod period;

pub use aggregated_point::AggregatedPoint;
pub use daily_record::DailyRecord;
pub use indicators::{KeyIndicators, KeyIndicatorsResponse, VolumeChange};
pub use period::{Period, PeriodSelection, RawMarketQuery};
