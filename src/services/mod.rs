pub mod aggregator;
pub mod importer;
pub mod indicators;
pub mod store;

pub use aggregator::Aggregator;
pub use importer::import_csv;
pub use indicators::IndicatorCalculator;
pub use store::{BrandStats, MonthlyBucket, RecordStore, SqliteRecordStore, StoreStats};
