use crate::error::Result;
use crate::models::DailyRecord;
use crate::services::store::SqliteRecordStore;
use csv::Reader;
use std::path::Path;
use tracing::info;

/// Load daily records from a CSV file into the store.
///
/// Expected header:
/// `brand,date,open,close,high,low,volume,turnover,amplitude,change_pct,change_amt,turnover_rate`
/// with dates in `YYYY-MM-DD` format. Existing rows for the same
/// (brand, date) are replaced.
///
/// Returns the number of records imported.
pub async fn import_csv(store: &SqliteRecordStore, input_path: &Path) -> Result<usize> {
    let mut reader = Reader::from_path(input_path)?;

    let mut records = Vec::new();
    for result in reader.deserialize::<DailyRecord>() {
        records.push(result?);
    }

    let count = store.upsert_records(&records).await?;
    info!(count, path = %input_path.display(), "Imported daily records");
    Ok(count)
}
