use crate::error::{AppError, Result};
use crate::models::DailyRecord;
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteConnectOptions, Row, SqlitePool};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Per-(year, month) rollup row produced by the grouped query
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    /// Earliest trading date in the bucket
    pub first_date: NaiveDate,
    /// Minimum of opens in the bucket
    pub open: f64,
    /// Maximum of closes in the bucket
    pub close: f64,
    /// Maximum of highs in the bucket
    pub high: f64,
    /// Minimum of lows in the bucket
    pub low: f64,
    /// Sum of volumes in the bucket
    pub volume: i64,
}

/// Read-side query capability over the daily record collection
///
/// The aggregation and indicator services depend on this trait rather than
/// a concrete storage engine. All date ranges are inclusive on both ends.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// All records for a brand within the range, ordered by date ascending
    async fn query_range(
        &self,
        brand: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>>;

    /// Calendar-month rollups for a brand within the range, ordered by
    /// (year, month) ascending
    async fn query_monthly_groups(
        &self,
        brand: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MonthlyBucket>>;

    /// Total volume for a brand within the range (0 when no rows match)
    async fn sum_volume(&self, brand: &str, start: NaiveDate, end: NaiveDate) -> Result<i64>;
}

/// SQLite-backed record store
#[derive(Debug)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Open (or create) the database at the given path
    pub async fn new(database_path: PathBuf) -> Result<Self> {
        info!("Opening SQLite database at: {:?}", database_path);

        if let Some(parent) = database_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let connect_options = SqliteConnectOptions::new()
            .filename(&database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(30))
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(connect_options).await?;

        let store = Self { pool };
        store.initialize_schema().await?;

        Ok(store)
    }

    async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS daily_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                brand TEXT NOT NULL,
                date DATE NOT NULL,
                open REAL NOT NULL,
                close REAL NOT NULL,
                high REAL NOT NULL,
                low REAL NOT NULL,
                volume INTEGER NOT NULL,
                turnover REAL NOT NULL DEFAULT 0,
                amplitude REAL NOT NULL DEFAULT 0,
                change_pct REAL NOT NULL DEFAULT 0,
                change_amt REAL NOT NULL DEFAULT 0,
                turnover_rate REAL NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // One record per (brand, date); the primary query pattern is
        // brand + date range.
        let indexes = [
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_daily_records_brand_date ON daily_records(brand, date)",
            "CREATE INDEX IF NOT EXISTS idx_daily_records_date ON daily_records(date)",
        ];
        for index in indexes {
            sqlx::query(index).execute(&self.pool).await?;
        }

        info!("Database schema initialized");
        Ok(())
    }

    /// Insert records, replacing any existing row for the same (brand, date)
    pub async fn upsert_records(&self, records: &[DailyRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut transaction = self.pool.begin().await?;
        let mut affected = 0usize;

        for record in records {
            let result = sqlx::query(
                r#"
                INSERT OR REPLACE INTO daily_records
                (brand, date, open, close, high, low, volume,
                 turnover, amplitude, change_pct, change_amt, turnover_rate)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                "#,
            )
            .bind(&record.brand)
            .bind(record.date)
            .bind(record.open)
            .bind(record.close)
            .bind(record.high)
            .bind(record.low)
            .bind(record.volume)
            .bind(record.turnover)
            .bind(record.amplitude)
            .bind(record.change_pct)
            .bind(record.change_amt)
            .bind(record.turnover_rate)
            .execute(&mut *transaction)
            .await?;

            affected += result.rows_affected() as usize;
        }

        transaction.commit().await?;
        Ok(affected)
    }

    /// Store-wide statistics for the status command and health endpoint
    pub async fn stats(&self) -> Result<StoreStats> {
        let total_records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM daily_records")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(
            r#"
            SELECT brand, COUNT(*) AS records, MIN(date) AS first_date, MAX(date) AS last_date
            FROM daily_records
            GROUP BY brand
            ORDER BY brand
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut brands = Vec::with_capacity(rows.len());
        for row in rows {
            brands.push(BrandStats {
                brand: row.try_get("brand").map_err(db_err)?,
                records: row.try_get("records").map_err(db_err)?,
                first_date: row.try_get("first_date").map_err(db_err)?,
                last_date: row.try_get("last_date").map_err(db_err)?,
            });
        }

        Ok(StoreStats {
            total_records,
            brands,
        })
    }

    /// Close the connection pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl RecordStore for SqliteRecordStore {
    async fn query_range(
        &self,
        brand: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>> {
        let records = sqlx::query_as::<_, DailyRecord>(
            r#"
            SELECT brand, date, open, close, high, low, volume,
                   turnover, amplitude, change_pct, change_amt, turnover_rate
            FROM daily_records
            WHERE brand = ?1 AND date >= ?2 AND date <= ?3
            ORDER BY date ASC
            "#,
        )
        .bind(brand)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn query_monthly_groups(
        &self,
        brand: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MonthlyBucket>> {
        let rows = sqlx::query(
            r#"
            SELECT MIN(date) AS first_date,
                   MIN(open) AS open,
                   MAX(close) AS close,
                   MAX(high) AS high,
                   MIN(low) AS low,
                   SUM(volume) AS volume
            FROM daily_records
            WHERE brand = ?1 AND date >= ?2 AND date <= ?3
            GROUP BY strftime('%Y-%m', date)
            ORDER BY strftime('%Y-%m', date) ASC
            "#,
        )
        .bind(brand)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        let mut buckets = Vec::with_capacity(rows.len());
        for row in rows {
            buckets.push(MonthlyBucket {
                first_date: row.try_get("first_date").map_err(db_err)?,
                open: row.try_get("open").map_err(db_err)?,
                close: row.try_get("close").map_err(db_err)?,
                high: row.try_get("high").map_err(db_err)?,
                low: row.try_get("low").map_err(db_err)?,
                volume: row.try_get("volume").map_err(db_err)?,
            });
        }

        Ok(buckets)
    }

    async fn sum_volume(&self, brand: &str, start: NaiveDate, end: NaiveDate) -> Result<i64> {
        let sum: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(volume), 0) FROM daily_records
             WHERE brand = ?1 AND date >= ?2 AND date <= ?3",
        )
        .bind(brand)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(sum)
    }
}

/// Store-wide statistics
#[derive(Debug)]
pub struct StoreStats {
    pub total_records: i64,
    pub brands: Vec<BrandStats>,
}

/// Per-brand record count and date coverage
#[derive(Debug)]
pub struct BrandStats {
    pub brand: String,
    pub records: i64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

fn db_err(err: sqlx::Error) -> AppError {
    AppError::Database(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn test_store() -> (tempfile::TempDir, SqliteRecordStore) {
        let temp_dir = tempdir().unwrap();
        let store = SqliteRecordStore::new(temp_dir.path().join("test.db"))
            .await
            .unwrap();
        (temp_dir, store)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_and_query_range_ordering() {
        let (_dir, store) = test_store().await;

        // Insert out of order; query must come back ascending
        let records = vec![
            DailyRecord::new("Apple", date(2025, 3, 5), 101.0, 102.0, 103.0, 100.0, 500),
            DailyRecord::new("Apple", date(2025, 3, 3), 99.0, 100.0, 101.0, 98.0, 300),
            DailyRecord::new("Apple", date(2025, 3, 4), 100.0, 101.0, 102.0, 99.0, 400),
            DailyRecord::new("Tesla", date(2025, 3, 4), 200.0, 201.0, 202.0, 199.0, 900),
        ];
        assert_eq!(store.upsert_records(&records).await.unwrap(), 4);

        let result = store
            .query_range("Apple", date(2025, 3, 1), date(2025, 3, 31))
            .await
            .unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].date, date(2025, 3, 3));
        assert_eq!(result[2].date, date(2025, 3, 5));
        assert!(result.iter().all(|r| r.brand == "Apple"));
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_brand_date() {
        let (_dir, store) = test_store().await;

        let first = DailyRecord::new("Apple", date(2025, 3, 3), 99.0, 100.0, 101.0, 98.0, 300);
        let mut second = first.clone();
        second.close = 150.0;

        store.upsert_records(&[first]).await.unwrap();
        store.upsert_records(&[second]).await.unwrap();

        let result = store
            .query_range("Apple", date(2025, 3, 3), date(2025, 3, 3))
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].close, 150.0);
    }

    #[tokio::test]
    async fn test_monthly_groups() {
        let (_dir, store) = test_store().await;

        let records = vec![
            DailyRecord::new("Apple", date(2025, 1, 10), 100.0, 105.0, 106.0, 99.0, 1000),
            DailyRecord::new("Apple", date(2025, 1, 20), 98.0, 110.0, 111.0, 97.0, 2000),
            DailyRecord::new("Apple", date(2025, 2, 5), 107.0, 108.0, 112.0, 103.0, 3000),
        ];
        store.upsert_records(&records).await.unwrap();

        let buckets = store
            .query_monthly_groups("Apple", date(2025, 1, 1), date(2025, 12, 31))
            .await
            .unwrap();

        assert_eq!(buckets.len(), 2);
        let january = &buckets[0];
        assert_eq!(january.first_date, date(2025, 1, 10));
        assert_eq!(january.open, 98.0); // min of opens
        assert_eq!(january.close, 110.0); // max of closes
        assert_eq!(january.high, 111.0);
        assert_eq!(january.low, 97.0);
        assert_eq!(january.volume, 3000);

        let february = &buckets[1];
        assert_eq!(february.first_date, date(2025, 2, 5));
        assert_eq!(february.volume, 3000);
    }

    #[tokio::test]
    async fn test_sum_volume_empty_range_is_zero() {
        let (_dir, store) = test_store().await;

        let sum = store
            .sum_volume("Apple", date(2025, 1, 1), date(2025, 1, 31))
            .await
            .unwrap();
        assert_eq!(sum, 0);
    }

    #[tokio::test]
    async fn test_sum_volume() {
        let (_dir, store) = test_store().await;

        let records = vec![
            DailyRecord::new("Apple", date(2025, 1, 10), 100.0, 105.0, 106.0, 99.0, 1000),
            DailyRecord::new("Apple", date(2025, 1, 11), 105.0, 106.0, 107.0, 104.0, 2500),
            DailyRecord::new("Tesla", date(2025, 1, 10), 200.0, 205.0, 206.0, 199.0, 9999),
        ];
        store.upsert_records(&records).await.unwrap();

        let sum = store
            .sum_volume("Apple", date(2025, 1, 1), date(2025, 1, 31))
            .await
            .unwrap();
        assert_eq!(sum, 3500);
    }

    #[tokio::test]
    async fn test_stats() {
        let (_dir, store) = test_store().await;

        let records = vec![
            DailyRecord::new("Apple", date(2025, 1, 10), 100.0, 105.0, 106.0, 99.0, 1000),
            DailyRecord::new("Apple", date(2025, 2, 11), 105.0, 106.0, 107.0, 104.0, 2500),
            DailyRecord::new("Tesla", date(2025, 1, 10), 200.0, 205.0, 206.0, 199.0, 9999),
        ];
        store.upsert_records(&records).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.brands.len(), 2);
        assert_eq!(stats.brands[0].brand, "Apple");
        assert_eq!(stats.brands[0].records, 2);
        assert_eq!(stats.brands[0].first_date, date(2025, 1, 10));
        assert_eq!(stats.brands[0].last_date, date(2025, 2, 11));
    }
}
