use std::path::PathBuf;

/// Get the SQLite database path from environment variable or use default
pub fn get_database_path() -> PathBuf {
    std::env::var("STOCKBOARD_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/stockboard.db"))
}
