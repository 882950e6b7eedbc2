use crate::services::{import_csv, SqliteRecordStore};
use crate::utils::get_database_path;
use std::path::PathBuf;

pub async fn run(file: PathBuf) {
    println!("📥 Importing daily records from {}", file.display());

    let database_path = get_database_path();
    let store = match SqliteRecordStore::new(database_path).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    match import_csv(&store, &file).await {
        Ok(count) => {
            println!("✅ Imported {} records", count);
        }
        Err(e) => {
            eprintln!("❌ Import failed: {}", e);
            std::process::exit(1);
        }
    }

    store.close().await;
}
