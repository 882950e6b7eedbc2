use crate::server;
use crate::services::SqliteRecordStore;
use crate::utils::get_database_path;
use std::sync::Arc;

pub async fn run(port: u16) {
    println!("🚀 Starting stockboard server on port {}", port);

    let database_path = get_database_path();
    println!("💾 Database: {}", database_path.display());

    let store = match SqliteRecordStore::new(database_path).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("❌ Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    match store.stats().await {
        Ok(stats) => {
            println!("✅ Store ready:");
            println!("   📈 Brands:  {}", stats.brands.len());
            println!("   📅 Records: {}", stats.total_records);
            if stats.total_records == 0 {
                println!("   ⚠️  Store is empty. Run 'stockboard import <file>' to load data.");
            }
        }
        Err(e) => {
            eprintln!("⚠️  Warning: could not read store stats: {}", e);
        }
    }

    if let Err(e) = server::serve(store, port).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
