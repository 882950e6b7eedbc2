use crate::services::SqliteRecordStore;
use crate::utils::get_database_path;

pub async fn run() {
    println!("📊 Store Status\n");

    let database_path = get_database_path();
    if !database_path.exists() {
        println!("⚠️  No database found at {}. Run 'import' first.", database_path.display());
        return;
    }

    let store = match SqliteRecordStore::new(database_path).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    match store.stats().await {
        Ok(stats) => {
            println!("📈 Total records: {}\n", stats.total_records);
            for brand in &stats.brands {
                println!(
                    "🔹 {:<20} {:>8} records  ({} → {})",
                    brand.brand, brand.records, brand.first_date, brand.last_date
                );
            }
            if stats.brands.is_empty() {
                println!("⚠️  Store is empty. Run 'import' to load data.");
            }
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }

    store.close().await;
}
