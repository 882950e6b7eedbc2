#[tokio::main]
async fn main() {
    stockboard::cli::run().await;
}
