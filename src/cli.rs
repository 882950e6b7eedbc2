use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "stockboard")]
#[command(about = "Stock market time-series API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8686)]
        port: u16,
    },
    /// Import daily records from a CSV file
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },
    /// Show current store status
    Status,
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            commands::serve::run(port).await;
        }
        Commands::Import { file } => {
            commands::import::run(file).await;
        }
        Commands::Status => {
            commands::status::run().await;
        }
    }
}
