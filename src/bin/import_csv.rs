//! Load the reference CSV files into the SQLite tables of the same names

use career_compass::config::Settings;
use career_compass::services::SqliteClient;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "import-csv", version, about = "Import reference CSV files into SQLite")]
struct Cli {
    /// Directory holding `<table>.csv` files (defaults to `data.dir`)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// SQLite URL (defaults to `database.url`)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Empty each table before loading it
    #[arg(long)]
    replace: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load().ok();

    let data_dir = cli
        .data_dir
        .or_else(|| settings.as_ref().map(|s| s.data.dir.clone()))
        .unwrap_or_else(|| PathBuf::from("db_data"));
    let database_url = cli
        .database_url
        .or_else(|| settings.as_ref().map(|s| s.database.url.clone()))
        .unwrap_or_else(|| "sqlite://db/career_compass.db".to_string());

    let client = SqliteClient::new(&database_url, 1, 1).await?;
    let report = client.import_csv_dir(&data_dir, cli.replace).await?;
    client.close().await;

    for (table, rows) in &report.tables {
        println!("{:<20} {:>8} rows", table, rows);
    }
    for table in &report.skipped {
        println!("{:<20} {:>8}", table, "skipped");
    }

    Ok(())
}
