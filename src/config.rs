// src/config.rs
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime settings. Every flag can also come from the environment (or a `.env` file).
#[derive(Parser, Debug, Clone)]
#[command(name = "waste_tracker")]
#[command(about = "Citizen waste-reporting API with report triage and analytics", long_about = None)]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long, env = "WASTE_TRACKER_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: SocketAddr,

    /// SQLite database file
    #[arg(long, env = "WASTE_TRACKER_DB", default_value = "waste_tracker.sqlite3")]
    pub db_path: String,

    /// Schema applied at start-up
    #[arg(long, env = "WASTE_TRACKER_SCHEMA", default_value = "sql/schema.sql")]
    pub schema_path: String,

    /// Directory uploaded photos are written to
    #[arg(long, env = "WASTE_TRACKER_UPLOADS", default_value = "public/uploads")]
    pub uploads_dir: PathBuf,

    /// Size of the request worker pool
    #[arg(long, env = "WASTE_TRACKER_WORKERS", default_value_t = 8)]
    pub max_workers: usize,
}
