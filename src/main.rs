use crate::config::Config;
use crate::db::{init_db, Database};
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use crate::upload::UploadStore;
use astra::Server;
use clap::Parser;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod analytics;
mod config;
mod db;
mod domain;
mod errors;
mod handlers;
mod responses;
mod router;
mod upload;


fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = Config::parse();

    // 1️⃣ Create the database handle and apply the schema
    let db = Database::new(cfg.db_path.clone());
    if let Err(e) = init_db(&db, &cfg.schema_path) {
        tracing::error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let state = AppState {
        db,
        uploads: UploadStore::new(cfg.uploads_dir.clone()),
    };

    // 2️⃣ Start the server
    tracing::info!(
        addr = %cfg.addr,
        workers = cfg.max_workers,
        uploads = %state.uploads.dir().display(),
        "starting server"
    );

    let server = Server::bind(&cfg.addr).max_workers(cfg.max_workers);

    // 3️⃣ Serve requests; every error becomes a JSON error response
    let result = server.serve(move |req: astra::Request, _info| {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_owned();

        let resp = match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err),
        };

        tracing::info!(
            %method,
            %path,
            status = resp.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request"
        );
        resp
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down cleanly");
}
