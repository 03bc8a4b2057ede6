#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the tweet sentiment map.
//!
//! Serves the REST API for uploading geotagged tweet datasets and
//! reading per-region sentiment aggregates, either as raw means or as
//! map-ready hex colors. The sentiment lexicon and region index are
//! loaded once at startup and shared read-only across requests; each
//! request gets its own aggregation state.

pub mod config;
mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use std::sync::Arc;
use tweet_map_datasets::DatasetStore;
use tweet_map_lexicon::SentimentLexicon;
use tweet_map_spatial::RegionIndex;

use config::Config;

/// Shared application state.
pub struct AppState {
    /// Word-score lexicon, loaded once.
    pub lexicon: Arc<SentimentLexicon>,
    /// Region index, loaded once.
    pub regions: Arc<RegionIndex>,
    /// Uploaded datasets.
    pub datasets: Arc<DatasetStore>,
}

/// Starts the tweet map API server.
///
/// Loads the sentiment lexicon and region index from the configured
/// paths, then binds and runs the HTTP server. This is a regular async
/// function — the caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the lexicon or region source fails to load; both are
/// required before any request can be served.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: Config) -> std::io::Result<()> {
    log::info!(
        "Loading sentiment lexicon from {}",
        config.lexicon_path.display()
    );
    let lexicon =
        SentimentLexicon::from_csv_path(&config.lexicon_path).expect("Failed to load lexicon");

    log::info!("Loading regions from {}", config.regions_path.display());
    let regions =
        RegionIndex::from_json_path(&config.regions_path).expect("Failed to load region index");

    let state = web::Data::new(AppState {
        lexicon: Arc::new(lexicon),
        regions: Arc::new(regions),
        datasets: Arc::new(DatasetStore::new()),
    });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/upload/{dataset}", web::post().to(handlers::upload))
                    .route("/tables", web::get().to(handlers::tables))
                    .route("/analyze/{dataset}", web::get().to(handlers::analyze))
                    .route("/colors/{dataset}", web::get().to(handlers::colors)),
            )
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
