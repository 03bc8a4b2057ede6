//! HTTP handler functions for the tweet map API.

use actix_web::{HttpResponse, web};
use tweet_map_analytics::{Aggregation, AnalyticsError};
use tweet_map_datasets::DatasetError;
use tweet_map_server_models::{
    ApiAggregation, ApiColors, ApiHealth, ApiTables, ApiUploadSummary,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /api/upload/{dataset}`
///
/// Parses a line-oriented upload body and stores the records as the
/// named dataset, replacing any previous upload under the same name. Bad
/// lines are reported back, not fatal; an upload with zero parseable
/// records is rejected.
pub async fn upload(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let dataset = tweet_map_ingest::sanitize_dataset_name(&path.into_inner());
    if dataset.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "invalid dataset name"
        }));
    }

    let text = String::from_utf8_lossy(&body);
    let outcome = tweet_map_ingest::parse_upload(&text);

    if outcome.tweets.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "no valid records in upload",
            "errors": ApiUploadSummary::format_errors(&outcome.errors),
        }));
    }

    let errors = ApiUploadSummary::format_errors(&outcome.errors);
    let records_stored = state.datasets.replace(&dataset, outcome.tweets);

    HttpResponse::Ok().json(ApiUploadSummary {
        dataset,
        records_stored,
        errors,
    })
}

/// `GET /api/tables`
pub async fn tables(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiTables {
        tables: state.datasets.names(),
    })
}

/// `GET /api/analyze/{dataset}`
///
/// Returns the per-region mean sentiment for a dataset.
pub async fn analyze(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match run_aggregation(&state, &path) {
        Ok(aggregation) => HttpResponse::Ok().json(ApiAggregation {
            means: aggregation.means,
            counters: aggregation.counters.into(),
        }),
        Err(response) => response,
    }
}

/// `GET /api/colors/{dataset}`
///
/// Runs the full pipeline: per-region means, then the color gradient.
pub async fn colors(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match run_aggregation(&state, &path) {
        Ok(aggregation) => {
            let colors = tweet_map_color::colorize(&aggregation.means);
            HttpResponse::Ok().json(ApiColors {
                colors,
                counters: aggregation.counters.into(),
            })
        }
        Err(response) => response,
    }
}

/// Fetches a dataset and aggregates it, mapping domain errors to
/// responses: unknown dataset to 404, empty dataset to 400.
fn run_aggregation(state: &AppState, dataset: &str) -> Result<Aggregation, HttpResponse> {
    let records = match state.datasets.records(dataset) {
        Ok(records) => records,
        Err(e @ DatasetError::NotFound(_)) => {
            return Err(HttpResponse::NotFound().json(serde_json::json!({
                "error": e.to_string()
            })));
        }
    };

    match tweet_map_analytics::aggregate(&records, &state.lexicon, &state.regions) {
        Ok(aggregation) => Ok(aggregation),
        Err(e @ AnalyticsError::EmptyDataset) => {
            Err(HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}
