// Route exports
pub mod board;
pub mod education;
pub mod health;
pub mod insight;
pub mod jobs;
pub mod postings;
pub mod survey;

use actix_web::{error, http::StatusCode, web, HttpResponse};
use std::sync::Arc;

use crate::config::RecommenderSettings;
use crate::core::{EduMatcher, HiringTrends, JobRecommender, JobSearch, PostingMatcher, SurveyCatalog};
use crate::models::ErrorResponse;
use crate::services::{BoardStore, ReferenceData, SqliteClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteClient>,
    pub board: BoardStore,
    pub recommender: JobRecommender,
    pub catalog: SurveyCatalog,
    pub edu: EduMatcher,
    pub postings: Arc<PostingMatcher>,
    pub job_search: Arc<JobSearch>,
    pub hiring: Arc<HiringTrends>,
}

impl AppState {
    /// Build every matcher over the same loaded reference data
    pub fn new(store: Arc<SqliteClient>, reference: ReferenceData, recommender: &RecommenderSettings) -> Self {
        let reference = Arc::new(reference);
        let board = BoardStore::new(store.pool().clone());

        Self {
            store,
            board,
            recommender: JobRecommender::new(
                reference.clone(),
                recommender.policy(),
                recommender.dedupe_tag_jobs,
            ),
            catalog: SurveyCatalog::new(reference.clone()),
            edu: EduMatcher::new(reference.clone()),
            postings: Arc::new(PostingMatcher::new(&reference)),
            job_search: Arc::new(JobSearch::new(&reference)),
            hiring: Arc::new(HiringTrends::new(&reference)),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(survey::configure)
            .configure(jobs::configure)
            .configure(education::configure)
            .configure(postings::configure)
            .configure(board::configure)
            .configure(insight::configure),
    );
}

/// JSON body for a failed request
pub(crate) fn error_json(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path segment errors, e.g. a non-numeric post id
pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}
