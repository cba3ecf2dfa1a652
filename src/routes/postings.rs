use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::PostingQuery;
use crate::routes::{error_json, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/postings/jobs", web::get().to(job_titles))
        .route("/postings", web::get().to(postings_for_job));
}

async fn job_titles(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.postings.job_titles())
}

/// GET /api/v1/postings?job=...
async fn postings_for_job(
    state: web::Data<AppState>,
    query: web::Query<PostingQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_json(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    HttpResponse::Ok().json(state.postings.postings_for_job(&query.job))
}
