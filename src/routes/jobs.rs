use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use crate::models::JobView;
use crate::routes::{error_json, AppState};

/// Configure job catalog and job search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/jobs", web::get().to(list_jobs))
        .route("/jobs/categories", web::get().to(list_categories))
        .route("/jobs/categories/{name}", web::get().to(get_category));
}

/// GET /api/v1/jobs
async fn list_jobs(state: web::Data<AppState>) -> impl Responder {
    let jobs: Vec<JobView> = state
        .recommender
        .reference()
        .jobs
        .iter()
        .map(|job| JobView {
            job_id: job.id.clone(),
            name: job.name.clone(),
        })
        .collect();

    HttpResponse::Ok().json(jobs)
}

/// GET /api/v1/jobs/categories
async fn list_categories(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.job_search.categories())
}

/// Duties of one NCS mid-category, e.g. `정보기술`
///
/// GET /api/v1/jobs/categories/{name}
async fn get_category(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();
    match state.job_search.category(&name) {
        Some(category) => HttpResponse::Ok().json(category),
        None => error_json(
            StatusCode::NOT_FOUND,
            "Unknown category",
            format!("no jobs in category {}", name),
        ),
    }
}
