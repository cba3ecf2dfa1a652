use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{EduError, ProgramFilter};
use crate::models::{JobView, ProgramSearchRequest};
use crate::routes::{error_json, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/education/jobs", web::get().to(related_jobs))
        .route("/education/regions", web::get().to(regions))
        .route("/education/programs", web::post().to(search_programs));
}

/// Jobs that have at least one education program
async fn related_jobs(state: web::Data<AppState>) -> impl Responder {
    let jobs: Vec<JobView> = state
        .edu
        .related_jobs()
        .into_iter()
        .map(|job| JobView {
            job_id: job.id.clone(),
            name: job.name.clone(),
        })
        .collect();

    HttpResponse::Ok().json(jobs)
}

async fn regions(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.edu.regions())
}

/// Search programs for a job
///
/// POST /api/v1/education/programs
///
/// Request body:
/// ```json
/// {
///   "job": "string",
///   "regions": ["서울"],
///   "mode": "any|online_only|offline_only",
///   "withoutFee": false,
///   "startFrom": "2024-05-01"
/// }
/// ```
async fn search_programs(
    state: web::Data<AppState>,
    req: web::Json<ProgramSearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_json(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let req = req.into_inner();
    let filter = ProgramFilter {
        regions: req.regions,
        mode: req.mode,
        without_fee: req.without_fee,
        start_from: req.start_from,
    };

    match state.edu.programs_for_job(&req.job, &filter) {
        Ok(programs) => HttpResponse::Ok().json(programs),
        Err(e @ EduError::UnknownJob(_)) => {
            error_json(StatusCode::NOT_FOUND, "Unknown job", e.to_string())
        }
    }
}
