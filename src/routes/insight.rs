use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use crate::routes::{error_json, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/insight/occupations", web::get().to(occupations))
        .route("/insight/{occupation}", web::get().to(hiring_series));
}

async fn occupations(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.hiring.occupations())
}

/// New openings per year for one occupation
///
/// GET /api/v1/insight/{occupation}
async fn hiring_series(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let occupation = path.into_inner();
    match state.hiring.series(&occupation) {
        Some(series) => HttpResponse::Ok().json(series),
        None => error_json(
            StatusCode::NOT_FOUND,
            "Unknown occupation",
            format!("no hiring data for occupation {}", occupation),
        ),
    }
}
