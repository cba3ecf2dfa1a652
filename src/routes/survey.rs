use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use crate::core::RecommendError;
use crate::models::{MissingResponseBody, RecommendationResponse, SubmitSurveyRequest, SurveyResponse};
use crate::routes::AppState;

/// Configure survey routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/survey", web::get().to(get_survey))
        .route("/survey/submit", web::post().to(submit_survey));
}

/// GET /api/v1/survey
async fn get_survey(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(SurveyResponse {
        questions: state.catalog.questions(),
    })
}

/// Score a completed survey
///
/// POST /api/v1/survey/submit
///
/// Request body:
/// ```json
/// {
///   "responses": { "1": ["101", "102"], "2": ["201"] }
/// }
/// ```
///
/// The selected tags are appended to the audit log after scoring. A failed
/// write is reported in `warnings` and never fails the request.
async fn submit_survey(
    state: web::Data<AppState>,
    req: web::Json<SubmitSurveyRequest>,
) -> impl Responder {
    let result = match state.recommender.recommend(&req.responses) {
        Ok(result) => result,
        Err(e @ RecommendError::MissingResponse { .. }) => {
            tracing::info!("Rejected incomplete survey: {}", e);
            let status = StatusCode::UNPROCESSABLE_ENTITY;
            let message = e.to_string();
            let RecommendError::MissingResponse { questions } = e;
            return HttpResponse::build(status).json(MissingResponseBody {
                error: "missing_response".to_string(),
                message,
                status_code: status.as_u16(),
                missing_questions: questions,
            });
        }
    };

    let mut response = RecommendationResponse {
        recommendation: result.recommendation,
        response_id: None,
        audit_logged: false,
        warnings: Vec::new(),
    };

    match state.store.record_response(&result.selected_tags).await {
        Ok(id) => {
            response.response_id = Some(id.to_string());
            response.audit_logged = true;
        }
        Err(e) => {
            tracing::warn!("Failed to record survey response: {}", e);
            response.warnings.push(format!("response was not recorded: {}", e));
        }
    }

    tracing::info!(
        "Scored survey: {} tags, {} tiers, audit_logged={}",
        result.selected_tags.len(),
        response.recommendation.tiers().len(),
        response.audit_logged
    );

    HttpResponse::Ok().json(response)
}
