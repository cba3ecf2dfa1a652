use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{CommentRequest, CreatedResponse, PostRequest, PostSearchQuery};
use crate::routes::{error_json, AppState};
use crate::services::BoardError;

/// Configure bulletin board routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/board/posts", web::get().to(list_posts))
        .route("/board/posts", web::post().to(create_post))
        .route("/board/posts/{id}", web::get().to(get_post))
        .route("/board/posts/{id}", web::put().to(update_post))
        .route("/board/posts/{id}", web::delete().to(delete_post))
        .route("/board/posts/{id}/like", web::post().to(like_post))
        .route("/board/posts/{id}/comments", web::get().to(list_comments))
        .route("/board/posts/{id}/comments", web::post().to(create_comment))
        .route("/board/comments/{id}", web::put().to(update_comment))
        .route("/board/comments/{id}", web::delete().to(delete_comment))
        .route("/board/comments/{id}/like", web::post().to(like_comment));
}

fn board_error(e: BoardError) -> HttpResponse {
    match e {
        BoardError::NotFound { .. } => error_json(StatusCode::NOT_FOUND, "Not found", e.to_string()),
        BoardError::InvalidInput(_) => error_json(StatusCode::BAD_REQUEST, "Validation failed", e.to_string()),
        BoardError::SqlxError(_) => {
            tracing::error!("Board storage error: {}", e);
            error_json(StatusCode::INTERNAL_SERVER_ERROR, "Storage error", e.to_string())
        }
    }
}

fn updated(result: Result<(), BoardError>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => board_error(e),
    }
}

/// GET /api/v1/board/posts?q=keyword
async fn list_posts(state: web::Data<AppState>, query: web::Query<PostSearchQuery>) -> impl Responder {
    let result = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(keyword) => state.board.search_posts(keyword).await,
        None => state.board.list_posts().await,
    };

    match result {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(e) => board_error(e),
    }
}

async fn create_post(state: web::Data<AppState>, req: web::Json<PostRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_json(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state.board.add_post(&req.title, &req.content).await {
        Ok(id) => HttpResponse::Created().json(CreatedResponse { success: true, id }),
        Err(e) => board_error(e),
    }
}

async fn get_post(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match state.board.get_post(path.into_inner()).await {
        Ok(post) => HttpResponse::Ok().json(post),
        Err(e) => board_error(e),
    }
}

async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<PostRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_json(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    updated(state.board.update_post(path.into_inner(), &req.title, &req.content).await)
}

async fn delete_post(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    updated(state.board.delete_post(path.into_inner()).await)
}

async fn like_post(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    updated(state.board.like_post(path.into_inner()).await)
}

async fn list_comments(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let post_id = path.into_inner();

    // Listing comments of a missing post is a 404, not an empty list
    if let Err(e) = state.board.get_post(post_id).await {
        return board_error(e);
    }

    match state.board.list_comments(post_id).await {
        Ok(comments) => HttpResponse::Ok().json(comments),
        Err(e) => board_error(e),
    }
}

async fn create_comment(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<CommentRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_json(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state.board.add_comment(path.into_inner(), &req.content).await {
        Ok(id) => HttpResponse::Created().json(CreatedResponse { success: true, id }),
        Err(e) => board_error(e),
    }
}

async fn update_comment(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<CommentRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_json(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    updated(state.board.update_comment(path.into_inner(), &req.content).await)
}

async fn delete_comment(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    updated(state.board.delete_comment(path.into_inner()).await)
}

async fn like_comment(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    updated(state.board.like_comment(path.into_inner()).await)
}
