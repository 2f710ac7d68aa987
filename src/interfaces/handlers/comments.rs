use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::comment::NewCommentRequest,
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    pub status: Option<String>,
}

// ───── Public paths ─────────────────────────────────────────────────

/// Approved comments for a post, oldest first.
#[instrument(skip(state))]
pub async fn get_comments_for_post(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let comments = state.comment_handler.get_approved_comments(&slug).await?;
    Ok(HttpResponse::Ok().json(comments))
}

#[instrument(skip(state, data))]
pub async fn submit_comment(
    slug: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<NewCommentRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.comment_handler.submit_comment(&slug, data.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

// ───── Admin moderation paths ───────────────────────────────────────

#[instrument(skip(_claims, state, query))]
pub async fn admin_list_comments(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<CommentListQuery>,
) -> Result<impl Responder, AppError> {
    let comments = match query.status.as_deref() {
        Some("pending") => state.comment_handler.get_pending_comments().await?,
        _ => state.comment_handler.get_all_comments().await?,
    };
    Ok(HttpResponse::Ok().json(comments))
}

#[instrument(skip(_claims, state))]
pub async fn approve_comment(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let approved = state.comment_handler.approve_comment(*id).await?;
    Ok(HttpResponse::Ok().json(approved))
}

#[instrument(skip(_claims, state))]
pub async fn delete_comment(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.comment_handler.delete_comment(*id).await?;
    Ok(HttpResponse::NoContent().finish())
}
