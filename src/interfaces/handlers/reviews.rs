use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::review::{NewReviewRequest, UpdateReviewRequest},
    errors::AppError,
    handlers::AdminListQuery,
    use_cases::{dashboard, extractors::AdminClaims},
    AppState,
};

// ───── Public read paths ────────────────────────────────────────────

#[instrument(skip(state))]
pub async fn get_published_reviews(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let reviews = state.review_handler.get_published_reviews().await?;
    Ok(HttpResponse::Ok().json(reviews))
}

#[instrument(skip(state))]
pub async fn get_featured_reviews(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let reviews = state.review_handler.get_featured_reviews().await?;
    Ok(HttpResponse::Ok().json(reviews))
}

// ───── Admin dashboard paths ────────────────────────────────────────

async fn ensure_cache_loaded(state: &AppState, reload: bool) -> Result<(), AppError> {
    if reload || !state.dashboard.reviews.is_loaded() {
        let rows = state.review_handler.get_all_reviews().await?;
        state.dashboard.reviews.load(rows);
    }
    Ok(())
}

#[instrument(skip(_claims, state, query))]
pub async fn admin_list_reviews(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<AdminListQuery>,
) -> Result<impl Responder, AppError> {
    ensure_cache_loaded(&state, query.reload).await?;

    let filter = query.to_filter();
    let reviews: Vec<_> = state
        .dashboard
        .reviews
        .snapshot()
        .into_iter()
        .filter(|r| dashboard::review_matches(&filter, r))
        .collect();

    Ok(HttpResponse::Ok().json(reviews))
}

#[instrument(skip(_claims, state))]
pub async fn admin_get_review(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let review = state.review_handler.get_review_by_id(*id).await?;
    Ok(HttpResponse::Ok().json(review))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_review(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewReviewRequest>,
) -> Result<impl Responder, AppError> {
    let created = state.review_handler.create_review(data.into_inner()).await?;
    state.dashboard.reviews.apply_created(created.clone());
    Ok(HttpResponse::Created().json(created))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_review(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
    data: web::Json<UpdateReviewRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state.review_handler.update_review(*id, &data.into_inner()).await?;
    state.dashboard.reviews.apply_updated(updated.clone());
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(_claims, state))]
pub async fn delete_review(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.review_handler.delete_review(*id).await?;
    state.dashboard.reviews.apply_removed(*id);
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(_claims, state))]
pub async fn toggle_review_publish(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let updated = state.review_handler.toggle_publish_status(*id).await?;
    state.dashboard.reviews.apply_updated(updated.clone());
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(_claims, state))]
pub async fn toggle_review_feature(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let updated = state.review_handler.toggle_featured_status(*id).await?;
    state.dashboard.reviews.apply_updated(updated.clone());
    Ok(HttpResponse::Ok().json(updated))
}
