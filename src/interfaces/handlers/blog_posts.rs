use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::blog_post::{NewBlogPostRequest, UpdateBlogPostRequest},
    errors::AppError,
    handlers::AdminListQuery,
    use_cases::{dashboard, extractors::AdminClaims},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

// ───── Public read paths ────────────────────────────────────────────

#[instrument(skip(state))]
pub async fn get_published_posts(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let posts = state.blog_handler.get_published_blog_posts().await?;
    let listing: Vec<_> = posts.iter().map(|p| p.to_list_response()).collect();
    Ok(HttpResponse::Ok().json(listing))
}

#[instrument(skip(state, query))]
pub async fn search_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, AppError> {
    let posts = state.blog_handler.search_blog_posts(&query.q).await?;
    let listing: Vec<_> = posts.iter().map(|p| p.to_list_response()).collect();
    Ok(HttpResponse::Ok().json(listing))
}

#[instrument(skip(state))]
pub async fn get_posts_by_tag(
    tag: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let posts = state.blog_handler.get_blog_posts_by_tag(&tag).await?;
    let listing: Vec<_> = posts.iter().map(|p| p.to_list_response()).collect();
    Ok(HttpResponse::Ok().json(listing))
}

/// Slug-addressed detail view; serves rendered HTML plus SEO fields. A miss
/// after the fallback scan renders as 404, never as a generic error.
#[instrument(skip(state))]
pub async fn get_post_by_slug(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler.get_blog_post_by_slug(&slug).await?;
    Ok(HttpResponse::Ok().json(post.to_detail_response()))
}

// ───── Admin dashboard paths ────────────────────────────────────────

async fn ensure_cache_loaded(state: &AppState, reload: bool) -> Result<(), AppError> {
    if reload || !state.dashboard.posts.is_loaded() {
        let rows = state.blog_handler.get_all_blog_posts().await?;
        state.dashboard.posts.load(rows);
    }
    Ok(())
}

#[instrument(skip(_claims, state, query))]
pub async fn admin_list_posts(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<AdminListQuery>,
) -> Result<impl Responder, AppError> {
    ensure_cache_loaded(&state, query.reload).await?;

    let filter = query.to_filter();
    let posts: Vec<_> = state
        .dashboard
        .posts
        .snapshot()
        .into_iter()
        .filter(|p| dashboard::post_matches(&filter, p))
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(_claims, state))]
pub async fn admin_get_post(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler.get_blog_post_by_id(*id).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_post(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewBlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let created = state.blog_handler.create_blog_post(data.into_inner()).await?;
    state.dashboard.posts.apply_created(created.clone());
    Ok(HttpResponse::Created().json(created))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_post(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
    data: web::Json<UpdateBlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state.blog_handler.update_blog_post(*id, &data.into_inner()).await?;
    state.dashboard.posts.apply_updated(updated.clone());
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(_claims, state))]
pub async fn delete_post(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.blog_handler.delete_blog_post(*id).await?;
    state.dashboard.posts.apply_removed(*id);
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(_claims, state))]
pub async fn toggle_post_publish(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let updated = state.blog_handler.toggle_publish_status(*id).await?;
    state.dashboard.posts.apply_updated(updated.clone());
    Ok(HttpResponse::Ok().json(updated))
}
