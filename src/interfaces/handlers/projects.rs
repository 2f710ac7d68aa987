use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::project::{NewProjectRequest, UpdateProjectRequest},
    errors::AppError,
    handlers::AdminListQuery,
    use_cases::{dashboard, extractors::AdminClaims},
    AppState,
};

// ───── Public read paths ────────────────────────────────────────────

#[instrument(skip(state))]
pub async fn get_published_projects(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.get_published_projects().await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn get_featured_projects(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.get_featured_projects().await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn get_project_by_slug(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project_by_slug(&slug).await?;
    Ok(HttpResponse::Ok().json(project))
}

// ───── Admin dashboard paths ────────────────────────────────────────

async fn ensure_cache_loaded(state: &AppState, reload: bool) -> Result<(), AppError> {
    if reload || !state.dashboard.projects.is_loaded() {
        let rows = state.project_handler.get_all_projects().await?;
        state.dashboard.projects.load(rows);
    }
    Ok(())
}

#[instrument(skip(_claims, state, query))]
pub async fn admin_list_projects(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<AdminListQuery>,
) -> Result<impl Responder, AppError> {
    ensure_cache_loaded(&state, query.reload).await?;

    let filter = query.to_filter();
    let projects: Vec<_> = state
        .dashboard
        .projects
        .snapshot()
        .into_iter()
        .filter(|p| dashboard::project_matches(&filter, p))
        .collect();

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(_claims, state))]
pub async fn admin_get_project(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project_by_id(*id).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_project(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let created = state.project_handler.create_project(data.into_inner()).await?;
    state.dashboard.projects.apply_created(created.clone());
    Ok(HttpResponse::Created().json(created))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_project(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
    data: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state.project_handler.update_project(*id, &data.into_inner()).await?;
    state.dashboard.projects.apply_updated(updated.clone());
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(_claims, state))]
pub async fn delete_project(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete_project(*id).await?;
    state.dashboard.projects.apply_removed(*id);
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(_claims, state))]
pub async fn toggle_project_publish(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let updated = state.project_handler.toggle_publish_status(*id).await?;
    state.dashboard.projects.apply_updated(updated.clone());
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(_claims, state))]
pub async fn toggle_project_feature(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let updated = state.project_handler.toggle_featured_status(*id).await?;
    state.dashboard.projects.apply_updated(updated.clone());
    Ok(HttpResponse::Ok().json(updated))
}
