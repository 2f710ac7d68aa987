use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::partner::{NewPartnerRequest, UpdatePartnerRequest},
    errors::AppError,
    handlers::AdminListQuery,
    use_cases::{dashboard, extractors::AdminClaims},
    AppState,
};

// ───── Public read paths ────────────────────────────────────────────

#[instrument(skip(state))]
pub async fn get_published_partners(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let partners = state.partner_handler.get_published_partners().await?;
    Ok(HttpResponse::Ok().json(partners))
}

#[instrument(skip(state))]
pub async fn get_featured_partners(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let partners = state.partner_handler.get_featured_partners().await?;
    Ok(HttpResponse::Ok().json(partners))
}

// ───── Admin dashboard paths ────────────────────────────────────────

async fn ensure_cache_loaded(state: &AppState, reload: bool) -> Result<(), AppError> {
    if reload || !state.dashboard.partners.is_loaded() {
        let rows = state.partner_handler.get_all_partners().await?;
        state.dashboard.partners.load(rows);
    }
    Ok(())
}

#[instrument(skip(_claims, state, query))]
pub async fn admin_list_partners(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<AdminListQuery>,
) -> Result<impl Responder, AppError> {
    ensure_cache_loaded(&state, query.reload).await?;

    let filter = query.to_filter();
    let partners: Vec<_> = state
        .dashboard
        .partners
        .snapshot()
        .into_iter()
        .filter(|p| dashboard::partner_matches(&filter, p))
        .collect();

    Ok(HttpResponse::Ok().json(partners))
}

#[instrument(skip(_claims, state))]
pub async fn admin_get_partner(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let partner = state.partner_handler.get_partner_by_id(*id).await?;
    Ok(HttpResponse::Ok().json(partner))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_partner(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewPartnerRequest>,
) -> Result<impl Responder, AppError> {
    let created = state.partner_handler.create_partner(data.into_inner()).await?;
    state.dashboard.partners.apply_created(created.clone());
    Ok(HttpResponse::Created().json(created))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_partner(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
    data: web::Json<UpdatePartnerRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state.partner_handler.update_partner(*id, &data.into_inner()).await?;
    state.dashboard.partners.apply_updated(updated.clone());
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(_claims, state))]
pub async fn delete_partner(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.partner_handler.delete_partner(*id).await?;
    state.dashboard.partners.apply_removed(*id);
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(_claims, state))]
pub async fn toggle_partner_publish(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let updated = state.partner_handler.toggle_publish_status(*id).await?;
    state.dashboard.partners.apply_updated(updated.clone());
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(_claims, state))]
pub async fn toggle_partner_feature(
    _claims: AdminClaims,
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let updated = state.partner_handler.toggle_featured_status(*id).await?;
    state.dashboard.partners.apply_updated(updated.clone());
    Ok(HttpResponse::Ok().json(updated))
}
