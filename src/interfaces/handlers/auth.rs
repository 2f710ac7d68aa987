use actix_web::{post, web, HttpRequest, HttpResponse, Responder, ResponseError};

use crate::{
    entities::token::LoginRequest,
    errors::AuthError,
    utils::client_ip::get_client_ip,
    AppState,
};

/// Admin sign-in. Failed attempts count against the caller's IP; once locked
/// out, further attempts are rejected before credentials are checked.
#[post("/login")]
pub async fn login(
    request: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> impl Responder {
    let client_ip = get_client_ip(&request, false);

    if let Err(e) = state.login_guard.check(&client_ip) {
        tracing::warn!("Login attempt from locked-out client {}", client_ip);
        return e.error_response();
    }

    match state.auth_handler.login(body.into_inner()).await {
        Ok(auth_response) => {
            state.login_guard.clear(&client_ip);
            HttpResponse::Ok().json(auth_response)
        }
        Err(e @ AuthError::WrongCredentials) => {
            state.login_guard.record_failure(&client_ip);
            e.error_response()
        }
        Err(e) => e.error_response(),
    }
}
