use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{errors::AuthError, AppState};

/// Gates `/admin` paths behind a valid admin bearer token. Everything else —
/// the public read API, auth endpoints, SEO endpoints — passes through
/// untouched; the content site is world-readable by design.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if !requires_admin(req.path(), req.method().as_str()) {
                return service.call(req).await.map(ServiceResponse::map_into_boxed_body);
            }

            let state = req.app_data::<web::Data<AppState>>()
                .ok_or_else(|| {
                    tracing::error!("AppState missing in middleware");
                    AuthError::MissingJwtService
                })?;

            let token = match extract_token(&req) {
                Some(token) => token,
                None => {
                    tracing::warn!("Missing or malformed Authorization header");
                    return Ok(unauthorized(req, "Missing or invalid credentials"));
                }
            };

            let claims = match state.auth_handler.verify_session(&token) {
                Ok(claims) => claims,
                Err(AuthError::TokenExpired) => {
                    return Ok(unauthorized(req, "Token has expired"));
                }
                Err(_) => {
                    return Ok(unauthorized(req, "Missing or invalid credentials"));
                }
            };

            if !claims.admin {
                tracing::warn!("Non-admin session on admin path: {}", req.path());
                let response = HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "Admin access required"
                }));
                return Ok(req.into_response(response));
            }

            req.extensions_mut().insert(claims);
            service.call(req).await.map(ServiceResponse::map_into_boxed_body)
        })
    }
}

fn requires_admin(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return false;
    }
    path == "/admin" || path.starts_with("/admin/")
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn unauthorized(req: ServiceRequest, message: &str) -> ServiceResponse<BoxBody> {
    let response = HttpResponse::Unauthorized().json(serde_json::json!({
        "error": message
    }));
    req.into_response(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_paths_require_a_session() {
        assert!(requires_admin("/admin", "GET"));
        assert!(requires_admin("/admin/content/projects", "POST"));
        assert!(!requires_admin("/api/v1/projects", "GET"));
        assert!(!requires_admin("/auth/login", "POST"));
        assert!(!requires_admin("/administrators", "GET"));
        assert!(!requires_admin("/admin/content/projects", "OPTIONS"));
    }
}
