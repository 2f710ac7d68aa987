use jsonwebtoken::TokenData;
use validator::Validate;

use crate::auth::password::verify_password;
use crate::entities::token::{AuthResponse, Claims, LoginRequest};
use crate::errors::AuthError;
use crate::settings::AppConfig;

/// Seam between the login flow and the concrete JWT implementation.
pub trait TokenService: Send + Sync {
    fn create_admin_jwt(&self, subject: &str) -> Result<String, AuthError>;
    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;
    fn expiration_minutes(&self) -> i64;
}

/// Single-principal admin auth: the dashboard only needs "is there a valid
/// session" as a gate, so credentials live in configuration rather than a
/// users table.
pub struct AuthHandler<T>
where
    T: TokenService,
{
    admin_email: String,
    admin_password_hash: String,
    pub token_service: T,
}

impl<T> AuthHandler<T>
where
    T: TokenService,
{
    pub fn new(config: &AppConfig, token_service: T) -> Self {
        AuthHandler {
            admin_email: config.admin_email.clone(),
            admin_password_hash: config.admin_password_hash.clone(),
            token_service,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        if !request.email.eq_ignore_ascii_case(&self.admin_email) {
            return Err(AuthError::WrongCredentials);
        }

        let is_password_valid = verify_password(&request.password, &self.admin_password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let access_token = self.token_service.create_admin_jwt(&self.admin_email)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        tracing::info!("Admin logged in successfully");
        Ok(AuthResponse::new(access_token, self.token_service.expiration_minutes()))
    }

    /// Decodes and verifies a bearer token, used by the admin middleware.
    pub fn verify_session(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(self.token_service.decode_jwt(token)?.claims)
    }
}
