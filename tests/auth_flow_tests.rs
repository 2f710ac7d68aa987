use agency_cms::auth::jwt::JwtService;
use agency_cms::auth::password::hash_password;
use agency_cms::entities::token::LoginRequest;
use agency_cms::errors::AuthError;
use agency_cms::settings::{AppConfig, AppEnvironment};
use agency_cms::use_cases::auth::AuthHandler;

fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Agency-CMS-Test".into(),
        port: 0,
        host: "127.0.0.1".into(),
        worker_count: 1,
        database_url: "postgres://unused".into(),
        site_base_url: "https://example.com".into(),
        cors_allowed_origins: vec!["*".into()],
        jwt_secret: "a-test-secret-that-is-long-enough-0123456789".into(),
        jwt_expiration_minutes: 30,
        admin_email: "editor@example.com".into(),
        admin_password_hash: hash_password("correct horse battery staple").unwrap(),
        login_max_attempts: 5,
        login_lockout_minutes: 15,
    }
}

fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.into(),
        password: password.into(),
    }
}

#[actix_rt::test]
async fn valid_credentials_yield_a_decodable_admin_session() {
    let config = test_config();
    let handler = AuthHandler::new(&config, JwtService::new(&config));

    let response = handler
        .login(login("editor@example.com", "correct horse battery staple"))
        .await
        .unwrap();

    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in_minutes, 30);

    let claims = handler.verify_session(&response.access_token).unwrap();
    assert!(claims.admin);
    assert_eq!(claims.sub, "editor@example.com");
}

#[actix_rt::test]
async fn email_comparison_is_case_insensitive() {
    let config = test_config();
    let handler = AuthHandler::new(&config, JwtService::new(&config));

    let response = handler
        .login(login("Editor@Example.COM", "correct horse battery staple"))
        .await;
    assert!(response.is_ok());
}

#[actix_rt::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let config = test_config();
    let handler = AuthHandler::new(&config, JwtService::new(&config));

    let bad_password = handler
        .login(login("editor@example.com", "wrong password here"))
        .await
        .unwrap_err();
    let bad_email = handler
        .login(login("stranger@example.com", "correct horse battery staple"))
        .await
        .unwrap_err();

    assert!(matches!(bad_password, AuthError::WrongCredentials));
    assert!(matches!(bad_email, AuthError::WrongCredentials));
}

#[actix_rt::test]
async fn garbage_tokens_are_rejected() {
    let config = test_config();
    let handler = AuthHandler::new(&config, JwtService::new(&config));

    assert!(handler.verify_session("not-a-jwt").is_err());
}
