mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, slugs, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{auth, db, utils};

use std::time::Duration;

use auth::jwt::JwtService;
use auth::login_guard::LoginGuard;
use repositories::sqlx_repo::{
    SqlxBlogPostRepo, SqlxCommentRepo, SqlxPartnerRepo, SqlxProjectRepo, SqlxReviewRepo,
};
use use_cases::{
    auth::AuthHandler,
    blog::BlogPostHandler,
    comments::CommentHandler,
    dashboard::DashboardState,
    partners::PartnerHandler,
    projects::ProjectHandler,
    reviews::ReviewHandler,
};

pub type AppAuthHandler = AuthHandler<JwtService>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub project_handler: ProjectHandler<SqlxProjectRepo>,
    pub blog_handler: BlogPostHandler<SqlxBlogPostRepo>,
    pub review_handler: ReviewHandler<SqlxReviewRepo>,
    pub partner_handler: PartnerHandler<SqlxPartnerRepo>,
    pub comment_handler: CommentHandler<SqlxCommentRepo>,
    pub dashboard: DashboardState,
    pub login_guard: LoginGuard,
    pub db_pool: sqlx::PgPool,
    pub site_base_url: String,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let jwt_service = JwtService::new(config);
        let auth_handler = AuthHandler::new(config, jwt_service);

        let login_guard = LoginGuard::new(
            config.login_max_attempts,
            Duration::from_secs(config.login_lockout_minutes * 60),
        );

        AppState {
            auth_handler,
            project_handler: ProjectHandler::new(SqlxProjectRepo::new(pool.clone())),
            blog_handler: BlogPostHandler::new(SqlxBlogPostRepo::new(pool.clone())),
            review_handler: ReviewHandler::new(SqlxReviewRepo::new(pool.clone())),
            partner_handler: PartnerHandler::new(SqlxPartnerRepo::new(pool.clone())),
            comment_handler: CommentHandler::new(SqlxCommentRepo::new(pool.clone())),
            dashboard: DashboardState::new(),
            login_guard,
            db_pool: pool,
            site_base_url: config.canonical_base_url(),
        }
    }
}
