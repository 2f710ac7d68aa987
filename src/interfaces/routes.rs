use actix_web::web;

use crate::handlers::home::home;

mod admin;
mod auth;
mod content;
mod json_error;
mod seo;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.configure(seo::config_routes);

    cfg.service(
        web::scope("/auth")
            .configure(auth::config_routes)
    );

    cfg.service(
        web::scope("/api/v1")
            .configure(content::config_routes)
    );

    cfg.service(
        web::scope("/admin")
            .configure(admin::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
