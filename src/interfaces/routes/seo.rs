use actix_web::web;

use crate::handlers::seo;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(seo::sitemap);
    cfg.service(seo::robots);
}
