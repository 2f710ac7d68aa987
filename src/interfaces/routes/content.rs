use actix_web::web;

use crate::handlers::{blog_posts, comments, partners, projects, reviews};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(projects::get_published_projects))
            )
            .service(
                web::resource("/featured")
                    .route(web::get().to(projects::get_featured_projects))
            )
            .service(
                web::resource("/{slug}")
                    .route(web::get().to(projects::get_project_by_slug))
            )
    );

    cfg.service(
        web::scope("/blog/posts")
            .service(
                web::resource("")
                    .route(web::get().to(blog_posts::get_published_posts))
            )
            .service(
                web::resource("/search")
                    .route(web::get().to(blog_posts::search_posts))
            )
            .service(
                web::resource("/tag/{tag}")
                    .route(web::get().to(blog_posts::get_posts_by_tag))
            )
            .service(
                web::resource("/{slug}")
                    .route(web::get().to(blog_posts::get_post_by_slug))
            )
            .service(
                web::resource("/{slug}/comments")
                    .route(web::get().to(comments::get_comments_for_post))
                    .route(web::post().to(comments::submit_comment))
            )
    );

    cfg.service(
        web::scope("/reviews")
            .service(
                web::resource("")
                    .route(web::get().to(reviews::get_published_reviews))
            )
            .service(
                web::resource("/featured")
                    .route(web::get().to(reviews::get_featured_reviews))
            )
    );

    cfg.service(
        web::scope("/partners")
            .service(
                web::resource("")
                    .route(web::get().to(partners::get_published_partners))
            )
            .service(
                web::resource("/featured")
                    .route(web::get().to(partners::get_featured_partners))
            )
    );
}
