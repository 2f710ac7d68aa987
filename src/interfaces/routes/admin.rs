use actix_web::web;

use crate::handlers::{blog_posts, comments, partners, projects, reviews, system::admin_health_check};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(admin_health_check);

    cfg.service(
        web::scope("/content")
            .service(
                web::scope("/projects")
                    .service(
                        web::resource("")
                            .route(web::get().to(projects::admin_list_projects))
                            .route(web::post().to(projects::create_project))
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(projects::admin_get_project))
                            .route(web::patch().to(projects::update_project))
                            .route(web::delete().to(projects::delete_project))
                    )
                    .service(
                        web::resource("/{id}/publish")
                            .route(web::post().to(projects::toggle_project_publish))
                    )
                    .service(
                        web::resource("/{id}/feature")
                            .route(web::post().to(projects::toggle_project_feature))
                    )
            )
            .service(
                web::scope("/blog/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(blog_posts::admin_list_posts))
                            .route(web::post().to(blog_posts::create_post))
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(blog_posts::admin_get_post))
                            .route(web::patch().to(blog_posts::update_post))
                            .route(web::delete().to(blog_posts::delete_post))
                    )
                    .service(
                        web::resource("/{id}/publish")
                            .route(web::post().to(blog_posts::toggle_post_publish))
                    )
            )
            .service(
                web::scope("/reviews")
                    .service(
                        web::resource("")
                            .route(web::get().to(reviews::admin_list_reviews))
                            .route(web::post().to(reviews::create_review))
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(reviews::admin_get_review))
                            .route(web::patch().to(reviews::update_review))
                            .route(web::delete().to(reviews::delete_review))
                    )
                    .service(
                        web::resource("/{id}/publish")
                            .route(web::post().to(reviews::toggle_review_publish))
                    )
                    .service(
                        web::resource("/{id}/feature")
                            .route(web::post().to(reviews::toggle_review_feature))
                    )
            )
            .service(
                web::scope("/partners")
                    .service(
                        web::resource("")
                            .route(web::get().to(partners::admin_list_partners))
                            .route(web::post().to(partners::create_partner))
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(partners::admin_get_partner))
                            .route(web::patch().to(partners::update_partner))
                            .route(web::delete().to(partners::delete_partner))
                    )
                    .service(
                        web::resource("/{id}/publish")
                            .route(web::post().to(partners::toggle_partner_publish))
                    )
                    .service(
                        web::resource("/{id}/feature")
                            .route(web::post().to(partners::toggle_partner_feature))
                    )
            )
            .service(
                web::scope("/comments")
                    .service(
                        web::resource("")
                            .route(web::get().to(comments::admin_list_comments))
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::delete().to(comments::delete_comment))
                    )
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::post().to(comments::approve_comment))
                    )
            )
    );
}
