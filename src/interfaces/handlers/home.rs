use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Agency content API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "projects": "/api/v1/projects",
            "blog": "/api/v1/blog/posts",
            "reviews": "/api/v1/reviews",
            "partners": "/api/v1/partners",
            "sitemap": "/sitemap.xml"
        }
    }))
}
