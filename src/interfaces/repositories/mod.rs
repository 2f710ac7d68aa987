pub mod blog_post;
pub mod comment;
pub mod partner;
pub mod project;
pub mod review;
pub mod sqlx_repo;
