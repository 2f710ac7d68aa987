use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::{
    entities::comment::{BlogComment, CommentInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxCommentRepo,
};

#[automock]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: &CommentInsert) -> Result<BlogComment, AppError>;
    async fn list_approved_for_post(&self, post_slug: &str) -> Result<Vec<BlogComment>, AppError>;
    async fn list_all(&self) -> Result<Vec<BlogComment>, AppError>;
    async fn list_pending(&self) -> Result<Vec<BlogComment>, AppError>;
    async fn approve(&self, id: i64) -> Result<Option<BlogComment>, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

impl SqlxCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxCommentRepo { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepo {
    async fn insert(&self, comment: &CommentInsert) -> Result<BlogComment, AppError> {
        // New comments are held for review: is_approved defaults to FALSE
        let created = sqlx::query_as::<_, BlogComment>(
            r#"
            INSERT INTO blog_comments (post_slug, name, email, website, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#
        )
        .bind(&comment.post_slug)
        .bind(&comment.name)
        .bind(&comment.email)
        .bind(&comment.website)
        .bind(&comment.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_approved_for_post(&self, post_slug: &str) -> Result<Vec<BlogComment>, AppError> {
        let comments = sqlx::query_as::<_, BlogComment>(
            "SELECT * FROM blog_comments WHERE post_slug = $1 AND is_approved = TRUE ORDER BY created_at ASC"
        )
        .bind(post_slug)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn list_all(&self) -> Result<Vec<BlogComment>, AppError> {
        let comments = sqlx::query_as::<_, BlogComment>(
            "SELECT * FROM blog_comments ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn list_pending(&self) -> Result<Vec<BlogComment>, AppError> {
        let comments = sqlx::query_as::<_, BlogComment>(
            "SELECT * FROM blog_comments WHERE is_approved = FALSE ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn approve(&self, id: i64) -> Result<Option<BlogComment>, AppError> {
        let comment = sqlx::query_as::<_, BlogComment>(
            "UPDATE blog_comments SET is_approved = TRUE WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blog_comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Comment not found".into()));
        }

        Ok(())
    }
}
