use validator::Validate;

use crate::{
    entities::comment::{BlogComment, CommentInsert, CommentSubmittedResponse, NewCommentRequest},
    errors::AppError,
    repositories::comment::CommentRepository,
};

pub struct CommentHandler<R>
where
    R: CommentRepository,
{
    pub comment_repo: R,
}

impl<R> CommentHandler<R>
where
    R: CommentRepository,
{
    pub fn new(comment_repo: R) -> Self {
        CommentHandler { comment_repo }
    }

    /// Accepts a reader comment for moderation. The post slug is stored as
    /// given; no referential check against blog_posts.
    pub async fn submit_comment(
        &self,
        post_slug: &str,
        request: NewCommentRequest,
    ) -> Result<CommentSubmittedResponse, AppError> {
        request.validate()?;

        let insert = CommentInsert {
            post_slug: post_slug.to_string(),
            name: request.name,
            email: request.email,
            website: request.website,
            content: request.content,
        };

        let created = self.comment_repo.insert(&insert).await?;

        Ok(CommentSubmittedResponse {
            message: "Thank you for your comment! It has been submitted for review.".to_string(),
            id: created.id,
        })
    }

    pub async fn get_approved_comments(&self, post_slug: &str) -> Result<Vec<BlogComment>, AppError> {
        self.comment_repo.list_approved_for_post(post_slug).await
    }

    pub async fn get_all_comments(&self) -> Result<Vec<BlogComment>, AppError> {
        self.comment_repo.list_all().await
    }

    pub async fn get_pending_comments(&self) -> Result<Vec<BlogComment>, AppError> {
        self.comment_repo.list_pending().await
    }

    pub async fn approve_comment(&self, id: i64) -> Result<BlogComment, AppError> {
        self.comment_repo
            .approve(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".into()))
    }

    pub async fn delete_comment(&self, id: i64) -> Result<(), AppError> {
        self.comment_repo.delete(id).await
    }
}
