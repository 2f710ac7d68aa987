use validator::Validate;

use crate::{
    entities::review::{ClientReview, NewReviewRequest, UpdateReviewRequest},
    errors::AppError,
    repositories::review::ReviewRepository,
};

pub struct ReviewHandler<R>
where
    R: ReviewRepository,
{
    pub review_repo: R,
}

impl<R> ReviewHandler<R>
where
    R: ReviewRepository,
{
    pub fn new(review_repo: R) -> Self {
        ReviewHandler { review_repo }
    }

    pub async fn get_all_reviews(&self) -> Result<Vec<ClientReview>, AppError> {
        self.review_repo.list_all().await
    }

    pub async fn get_published_reviews(&self) -> Result<Vec<ClientReview>, AppError> {
        self.review_repo.list_published().await
    }

    pub async fn get_featured_reviews(&self) -> Result<Vec<ClientReview>, AppError> {
        self.review_repo.list_featured().await
    }

    pub async fn get_review_by_id(&self, id: i64) -> Result<ClientReview, AppError> {
        self.review_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".into()))
    }

    pub async fn create_review(&self, request: NewReviewRequest) -> Result<ClientReview, AppError> {
        request.validate()?;
        self.review_repo.insert(&request).await
    }

    pub async fn update_review(
        &self,
        id: i64,
        patch: &UpdateReviewRequest,
    ) -> Result<ClientReview, AppError> {
        patch.validate()?;
        self.review_repo
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".into()))
    }

    pub async fn toggle_publish_status(&self, id: i64) -> Result<ClientReview, AppError> {
        let current = self.review_repo
            .publish_flag(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".into()))?;

        self.review_repo
            .set_publish_flag(id, !current)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".into()))
    }

    pub async fn toggle_featured_status(&self, id: i64) -> Result<ClientReview, AppError> {
        let current = self.review_repo
            .featured_flag(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".into()))?;

        self.review_repo
            .set_featured_flag(id, !current)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".into()))
    }

    pub async fn delete_review(&self, id: i64) -> Result<(), AppError> {
        self.review_repo.delete(id).await
    }
}
