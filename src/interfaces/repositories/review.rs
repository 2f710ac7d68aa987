use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, QueryBuilder};

use crate::{
    entities::review::{ClientReview, NewReviewRequest, UpdateReviewRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxReviewRepo,
};

#[automock]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<ClientReview>, AppError>;
    async fn list_published(&self) -> Result<Vec<ClientReview>, AppError>;
    async fn list_featured(&self) -> Result<Vec<ClientReview>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<ClientReview>, AppError>;
    async fn insert(&self, review: &NewReviewRequest) -> Result<ClientReview, AppError>;
    async fn update(&self, id: i64, patch: &UpdateReviewRequest) -> Result<Option<ClientReview>, AppError>;
    async fn publish_flag(&self, id: i64) -> Result<Option<bool>, AppError>;
    async fn set_publish_flag(&self, id: i64, value: bool) -> Result<Option<ClientReview>, AppError>;
    async fn featured_flag(&self, id: i64) -> Result<Option<bool>, AppError>;
    async fn set_featured_flag(&self, id: i64, value: bool) -> Result<Option<ClientReview>, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

impl SqlxReviewRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxReviewRepo { pool }
    }
}

#[async_trait]
impl ReviewRepository for SqlxReviewRepo {
    async fn list_all(&self) -> Result<Vec<ClientReview>, AppError> {
        let reviews = sqlx::query_as::<_, ClientReview>(
            "SELECT * FROM client_reviews ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn list_published(&self) -> Result<Vec<ClientReview>, AppError> {
        // Best-rated first, ties broken by recency (matches public display order)
        let reviews = sqlx::query_as::<_, ClientReview>(
            "SELECT * FROM client_reviews WHERE is_published = TRUE ORDER BY rating DESC, created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn list_featured(&self) -> Result<Vec<ClientReview>, AppError> {
        let reviews = sqlx::query_as::<_, ClientReview>(
            "SELECT * FROM client_reviews WHERE is_published = TRUE AND is_featured = TRUE ORDER BY rating DESC, created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ClientReview>, AppError> {
        let review = sqlx::query_as::<_, ClientReview>(
            "SELECT * FROM client_reviews WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    async fn insert(&self, review: &NewReviewRequest) -> Result<ClientReview, AppError> {
        let created = sqlx::query_as::<_, ClientReview>(
            r#"
            INSERT INTO client_reviews (
                testimonial_type, client_name, client_position, client_company,
                client_image, review_text, rating, project_category, is_featured, is_published
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#
        )
        .bind(review.testimonial_type)
        .bind(&review.client_name)
        .bind(&review.client_position)
        .bind(&review.client_company)
        .bind(&review.client_image)
        .bind(&review.review_text)
        .bind(review.rating)
        .bind(&review.project_category)
        .bind(review.is_featured)
        .bind(review.is_published)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: i64, patch: &UpdateReviewRequest) -> Result<Option<ClientReview>, AppError> {
        let mut builder = QueryBuilder::new("UPDATE client_reviews SET updated_at = NOW()");

        if let Some(kind) = patch.testimonial_type.flatten_ref() {
            builder.push(", testimonial_type = ").push_bind(*kind);
        }
        if let Some(value) = patch.client_name.as_ref_option() {
            builder.push(", client_name = ").push_bind(value.cloned());
        }
        if let Some(value) = patch.client_position.as_ref_option() {
            builder.push(", client_position = ").push_bind(value.cloned());
        }
        if let Some(value) = patch.client_company.as_ref_option() {
            builder.push(", client_company = ").push_bind(value.cloned());
        }
        if let Some(value) = patch.client_image.as_ref_option() {
            builder.push(", client_image = ").push_bind(value.cloned());
        }
        if let Some(text) = patch.review_text.flatten_ref() {
            builder.push(", review_text = ").push_bind(text.clone());
        }
        if let Some(rating) = patch.rating.flatten_ref() {
            builder.push(", rating = ").push_bind(*rating);
        }
        if let Some(value) = patch.project_category.as_ref_option() {
            builder.push(", project_category = ").push_bind(value.cloned());
        }
        if let Some(featured) = patch.is_featured.flatten_bool() {
            builder.push(", is_featured = ").push_bind(featured);
        }
        if let Some(published) = patch.is_published.flatten_bool() {
            builder.push(", is_published = ").push_bind(published);
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING *");

        let review = builder
            .build_query_as::<ClientReview>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(review)
    }

    async fn publish_flag(&self, id: i64) -> Result<Option<bool>, AppError> {
        let flag = sqlx::query_scalar::<_, bool>(
            "SELECT is_published FROM client_reviews WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flag)
    }

    async fn set_publish_flag(&self, id: i64, value: bool) -> Result<Option<ClientReview>, AppError> {
        let review = sqlx::query_as::<_, ClientReview>(
            "UPDATE client_reviews SET is_published = $2, updated_at = NOW() WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    async fn featured_flag(&self, id: i64) -> Result<Option<bool>, AppError> {
        let flag = sqlx::query_scalar::<_, bool>(
            "SELECT is_featured FROM client_reviews WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flag)
    }

    async fn set_featured_flag(&self, id: i64, value: bool) -> Result<Option<ClientReview>, AppError> {
        let review = sqlx::query_as::<_, ClientReview>(
            "UPDATE client_reviews SET is_featured = $2, updated_at = NOW() WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM client_reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Review not found".into()));
        }

        Ok(())
    }
}
