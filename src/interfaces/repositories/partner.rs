use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, QueryBuilder};

use crate::{
    entities::partner::{NewPartnerRequest, TrustedPartner, UpdatePartnerRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxPartnerRepo,
};

#[automock]
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<TrustedPartner>, AppError>;
    async fn list_published(&self) -> Result<Vec<TrustedPartner>, AppError>;
    async fn list_featured(&self) -> Result<Vec<TrustedPartner>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<TrustedPartner>, AppError>;
    async fn insert(&self, partner: &NewPartnerRequest) -> Result<TrustedPartner, AppError>;
    async fn update(&self, id: i64, patch: &UpdatePartnerRequest) -> Result<Option<TrustedPartner>, AppError>;
    async fn publish_flag(&self, id: i64) -> Result<Option<bool>, AppError>;
    async fn set_publish_flag(&self, id: i64, value: bool) -> Result<Option<TrustedPartner>, AppError>;
    async fn featured_flag(&self, id: i64) -> Result<Option<bool>, AppError>;
    async fn set_featured_flag(&self, id: i64, value: bool) -> Result<Option<TrustedPartner>, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

impl SqlxPartnerRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxPartnerRepo { pool }
    }
}

#[async_trait]
impl PartnerRepository for SqlxPartnerRepo {
    async fn list_all(&self) -> Result<Vec<TrustedPartner>, AppError> {
        let partners = sqlx::query_as::<_, TrustedPartner>(
            "SELECT * FROM trusted_partners ORDER BY display_order ASC, id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(partners)
    }

    async fn list_published(&self) -> Result<Vec<TrustedPartner>, AppError> {
        let partners = sqlx::query_as::<_, TrustedPartner>(
            "SELECT * FROM trusted_partners WHERE is_published = TRUE ORDER BY display_order ASC, id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(partners)
    }

    async fn list_featured(&self) -> Result<Vec<TrustedPartner>, AppError> {
        let partners = sqlx::query_as::<_, TrustedPartner>(
            "SELECT * FROM trusted_partners WHERE is_published = TRUE AND is_featured = TRUE ORDER BY display_order ASC, id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(partners)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TrustedPartner>, AppError> {
        let partner = sqlx::query_as::<_, TrustedPartner>(
            "SELECT * FROM trusted_partners WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(partner)
    }

    async fn insert(&self, partner: &NewPartnerRequest) -> Result<TrustedPartner, AppError> {
        let created = sqlx::query_as::<_, TrustedPartner>(
            r#"
            INSERT INTO trusted_partners (
                company_name, company_logo, company_website, partnership_type,
                description, is_featured, is_published, display_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#
        )
        .bind(&partner.company_name)
        .bind(&partner.company_logo)
        .bind(&partner.company_website)
        .bind(&partner.partnership_type)
        .bind(&partner.description)
        .bind(partner.is_featured)
        .bind(partner.is_published)
        .bind(partner.display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: i64, patch: &UpdatePartnerRequest) -> Result<Option<TrustedPartner>, AppError> {
        let mut builder = QueryBuilder::new("UPDATE trusted_partners SET updated_at = NOW()");

        if let Some(name) = patch.company_name.flatten_ref() {
            builder.push(", company_name = ").push_bind(name.clone());
        }
        if let Some(logo) = patch.company_logo.flatten_ref() {
            builder.push(", company_logo = ").push_bind(logo.clone());
        }
        if let Some(value) = patch.company_website.as_ref_option() {
            builder.push(", company_website = ").push_bind(value.cloned());
        }
        if let Some(value) = patch.partnership_type.as_ref_option() {
            builder.push(", partnership_type = ").push_bind(value.cloned());
        }
        if let Some(value) = patch.description.as_ref_option() {
            builder.push(", description = ").push_bind(value.cloned());
        }
        if let Some(featured) = patch.is_featured.flatten_bool() {
            builder.push(", is_featured = ").push_bind(featured);
        }
        if let Some(published) = patch.is_published.flatten_bool() {
            builder.push(", is_published = ").push_bind(published);
        }
        if let Some(order) = patch.display_order.flatten_ref() {
            builder.push(", display_order = ").push_bind(*order);
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING *");

        let partner = builder
            .build_query_as::<TrustedPartner>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(partner)
    }

    async fn publish_flag(&self, id: i64) -> Result<Option<bool>, AppError> {
        let flag = sqlx::query_scalar::<_, bool>(
            "SELECT is_published FROM trusted_partners WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flag)
    }

    async fn set_publish_flag(&self, id: i64, value: bool) -> Result<Option<TrustedPartner>, AppError> {
        let partner = sqlx::query_as::<_, TrustedPartner>(
            "UPDATE trusted_partners SET is_published = $2, updated_at = NOW() WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(partner)
    }

    async fn featured_flag(&self, id: i64) -> Result<Option<bool>, AppError> {
        let flag = sqlx::query_scalar::<_, bool>(
            "SELECT is_featured FROM trusted_partners WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flag)
    }

    async fn set_featured_flag(&self, id: i64, value: bool) -> Result<Option<TrustedPartner>, AppError> {
        let partner = sqlx::query_as::<_, TrustedPartner>(
            "UPDATE trusted_partners SET is_featured = $2, updated_at = NOW() WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(partner)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM trusted_partners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Partner not found".into()));
        }

        Ok(())
    }
}
