use validator::Validate;

use crate::{
    entities::partner::{NewPartnerRequest, TrustedPartner, UpdatePartnerRequest},
    errors::AppError,
    repositories::partner::PartnerRepository,
};

pub struct PartnerHandler<R>
where
    R: PartnerRepository,
{
    pub partner_repo: R,
}

impl<R> PartnerHandler<R>
where
    R: PartnerRepository,
{
    pub fn new(partner_repo: R) -> Self {
        PartnerHandler { partner_repo }
    }

    pub async fn get_all_partners(&self) -> Result<Vec<TrustedPartner>, AppError> {
        self.partner_repo.list_all().await
    }

    pub async fn get_published_partners(&self) -> Result<Vec<TrustedPartner>, AppError> {
        self.partner_repo.list_published().await
    }

    pub async fn get_featured_partners(&self) -> Result<Vec<TrustedPartner>, AppError> {
        self.partner_repo.list_featured().await
    }

    pub async fn get_partner_by_id(&self, id: i64) -> Result<TrustedPartner, AppError> {
        self.partner_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".into()))
    }

    pub async fn create_partner(&self, request: NewPartnerRequest) -> Result<TrustedPartner, AppError> {
        request.validate()?;
        self.partner_repo.insert(&request).await
    }

    pub async fn update_partner(
        &self,
        id: i64,
        patch: &UpdatePartnerRequest,
    ) -> Result<TrustedPartner, AppError> {
        patch.validate()?;
        self.partner_repo
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".into()))
    }

    pub async fn toggle_publish_status(&self, id: i64) -> Result<TrustedPartner, AppError> {
        let current = self.partner_repo
            .publish_flag(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".into()))?;

        self.partner_repo
            .set_publish_flag(id, !current)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".into()))
    }

    pub async fn toggle_featured_status(&self, id: i64) -> Result<TrustedPartner, AppError> {
        let current = self.partner_repo
            .featured_flag(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".into()))?;

        self.partner_repo
            .set_featured_flag(id, !current)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".into()))
    }

    pub async fn delete_partner(&self, id: i64) -> Result<(), AppError> {
        self.partner_repo.delete(id).await
    }
}
