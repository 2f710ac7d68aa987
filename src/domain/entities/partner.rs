use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{
    option_fields::OptionField,
    validation::{validate_optional_url_field, validate_url},
};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrustedPartner {
    pub id: i64,
    pub company_name: String,
    pub company_logo: String,
    pub company_website: Option<String>,
    pub partnership_type: Option<String>,
    pub description: Option<String>,
    pub is_featured: bool,
    pub is_published: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewPartnerRequest {
    #[validate(length(min = 1, max = 100))]
    pub company_name: String,

    #[validate(custom(function = "validate_url"))]
    pub company_logo: String,

    #[validate(custom(function = "validate_url"))]
    pub company_website: Option<String>,

    #[validate(length(max = 60))]
    pub partnership_type: Option<String>,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub is_published: bool,

    /// Manual sort position within partner listings.
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdatePartnerRequest {
    #[validate(length(min = 1, max = 100))]
    pub company_name: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub company_logo: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub company_website: OptionField<String>,

    #[validate(length(max = 60))]
    pub partnership_type: OptionField<String>,

    #[validate(length(max = 500))]
    pub description: OptionField<String>,

    pub is_featured: OptionField<bool>,
    pub is_published: OptionField<bool>,
    pub display_order: OptionField<i32>,
}
