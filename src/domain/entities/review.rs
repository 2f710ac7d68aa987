use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    constants::{MAX_RATING, MIN_RATING},
    entities::{
        option_fields::OptionField,
        validation::{new_validation_error, validate_optional_url_field, validate_url},
    },
};

/// Identified reviews display the client's name and company; anonymous ones
/// must render without either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "testimonial_kind", rename_all = "lowercase")]
pub enum TestimonialType {
    Identified,
    Anonymous,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClientReview {
    pub id: i64,
    pub testimonial_type: TestimonialType,
    pub client_name: Option<String>,
    pub client_position: Option<String>,
    pub client_company: Option<String>,
    pub client_image: Option<String>,
    pub review_text: String,
    pub rating: i32,
    pub project_category: Option<String>,
    pub is_featured: bool,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_review_identity"))]
pub struct NewReviewRequest {
    pub testimonial_type: TestimonialType,

    #[validate(length(min = 2, max = 100))]
    pub client_name: Option<String>,

    #[validate(length(max = 100))]
    pub client_position: Option<String>,

    #[validate(length(max = 100))]
    pub client_company: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub client_image: Option<String>,

    #[validate(length(min = 10, max = 2000))]
    pub review_text: String,

    #[validate(custom(function = "validate_rating"))]
    pub rating: i32,

    #[validate(length(max = 60))]
    pub project_category: Option<String>,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub is_published: bool,
}

/// Identified reviews must carry both a client name and a client company.
fn validate_review_identity(request: &NewReviewRequest) -> Result<(), ValidationError> {
    if request.testimonial_type == TestimonialType::Identified {
        let has_name = request.client_name.as_deref().is_some_and(|n| !n.trim().is_empty());
        let has_company = request.client_company.as_deref().is_some_and(|c| !c.trim().is_empty());
        if !has_name || !has_company {
            return Err(new_validation_error(
                "identified_review_incomplete",
                "Identified reviews require client_name and client_company",
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateReviewRequest {
    pub testimonial_type: OptionField<TestimonialType>,

    #[validate(length(min = 2, max = 100))]
    pub client_name: OptionField<String>,

    #[validate(length(max = 100))]
    pub client_position: OptionField<String>,

    #[validate(length(max = 100))]
    pub client_company: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub client_image: OptionField<String>,

    #[validate(length(min = 10, max = 2000))]
    pub review_text: OptionField<String>,

    #[validate(custom(function = "validate_optional_rating"))]
    pub rating: OptionField<i32>,

    #[validate(length(max = 60))]
    pub project_category: OptionField<String>,

    pub is_featured: OptionField<bool>,
    pub is_published: OptionField<bool>,
}

fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(new_validation_error("rating_out_of_range", "Rating must be between 1 and 5"));
    }
    Ok(())
}

fn validate_optional_rating(value: &OptionField<i32>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(rating) = value {
        validate_rating(*rating)?;
    }
    Ok(())
}
