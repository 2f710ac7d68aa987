use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    entities::{
        option_fields::OptionField,
        validation::{
            new_validation_error, validate_optional_slug, validate_optional_title,
            validate_optional_url_field, validate_title, validate_url,
        },
    },
    slugs,
};

const MIN_TITLE_LENGTH: u64 = 3;
const MAX_TITLE_LENGTH: u64 = 120;
const MAX_DESCRIPTION_LENGTH: u64 = 500;

/// One entry of a project's ordered image gallery. Stored as JSONB; the `id`
/// is local to the containing project, not a store key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectImage {
    pub id: i64,
    pub url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTestimonial {
    pub quote: String,
    pub author: String,
    pub position: String,
    pub company: String,
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub title: String,
    // NULL for rows imported before the slug column was backfilled
    pub slug: Option<String>,
    pub category: String,
    pub technology: Vec<String>,
    pub description: String,
    pub long_description: Option<String>,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub results: Vec<String>,
    pub features: Vec<String>,
    pub images: Json<Vec<ProjectImage>>,
    pub duration: Option<String>,
    pub team_size: i32,
    pub client_type: Option<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub is_published: bool,
    pub is_featured: bool,
    pub testimonial: Option<Json<ProjectTestimonial>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub technology: Vec<String>,
    pub description: String,
    pub long_description: Option<String>,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub results: Vec<String>,
    pub features: Vec<String>,
    pub images: Vec<ProjectImage>,
    pub duration: Option<String>,
    pub team_size: i32,
    pub client_type: Option<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub is_published: bool,
    pub is_featured: bool,
    pub testimonial: Option<ProjectTestimonial>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            title: row.title,
            slug: row.slug.unwrap_or_default(),
            category: row.category,
            technology: row.technology,
            description: row.description,
            long_description: row.long_description,
            challenge: row.challenge,
            solution: row.solution,
            results: row.results,
            features: row.features,
            images: row.images.0,
            duration: row.duration,
            team_size: row.team_size,
            client_type: row.client_type,
            live_url: row.live_url,
            github_url: row.github_url,
            is_published: row.is_published,
            is_featured: row.is_featured,
            testimonial: row.testimonial.map(|t| t.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct NewProjectRequest {
    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(custom(function = "validate_new_slug"))]
    pub slug: Option<String>,

    #[validate(length(min = 1, max = 60))]
    pub category: String,

    #[serde(default)]
    pub technology: Vec<String>,

    #[validate(length(min = 1, max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,

    pub long_description: Option<String>,
    pub challenge: Option<String>,
    pub solution: Option<String>,

    #[serde(default)]
    pub results: Vec<String>,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_images"))]
    pub images: Vec<ProjectImage>,

    pub duration: Option<String>,

    #[serde(default = "default_team_size")]
    #[validate(range(min = 1))]
    pub team_size: i32,

    pub client_type: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub live_url: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub github_url: Option<String>,

    #[serde(default)]
    pub is_published: bool,

    #[serde(default)]
    pub is_featured: bool,

    pub testimonial: Option<ProjectTestimonial>,
}

fn default_team_size() -> i32 {
    1
}

#[derive(Debug)]
pub struct ProjectInsert {
    pub title: String,
    pub slug: String,
    pub category: String,
    pub technology: Vec<String>,
    pub description: String,
    pub long_description: Option<String>,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub results: Vec<String>,
    pub features: Vec<String>,
    pub images: Vec<ProjectImage>,
    pub duration: Option<String>,
    pub team_size: i32,
    pub client_type: Option<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub is_published: bool,
    pub is_featured: bool,
    pub testimonial: Option<ProjectTestimonial>,
}

impl TryFrom<NewProjectRequest> for ProjectInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewProjectRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let slug = match value.slug {
            Some(s) if !s.trim().is_empty() => s,
            _ => slugs::slugify(&value.title),
        };

        Ok(ProjectInsert {
            title: value.title,
            slug,
            category: value.category,
            technology: value.technology,
            description: value.description,
            long_description: value.long_description,
            challenge: value.challenge,
            solution: value.solution,
            results: value.results,
            features: value.features,
            images: value.images,
            duration: value.duration,
            team_size: value.team_size,
            client_type: value.client_type,
            live_url: value.live_url,
            github_url: value.github_url,
            is_published: value.is_published,
            is_featured: value.is_featured,
            testimonial: value.testimonial,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProjectRequest {
    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_optional_title")
    )]
    pub title: OptionField<String>,

    #[validate(custom(function = "validate_optional_slug"))]
    pub slug: OptionField<String>,

    #[validate(length(min = 1, max = 60))]
    pub category: OptionField<String>,

    pub technology: OptionField<Vec<String>>,

    #[validate(length(min = 1, max = MAX_DESCRIPTION_LENGTH))]
    pub description: OptionField<String>,

    pub long_description: OptionField<String>,
    pub challenge: OptionField<String>,
    pub solution: OptionField<String>,
    pub results: OptionField<Vec<String>>,
    pub features: OptionField<Vec<String>>,

    #[validate(custom(function = "validate_optional_images"))]
    pub images: OptionField<Vec<ProjectImage>>,

    pub duration: OptionField<String>,
    pub team_size: OptionField<i32>,
    pub client_type: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub live_url: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub github_url: OptionField<String>,

    pub is_published: OptionField<bool>,
    pub is_featured: OptionField<bool>,
    pub testimonial: OptionField<ProjectTestimonial>,
}

fn validate_new_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.trim().is_empty() {
        return Ok(());
    }
    crate::entities::validation::validate_slug(slug)
}

fn validate_images(images: &[ProjectImage]) -> Result<(), ValidationError> {
    for image in images {
        if image.url.trim().is_empty() {
            return Err(new_validation_error("image_url_empty", "Image URL cannot be empty"));
        }
    }
    Ok(())
}

fn validate_optional_images(value: &OptionField<Vec<ProjectImage>>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(images) = value {
        validate_images(images)?;
    }
    Ok(())
}

// ───── Image gallery editing ────────────────────────────────────────
//
// Local ids are assigned as max(existing ids) + 1, so removing and re-adding
// images within one editing session cannot collide.

pub fn append_image(images: &mut Vec<ProjectImage>, url: String, alt: String, caption: Option<String>) -> i64 {
    let id = images.iter().map(|img| img.id).max().unwrap_or(0).max(0) + 1;
    images.push(ProjectImage { id, url, alt, caption });
    id
}

#[derive(Debug, Clone)]
pub enum ImageField {
    Url(String),
    Alt(String),
    Caption(Option<String>),
}

/// Edits one field of the image at `index`; false when the index is out of range.
pub fn set_image_field(images: &mut [ProjectImage], index: usize, field: ImageField) -> bool {
    let Some(image) = images.get_mut(index) else {
        return false;
    };
    match field {
        ImageField::Url(url) => image.url = url,
        ImageField::Alt(alt) => image.alt = alt,
        ImageField::Caption(caption) => image.caption = caption,
    }
    true
}

/// Removes the image at `index`; false when the index is out of range.
pub fn remove_image(images: &mut Vec<ProjectImage>, index: usize) -> bool {
    if index >= images.len() {
        return false;
    }
    images.remove(index);
    true
}
