use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    entities::{
        option_fields::OptionField,
        validation::{
            new_validation_error, validate_optional_slug, validate_optional_tags,
            validate_optional_title, validate_optional_url_field, validate_tags,
            validate_title, validate_url,
        },
    },
    slugs,
    utils::markdown::{safe_markdown_to_html, sanitize_markdown_content},
};

const MIN_TITLE_LENGTH: u64 = 3;
const MAX_TITLE_LENGTH: u64 = 120;
const MIN_SLUG_LENGTH: u64 = 3;
const MIN_EXCERPT_LENGTH: u64 = 10;
const MAX_EXCERPT_LENGTH: u64 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToAction {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub button_link: String,
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, sqlx::FromRow)]
pub struct BlogPostRow {
    pub id: i64,
    pub title: String,
    // NULL for rows imported before the slug column was backfilled
    pub slug: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub author: String,
    pub date: NaiveDate,
    pub is_published: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub faqs: Json<Vec<Faq>>,
    pub cta: Option<Json<CallToAction>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub author: String,
    pub date: NaiveDate,
    pub is_published: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub faqs: Vec<Faq>,
    pub cta: Option<CallToAction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogPostRow> for BlogPost {
    fn from(row: BlogPostRow) -> Self {
        BlogPost {
            id: row.id,
            title: row.title,
            slug: row.slug.unwrap_or_default(),
            excerpt: row.excerpt,
            content: row.content,
            image: row.image,
            tags: row.tags,
            author: row.author,
            date: row.date,
            is_published: row.is_published,
            seo_title: row.seo_title,
            seo_description: row.seo_description,
            faqs: row.faqs.0,
            cta: row.cta.map(|c| c.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BlogPostListResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub author: String,
    pub date: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BlogPostDetailResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content_html: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub author: String,
    pub date: NaiveDate,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub faqs: Vec<Faq>,
    pub cta: Option<CallToAction>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn to_list_response(&self) -> BlogPostListResponse {
        BlogPostListResponse {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            image: self.image.clone(),
            tags: self.tags.clone(),
            author: self.author.clone(),
            date: self.date,
            updated_at: self.updated_at,
        }
    }

    pub fn to_detail_response(&self) -> BlogPostDetailResponse {
        BlogPostDetailResponse {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            content_html: safe_markdown_to_html(&self.content),
            image: self.image.clone(),
            tags: self.tags.clone(),
            author: self.author.clone(),
            date: self.date,
            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),
            faqs: self.faqs.clone(),
            cta: self.cta.clone(),
            updated_at: self.updated_at,
        }
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct NewBlogPostRequest {
    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(custom(function = "validate_new_slug"))]
    pub slug: Option<String>,

    #[validate(length(min = MIN_EXCERPT_LENGTH, max = MAX_EXCERPT_LENGTH))]
    pub excerpt: String,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    #[validate(custom(function = "validate_url"))]
    pub image: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,

    #[serde(default = "default_author")]
    pub author: String,

    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub is_published: bool,

    #[validate(length(max = MAX_TITLE_LENGTH))]
    pub seo_title: Option<String>,

    #[validate(length(max = MAX_EXCERPT_LENGTH))]
    pub seo_description: Option<String>,

    #[serde(default)]
    pub faqs: Vec<Faq>,

    pub cta: Option<CallToAction>,
}

fn default_author() -> String {
    "Editorial Team".to_string()
}

#[derive(Debug)]
pub struct BlogPostInsert {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub author: String,
    pub date: NaiveDate,
    pub is_published: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub faqs: Vec<Faq>,
    pub cta: Option<CallToAction>,
}

impl TryFrom<NewBlogPostRequest> for BlogPostInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewBlogPostRequest) -> Result<Self, Self::Error> {
        value.validate()?;
        let sanitized_content = sanitize_markdown_content(&value.content);

        // Generate slug if not provided
        let slug = match value.slug {
            Some(s) if !s.trim().is_empty() => s,
            _ => {
                let generated = slugs::slugify(&value.title);
                if generated.len() < MIN_SLUG_LENGTH as usize {
                    let mut errors = ValidationErrors::new();
                    errors.add("slug", new_validation_error(
                        "slug_too_short",
                        "Generated slug is too short; please provide a custom slug",
                    ));
                    return Err(errors);
                }
                generated
            }
        };

        Ok(BlogPostInsert {
            title: value.title,
            slug,
            excerpt: value.excerpt,
            content: sanitized_content,
            image: value.image,
            tags: value.tags,
            author: value.author,
            date: value.date.unwrap_or_else(|| Utc::now().date_naive()),
            is_published: value.is_published,
            seo_title: value.seo_title,
            seo_description: value.seo_description,
            faqs: value.faqs,
            cta: value.cta,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateBlogPostRequest {
    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_optional_title")
    )]
    pub title: OptionField<String>,

    #[validate(custom(function = "validate_optional_slug"))]
    pub slug: OptionField<String>,

    #[validate(length(min = MIN_EXCERPT_LENGTH, max = MAX_EXCERPT_LENGTH))]
    pub excerpt: OptionField<String>,

    pub content: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub image: OptionField<String>,

    #[validate(custom(function = "validate_optional_tags"))]
    pub tags: OptionField<Vec<String>>,

    pub author: OptionField<String>,
    pub date: OptionField<NaiveDate>,
    pub is_published: OptionField<bool>,

    #[validate(length(max = MAX_TITLE_LENGTH))]
    pub seo_title: OptionField<String>,

    #[validate(length(max = MAX_EXCERPT_LENGTH))]
    pub seo_description: OptionField<String>,

    pub faqs: OptionField<Vec<Faq>>,
    pub cta: OptionField<CallToAction>,
}

fn validate_new_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.trim().is_empty() {
        return Ok(());
    }
    crate::entities::validation::validate_slug(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_request(title: &str, slug: Option<&str>) -> NewBlogPostRequest {
        NewBlogPostRequest {
            title: title.to_string(),
            slug: slug.map(str::to_string),
            excerpt: "A short introduction to the post.".into(),
            content: "# Heading\n\nBody text.".into(),
            image: None,
            tags: vec!["rust".into()],
            author: default_author(),
            date: None,
            is_published: false,
            seo_title: None,
            seo_description: None,
            faqs: vec![],
            cta: None,
        }
    }

    #[test]
    fn derives_slug_from_title() {
        let insert = BlogPostInsert::try_from(minimal_request("My First Post!!", None)).unwrap();
        assert_eq!(insert.slug, "my-first-post");
    }

    #[test]
    fn explicit_slug_is_kept_verbatim() {
        let insert = BlogPostInsert::try_from(minimal_request("My First Post!!", Some("launch-notes"))).unwrap();
        assert_eq!(insert.slug, "launch-notes");
    }

    #[test]
    fn too_short_generated_slug_is_rejected() {
        let err = BlogPostInsert::try_from(minimal_request("Hi!", None)).unwrap_err();
        assert!(err.field_errors().contains_key("slug"));
    }

    #[test]
    fn content_is_sanitized_on_insert() {
        let mut request = minimal_request("Escaping Markdown", None);
        request.content = "hello <script>alert(1)</script> world".into();
        let insert = BlogPostInsert::try_from(request).unwrap();
        assert!(!insert.content.contains("<script>"));
    }
}
