use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::validation::validate_url;

/// A reader comment on a blog post. `post_slug` is a loose reference — posts
/// may be renamed or deleted without cascading here. Comments start
/// unapproved and only surface publicly once an editor approves them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogComment {
    pub id: i64,
    pub post_slug: String,
    pub name: String,
    pub email: String,
    pub website: Option<String>,
    pub content: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewCommentRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "validate_url"))]
    pub website: Option<String>,

    #[validate(length(min = 10, max = 2000, message = "Comment must be at least 10 characters long"))]
    pub content: String,
}

/// Column values for a new comment row; `is_approved` and timestamps are
/// store-assigned.
#[derive(Debug)]
pub struct CommentInsert {
    pub post_slug: String,
    pub name: String,
    pub email: String,
    pub website: Option<String>,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CommentSubmittedResponse {
    pub message: String,
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_comments_are_rejected() {
        let request = NewCommentRequest {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            website: None,
            content: "too short".into(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn valid_comment_passes() {
        let request = NewCommentRequest {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            website: Some("https://sam.dev".into()),
            content: "Great writeup, the section on caching was especially useful.".into(),
        };
        assert!(request.validate().is_ok());
    }
}
