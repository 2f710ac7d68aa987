pub mod auth;
pub mod blog_posts;
pub mod comments;
pub mod home;
pub mod partners;
pub mod projects;
pub mod reviews;
pub mod seo;
pub mod system;

use serde::Deserialize;

use crate::use_cases::dashboard::{ContentFilter, StatusFilter};

/// Query parameters shared by the admin list endpoints. `reload` forces a
/// full re-fetch of the dashboard cache from the store.
#[derive(Debug, Default, Deserialize)]
pub struct AdminListQuery {
    #[serde(default)]
    pub search: String,
    pub category: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub reload: bool,
}

impl AdminListQuery {
    pub fn to_filter(&self) -> ContentFilter {
        ContentFilter {
            search: self.search.clone(),
            category: self.category.clone(),
            status: self
                .status
                .as_deref()
                .map(StatusFilter::parse)
                .unwrap_or_default(),
        }
    }
}
