use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Static marketing pages enumerated in the sitemap, relative to the site base URL.
pub const STATIC_PAGES: &[(&str, &str, &str)] = &[
    ("", "monthly", "1.0"),
    ("/about", "monthly", "0.8"),
    ("/case-studies", "weekly", "0.9"),
    ("/blog", "weekly", "0.8"),
    ("/contact", "monthly", "0.7"),
];

pub const MAX_RATING: i32 = 5;
pub const MIN_RATING: i32 = 1;
