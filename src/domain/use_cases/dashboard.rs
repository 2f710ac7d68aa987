use parking_lot::RwLock;

use crate::entities::{
    blog_post::BlogPost, partner::TrustedPartner, project::Project, review::ClientReview,
};

pub trait HasId {
    fn id(&self) -> i64;
}

impl HasId for Project {
    fn id(&self) -> i64 {
        self.id
    }
}

impl HasId for BlogPost {
    fn id(&self) -> i64 {
        self.id
    }
}

impl HasId for ClientReview {
    fn id(&self) -> i64 {
        self.id
    }
}

impl HasId for TrustedPartner {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Disposable editor-side view of one content collection. The store stays
/// authoritative: the cache is rebuilt from a full load and kept in sync only
/// by patching in each mutation's confirmed outcome. Callers must not patch
/// on failure, which keeps the cache identical to its pre-mutation state for
/// a retry.
pub struct CollectionCache<T> {
    rows: RwLock<Option<Vec<T>>>,
}

impl<T> Default for CollectionCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CollectionCache<T> {
    pub fn new() -> Self {
        CollectionCache {
            rows: RwLock::new(None),
        }
    }
}

impl<T: HasId + Clone> CollectionCache<T> {
    pub fn is_loaded(&self) -> bool {
        self.rows.read().is_some()
    }

    /// Replaces the whole collection with a fresh load.
    pub fn load(&self, rows: Vec<T>) {
        *self.rows.write() = Some(rows);
    }

    pub fn invalidate(&self) {
        *self.rows.write() = None;
    }

    /// Cloned view of the collection; empty when the cache is cold.
    pub fn snapshot(&self) -> Vec<T> {
        self.rows.read().clone().unwrap_or_default()
    }

    /// Patch rule for create: append the store-returned row (it carries the
    /// assigned id and timestamps the request payload lacked).
    pub fn apply_created(&self, row: T) {
        if let Some(rows) = self.rows.write().as_mut() {
            rows.push(row);
        }
    }

    /// Patch rule for update and toggle: replace the row with a matching id.
    pub fn apply_updated(&self, row: T) {
        if let Some(rows) = self.rows.write().as_mut() {
            for existing in rows.iter_mut() {
                if existing.id() == row.id() {
                    *existing = row;
                    break;
                }
            }
        }
    }

    /// Patch rule for delete: drop the row with a matching id.
    pub fn apply_removed(&self, id: i64) {
        if let Some(rows) = self.rows.write().as_mut() {
            rows.retain(|row| row.id() != id);
        }
    }
}

/// One cache per content type; types never lock each other.
#[derive(Default)]
pub struct DashboardState {
    pub projects: CollectionCache<Project>,
    pub posts: CollectionCache<BlogPost>,
    pub reviews: CollectionCache<ClientReview>,
    pub partners: CollectionCache<TrustedPartner>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }
}

// ───── Client-side view filtering ───────────────────────────────────
//
// Pure functions over the cached collection; recomputed per request and
// never persisted.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Published,
    Draft,
}

impl StatusFilter {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "published" => StatusFilter::Published,
            "draft" => StatusFilter::Draft,
            _ => StatusFilter::All,
        }
    }

    fn matches(&self, is_published: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Published => is_published,
            StatusFilter::Draft => !is_published,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    pub search: String,
    pub category: Option<String>,
    pub status: StatusFilter,
}

impl ContentFilter {
    fn search_matches(&self, haystacks: &[&str]) -> bool {
        if self.search.trim().is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
    }

    fn category_matches(&self, candidate: Option<&str>) -> bool {
        match self.category.as_deref() {
            None | Some("All") => true,
            Some(wanted) => candidate == Some(wanted),
        }
    }
}

pub fn project_matches(filter: &ContentFilter, project: &Project) -> bool {
    let mut haystacks: Vec<&str> = vec![&project.title, &project.description];
    haystacks.extend(project.technology.iter().map(String::as_str));

    filter.search_matches(&haystacks)
        && filter.category_matches(Some(project.category.as_str()))
        && filter.status.matches(project.is_published)
}

pub fn post_matches(filter: &ContentFilter, post: &BlogPost) -> bool {
    filter.search_matches(&[&post.title, &post.excerpt])
        && filter.status.matches(post.is_published)
}

pub fn review_matches(filter: &ContentFilter, review: &ClientReview) -> bool {
    let mut haystacks: Vec<&str> = vec![&review.review_text];
    if let Some(name) = review.client_name.as_deref() {
        haystacks.push(name);
    }
    if let Some(company) = review.client_company.as_deref() {
        haystacks.push(company);
    }

    filter.search_matches(&haystacks)
        && filter.category_matches(review.project_category.as_deref())
        && filter.status.matches(review.is_published)
}

pub fn partner_matches(filter: &ContentFilter, partner: &TrustedPartner) -> bool {
    let mut haystacks: Vec<&str> = vec![&partner.company_name];
    if let Some(description) = partner.description.as_deref() {
        haystacks.push(description);
    }

    filter.search_matches(&haystacks)
        && filter.category_matches(partner.partnership_type.as_deref())
        && filter.status.matches(partner.is_published)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn project(id: i64, title: &str, published: bool) -> Project {
        Project {
            id,
            title: title.to_string(),
            slug: crate::slugs::slugify(title),
            category: "Web Development".into(),
            technology: vec!["Rust".into(), "PostgreSQL".into()],
            description: "Telemetry dashboard".into(),
            long_description: None,
            challenge: None,
            solution: None,
            results: vec![],
            features: vec![],
            images: vec![],
            duration: None,
            team_size: 2,
            client_type: None,
            live_url: None,
            github_url: None,
            is_published: published,
            is_featured: false,
            testimonial: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn cold_cache_is_empty_and_ignores_patches() {
        let cache = CollectionCache::<Project>::new();
        assert!(!cache.is_loaded());
        cache.apply_created(project(1, "Orphan", false));
        assert!(cache.snapshot().is_empty());
    }

    #[test]
    fn create_appends_and_update_replaces_by_id() {
        let cache = CollectionCache::new();
        cache.load(vec![project(1, "Alpha", true)]);

        cache.apply_created(project(2, "Beta", false));
        assert_eq!(cache.snapshot().len(), 2);

        let mut renamed = project(2, "Beta Renamed", false);
        renamed.is_published = true;
        cache.apply_updated(renamed);

        let rows = cache.snapshot();
        let beta = rows.iter().find(|p| p.id == 2).unwrap();
        assert_eq!(beta.title, "Beta Renamed");
        assert!(beta.is_published);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn remove_drops_only_the_matching_row() {
        let cache = CollectionCache::new();
        cache.load(vec![project(1, "Alpha", true), project(2, "Beta", false)]);
        cache.apply_removed(1);

        let rows = cache.snapshot();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);
    }

    #[test]
    fn reload_discards_local_patches() {
        let cache = CollectionCache::new();
        cache.load(vec![project(1, "Alpha", true)]);
        cache.apply_created(project(2, "Beta", false));

        cache.load(vec![project(1, "Alpha", true)]);
        assert_eq!(cache.snapshot().len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_technology() {
        let filter = ContentFilter {
            search: "postgres".into(),
            ..Default::default()
        };
        assert!(project_matches(&filter, &project(1, "Alpha", true)));

        let miss = ContentFilter {
            search: "kubernetes".into(),
            ..Default::default()
        };
        assert!(!project_matches(&miss, &project(1, "Alpha", true)));
    }

    #[test]
    fn status_filter_distinguishes_drafts() {
        let drafts = ContentFilter {
            status: StatusFilter::Draft,
            ..Default::default()
        };
        assert!(project_matches(&drafts, &project(1, "Alpha", false)));
        assert!(!project_matches(&drafts, &project(1, "Alpha", true)));
    }

    #[test]
    fn category_all_matches_everything() {
        let filter = ContentFilter {
            category: Some("All".into()),
            ..Default::default()
        };
        assert!(project_matches(&filter, &project(1, "Alpha", true)));

        let specific = ContentFilter {
            category: Some("Mobile".into()),
            ..Default::default()
        };
        assert!(!project_matches(&specific, &project(1, "Alpha", true)));
    }
}
