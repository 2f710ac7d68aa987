//! In-memory repository fakes used by the use-case flow tests. They apply
//! the same patch semantics as the Postgres implementations (tri-state
//! OptionField fields, caller-resolved slug) and count round trips so tests
//! can assert how many reads and writes an operation performed.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use agency_cms::entities::blog_post::{BlogPost, BlogPostInsert, UpdateBlogPostRequest};
use agency_cms::entities::project::{Project, ProjectInsert, UpdateProjectRequest};
use agency_cms::errors::AppError;
use agency_cms::repositories::blog_post::BlogPostRepository;
use agency_cms::repositories::project::ProjectRepository;

#[derive(Default)]
pub struct InMemoryProjectRepo {
    rows: Mutex<Vec<Project>>,
    next_id: AtomicI64,
    pub flag_reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl InMemoryProjectRepo {
    pub fn new() -> Self {
        InMemoryProjectRepo {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            flag_reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Seeds a row directly, bypassing insert-time slug derivation — used to
    /// model legacy rows whose slug column was never populated.
    pub fn seed(&self, mut project: Project) -> Project {
        project.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().push(project.clone());
        project
    }
}

fn apply_project_patch(current: &mut Project, patch: &UpdateProjectRequest, resolved_slug: &str) {
    current.slug = resolved_slug.to_string();
    if let Some(title) = patch.title.flatten_ref() {
        current.title = title.clone();
    }
    if let Some(category) = patch.category.flatten_ref() {
        current.category = category.clone();
    }
    if let Some(technology) = patch.technology.flatten_ref() {
        current.technology = technology.clone();
    }
    if let Some(description) = patch.description.flatten_ref() {
        current.description = description.clone();
    }
    if let Some(value) = patch.long_description.as_ref_option() {
        current.long_description = value.cloned();
    }
    if let Some(value) = patch.challenge.as_ref_option() {
        current.challenge = value.cloned();
    }
    if let Some(value) = patch.solution.as_ref_option() {
        current.solution = value.cloned();
    }
    if let Some(results) = patch.results.flatten_ref() {
        current.results = results.clone();
    }
    if let Some(features) = patch.features.flatten_ref() {
        current.features = features.clone();
    }
    if let Some(images) = patch.images.flatten_ref() {
        current.images = images.clone();
    }
    if let Some(value) = patch.duration.as_ref_option() {
        current.duration = value.cloned();
    }
    if let Some(team_size) = patch.team_size.flatten_ref() {
        current.team_size = *team_size;
    }
    if let Some(value) = patch.client_type.as_ref_option() {
        current.client_type = value.cloned();
    }
    if let Some(value) = patch.live_url.as_ref_option() {
        current.live_url = value.cloned();
    }
    if let Some(value) = patch.github_url.as_ref_option() {
        current.github_url = value.cloned();
    }
    if let Some(published) = patch.is_published.flatten_bool() {
        current.is_published = published;
    }
    if let Some(featured) = patch.is_featured.flatten_bool() {
        current.is_featured = featured;
    }
    if let Some(value) = patch.testimonial.as_ref_option() {
        current.testimonial = value.cloned();
    }
    current.updated_at = Utc::now();
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepo {
    async fn list_all(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.rows.lock().clone())
    }

    async fn list_published(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.rows.lock().iter().filter(|p| p.is_published).cloned().collect())
    }

    async fn list_featured(&self) -> Result<Vec<Project>, AppError> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|p| p.is_published && p.is_featured)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        Ok(self.rows.lock().iter().find(|p| p.id == id).cloned())
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|p| p.is_published && p.slug == slug)
            .cloned())
    }

    async fn insert(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let created = Project {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: project.title.clone(),
            slug: project.slug.clone(),
            category: project.category.clone(),
            technology: project.technology.clone(),
            description: project.description.clone(),
            long_description: project.long_description.clone(),
            challenge: project.challenge.clone(),
            solution: project.solution.clone(),
            results: project.results.clone(),
            features: project.features.clone(),
            images: project.images.clone(),
            duration: project.duration.clone(),
            team_size: project.team_size,
            client_type: project.client_type.clone(),
            live_url: project.live_url.clone(),
            github_url: project.github_url.clone(),
            is_published: project.is_published,
            is_featured: project.is_featured,
            testimonial: project.testimonial.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: i64,
        patch: &UpdateProjectRequest,
        resolved_slug: &str,
    ) -> Result<Option<Project>, AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock();
        let Some(current) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        apply_project_patch(current, patch, resolved_slug);
        Ok(Some(current.clone()))
    }

    async fn publish_flag(&self, id: i64) -> Result<Option<bool>, AppError> {
        self.flag_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().iter().find(|p| p.id == id).map(|p| p.is_published))
    }

    async fn set_publish_flag(&self, id: i64, value: bool) -> Result<Option<Project>, AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock();
        let Some(current) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        current.is_published = value;
        current.updated_at = Utc::now();
        Ok(Some(current.clone()))
    }

    async fn featured_flag(&self, id: i64) -> Result<Option<bool>, AppError> {
        self.flag_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().iter().find(|p| p.id == id).map(|p| p.is_featured))
    }

    async fn set_featured_flag(&self, id: i64, value: bool) -> Result<Option<Project>, AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock();
        let Some(current) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        current.is_featured = value;
        current.updated_at = Utc::now();
        Ok(Some(current.clone()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound("Project not found".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBlogPostRepo {
    rows: Mutex<Vec<BlogPost>>,
    next_id: AtomicI64,
}

impl InMemoryBlogPostRepo {
    pub fn new() -> Self {
        InMemoryBlogPostRepo {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn seed(&self, mut post: BlogPost) -> BlogPost {
        post.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().push(post.clone());
        post
    }
}

fn apply_post_patch(current: &mut BlogPost, patch: &UpdateBlogPostRequest, resolved_slug: &str) {
    current.slug = resolved_slug.to_string();
    if let Some(title) = patch.title.flatten_ref() {
        current.title = title.clone();
    }
    if let Some(excerpt) = patch.excerpt.flatten_ref() {
        current.excerpt = excerpt.clone();
    }
    if let Some(content) = patch.content.flatten_ref() {
        current.content = content.clone();
    }
    if let Some(value) = patch.image.as_ref_option() {
        current.image = value.cloned();
    }
    if let Some(tags) = patch.tags.flatten_ref() {
        current.tags = tags.clone();
    }
    if let Some(author) = patch.author.flatten_ref() {
        current.author = author.clone();
    }
    if let Some(date) = patch.date.flatten_ref() {
        current.date = *date;
    }
    if let Some(published) = patch.is_published.flatten_bool() {
        current.is_published = published;
    }
    if let Some(value) = patch.seo_title.as_ref_option() {
        current.seo_title = value.cloned();
    }
    if let Some(value) = patch.seo_description.as_ref_option() {
        current.seo_description = value.cloned();
    }
    if let Some(faqs) = patch.faqs.flatten_ref() {
        current.faqs = faqs.clone();
    }
    if let Some(value) = patch.cta.as_ref_option() {
        current.cta = value.cloned();
    }
    current.updated_at = Utc::now();
}

#[async_trait]
impl BlogPostRepository for InMemoryBlogPostRepo {
    async fn list_all(&self) -> Result<Vec<BlogPost>, AppError> {
        Ok(self.rows.lock().clone())
    }

    async fn list_published(&self) -> Result<Vec<BlogPost>, AppError> {
        Ok(self.rows.lock().iter().filter(|p| p.is_published).cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BlogPost>, AppError> {
        Ok(self.rows.lock().iter().find(|p| p.id == id).cloned())
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|p| p.is_published && p.slug == slug)
            .cloned())
    }

    async fn search_published(&self, query: &str) -> Result<Vec<BlogPost>, AppError> {
        let needle = query.to_lowercase();
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|p| {
                p.is_published
                    && (p.title.to_lowercase().contains(&needle)
                        || p.excerpt.to_lowercase().contains(&needle)
                        || p.content.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn list_published_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>, AppError> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|p| p.is_published && p.tags.iter().any(|t| t == tag))
            .cloned()
            .collect())
    }

    async fn insert(&self, post: &BlogPostInsert) -> Result<BlogPost, AppError> {
        let now = Utc::now();
        let created = BlogPost {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            image: post.image.clone(),
            tags: post.tags.clone(),
            author: post.author.clone(),
            date: post.date,
            is_published: post.is_published,
            seo_title: post.seo_title.clone(),
            seo_description: post.seo_description.clone(),
            faqs: post.faqs.clone(),
            cta: post.cta.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: i64,
        patch: &UpdateBlogPostRequest,
        resolved_slug: &str,
    ) -> Result<Option<BlogPost>, AppError> {
        let mut rows = self.rows.lock();
        let Some(current) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        apply_post_patch(current, patch, resolved_slug);
        Ok(Some(current.clone()))
    }

    async fn publish_flag(&self, id: i64) -> Result<Option<bool>, AppError> {
        Ok(self.rows.lock().iter().find(|p| p.id == id).map(|p| p.is_published))
    }

    async fn set_publish_flag(&self, id: i64, value: bool) -> Result<Option<BlogPost>, AppError> {
        let mut rows = self.rows.lock();
        let Some(current) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        current.is_published = value;
        current.updated_at = Utc::now();
        Ok(Some(current.clone()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound("Blog post not found".into()));
        }
        Ok(())
    }
}

/// A published project with sensible defaults; tests override what they need.
pub fn sample_project(title: &str, slug: &str) -> Project {
    Project {
        id: 0,
        title: title.to_string(),
        slug: slug.to_string(),
        category: "Web Development".into(),
        technology: vec!["Rust".into()],
        description: "Internal tooling platform".into(),
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
        is_published: true,
        is_featured: false,
        testimonial: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn sample_post(title: &str, slug: &str) -> BlogPost {
    BlogPost {
        id: 0,
        title: title.to_string(),
        slug: slug.to_string(),
        excerpt: "A short introduction to the post.".into(),
        content: "Body copy goes here.".into(),
        image: None,
        tags: vec!["engineering".into()],
        author: "Editorial Team".into(),
        date: Utc::now().date_naive(),
        is_published: true,
        seo_title: None,
        seo_description: None,
        faqs: vec![],
        cta: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
