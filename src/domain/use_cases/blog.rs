use validator::Validate;

use crate::{
    entities::blog_post::{
        BlogPost, BlogPostInsert, NewBlogPostRequest, UpdateBlogPostRequest,
    },
    errors::AppError,
    repositories::blog_post::BlogPostRepository,
    slugs,
};

pub struct BlogPostHandler<R>
where
    R: BlogPostRepository,
{
    pub blog_post_repo: R,
}

impl<R> BlogPostHandler<R>
where
    R: BlogPostRepository,
{
    pub fn new(blog_post_repo: R) -> Self {
        BlogPostHandler { blog_post_repo }
    }

    pub async fn get_all_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        self.blog_post_repo.list_all().await
    }

    pub async fn get_published_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        self.blog_post_repo.list_published().await
    }

    pub async fn get_blog_post_by_id(&self, id: i64) -> Result<BlogPost, AppError> {
        self.blog_post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
    }

    /// Same two-phase resolution as projects: exact match first, then a
    /// derived-slug scan limited to published posts with no persisted slug.
    pub async fn get_blog_post_by_slug(&self, slug: &str) -> Result<BlogPost, AppError> {
        if let Some(post) = self.blog_post_repo.find_published_by_slug(slug).await? {
            return Ok(post);
        }

        let published = self.blog_post_repo.list_published().await?;
        published
            .into_iter()
            .find(|p| p.slug.trim().is_empty() && slugs::matches_derived_slug(&p.title, slug))
            .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
    }

    pub async fn search_blog_posts(&self, query: &str) -> Result<Vec<BlogPost>, AppError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return self.blog_post_repo.list_published().await;
        }
        self.blog_post_repo.search_published(trimmed).await
    }

    pub async fn get_blog_posts_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>, AppError> {
        self.blog_post_repo.list_published_by_tag(tag).await
    }

    pub async fn create_blog_post(&self, request: NewBlogPostRequest) -> Result<BlogPost, AppError> {
        let insert = BlogPostInsert::try_from(request)?;
        self.blog_post_repo.insert(&insert).await
    }

    pub async fn update_blog_post(
        &self,
        id: i64,
        patch: &UpdateBlogPostRequest,
    ) -> Result<BlogPost, AppError> {
        patch.validate()?;

        let current = self.get_blog_post_by_id(id).await?;
        let resolved_slug = slugs::resolve_slug_for_update(&patch.slug, &patch.title, &current.slug);

        self.blog_post_repo
            .update(id, patch, &resolved_slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
    }

    /// Read-then-write flip of is_published; two round trips by design.
    pub async fn toggle_publish_status(&self, id: i64) -> Result<BlogPost, AppError> {
        let current = self.blog_post_repo
            .publish_flag(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".into()))?;

        self.blog_post_repo
            .set_publish_flag(id, !current)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
    }

    pub async fn delete_blog_post(&self, id: i64) -> Result<(), AppError> {
        self.blog_post_repo.delete(id).await
    }
}
