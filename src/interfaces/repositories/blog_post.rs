use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, QueryBuilder};
use sqlx::types::Json;

use crate::{
    entities::blog_post::{BlogPost, BlogPostInsert, BlogPostRow, UpdateBlogPostRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxBlogPostRepo,
};

#[automock]
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<BlogPost>, AppError>;
    async fn list_published(&self) -> Result<Vec<BlogPost>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<BlogPost>, AppError>;
    /// Exact slug match among published rows; absence triggers the
    /// derived-slug fallback in the use-case layer.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError>;
    async fn search_published(&self, query: &str) -> Result<Vec<BlogPost>, AppError>;
    async fn list_published_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>, AppError>;
    async fn insert(&self, post: &BlogPostInsert) -> Result<BlogPost, AppError>;
    async fn update(
        &self,
        id: i64,
        patch: &UpdateBlogPostRequest,
        resolved_slug: &str,
    ) -> Result<Option<BlogPost>, AppError>;
    async fn publish_flag(&self, id: i64) -> Result<Option<bool>, AppError>;
    async fn set_publish_flag(&self, id: i64, value: bool) -> Result<Option<BlogPost>, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

impl SqlxBlogPostRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxBlogPostRepo { pool }
    }
}

#[async_trait]
impl BlogPostRepository for SqlxBlogPostRepo {
    async fn list_all(&self) -> Result<Vec<BlogPost>, AppError> {
        let rows = sqlx::query_as::<_, BlogPostRow>(
            "SELECT * FROM blog_posts ORDER BY date DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn list_published(&self) -> Result<Vec<BlogPost>, AppError> {
        let rows = sqlx::query_as::<_, BlogPostRow>(
            "SELECT * FROM blog_posts WHERE is_published = TRUE ORDER BY date DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BlogPost>, AppError> {
        let row = sqlx::query_as::<_, BlogPostRow>(
            "SELECT * FROM blog_posts WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BlogPost::from))
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        let row = sqlx::query_as::<_, BlogPostRow>(
            "SELECT * FROM blog_posts WHERE slug = $1 AND is_published = TRUE"
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BlogPost::from))
    }

    async fn search_published(&self, query: &str) -> Result<Vec<BlogPost>, AppError> {
        let mut builder = QueryBuilder::new(
            "SELECT * FROM blog_posts WHERE is_published = TRUE AND ("
        );
        let pattern = format!("%{}%", query);

        builder.push("title ILIKE ").push_bind(pattern.clone());
        builder.push(" OR excerpt ILIKE ").push_bind(pattern.clone());
        builder.push(" OR content ILIKE ").push_bind(pattern);
        builder.push(") ORDER BY date DESC, id DESC");

        let rows = builder
            .build_query_as::<BlogPostRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn list_published_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>, AppError> {
        let rows = sqlx::query_as::<_, BlogPostRow>(
            "SELECT * FROM blog_posts WHERE is_published = TRUE AND tags @> $1 ORDER BY date DESC, id DESC"
        )
        .bind(vec![tag.to_string()])
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn insert(&self, post: &BlogPostInsert) -> Result<BlogPost, AppError> {
        let row = sqlx::query_as::<_, BlogPostRow>(
            r#"
            INSERT INTO blog_posts (
                title, slug, excerpt, content, image, tags, author, date,
                is_published, seo_title, seo_description, faqs, cta
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#
        )
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(&post.image)
        .bind(&post.tags)
        .bind(&post.author)
        .bind(post.date)
        .bind(post.is_published)
        .bind(&post.seo_title)
        .bind(&post.seo_description)
        .bind(Json(post.faqs.clone()))
        .bind(post.cta.clone().map(Json))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("blog_posts_slug_key") {
                    return AppError::Conflict("Slug already exists".into());
                }
            }
            AppError::from(e)
        })?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: i64,
        patch: &UpdateBlogPostRequest,
        resolved_slug: &str,
    ) -> Result<Option<BlogPost>, AppError> {
        let mut builder = QueryBuilder::new("UPDATE blog_posts SET updated_at = NOW()");

        builder.push(", slug = ").push_bind(resolved_slug);

        if let Some(title) = patch.title.flatten_ref() {
            builder.push(", title = ").push_bind(title.clone());
        }
        if let Some(excerpt) = patch.excerpt.flatten_ref() {
            builder.push(", excerpt = ").push_bind(excerpt.clone());
        }
        if let Some(content) = patch.content.flatten_ref() {
            builder.push(", content = ").push_bind(content.clone());
        }
        if let Some(value) = patch.image.as_ref_option() {
            builder.push(", image = ").push_bind(value.cloned());
        }
        if let Some(tags) = patch.tags.flatten_ref() {
            builder.push(", tags = ").push_bind(tags.clone());
        }
        if let Some(author) = patch.author.flatten_ref() {
            builder.push(", author = ").push_bind(author.clone());
        }
        if let Some(date) = patch.date.flatten_ref() {
            builder.push(", date = ").push_bind(*date);
        }
        if let Some(published) = patch.is_published.flatten_bool() {
            builder.push(", is_published = ").push_bind(published);
        }
        if let Some(value) = patch.seo_title.as_ref_option() {
            builder.push(", seo_title = ").push_bind(value.cloned());
        }
        if let Some(value) = patch.seo_description.as_ref_option() {
            builder.push(", seo_description = ").push_bind(value.cloned());
        }
        if let Some(faqs) = patch.faqs.flatten_ref() {
            builder.push(", faqs = ").push_bind(Json(faqs.clone()));
        }
        if let Some(value) = patch.cta.as_ref_option() {
            builder.push(", cta = ").push_bind(value.map(|c| Json(c.clone())));
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING *");

        let row = builder
            .build_query_as::<BlogPostRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.constraint() == Some("blog_posts_slug_key") {
                        return AppError::Conflict("Slug already exists".into());
                    }
                }
                AppError::from(e)
            })?;

        Ok(row.map(BlogPost::from))
    }

    async fn publish_flag(&self, id: i64) -> Result<Option<bool>, AppError> {
        let flag = sqlx::query_scalar::<_, bool>(
            "SELECT is_published FROM blog_posts WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flag)
    }

    async fn set_publish_flag(&self, id: i64, value: bool) -> Result<Option<BlogPost>, AppError> {
        let row = sqlx::query_as::<_, BlogPostRow>(
            "UPDATE blog_posts SET is_published = $2, updated_at = NOW() WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BlogPost::from))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Blog post not found".into()));
        }

        Ok(())
    }
}
