use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, QueryBuilder};
use sqlx::types::Json;

use crate::{
    entities::project::{Project, ProjectInsert, ProjectRow, UpdateProjectRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

#[automock]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Project>, AppError>;
    async fn list_published(&self) -> Result<Vec<Project>, AppError>;
    async fn list_featured(&self) -> Result<Vec<Project>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, AppError>;
    /// Exact slug match among published rows. Absence is a recoverable miss,
    /// not an error — the use-case layer runs the derived-slug fallback.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError>;
    async fn insert(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    async fn update(
        &self,
        id: i64,
        patch: &UpdateProjectRequest,
        resolved_slug: &str,
    ) -> Result<Option<Project>, AppError>;
    async fn publish_flag(&self, id: i64) -> Result<Option<bool>, AppError>;
    async fn set_publish_flag(&self, id: i64, value: bool) -> Result<Option<Project>, AppError>;
    async fn featured_flag(&self, id: i64) -> Result<Option<bool>, AppError>;
    async fn set_featured_flag(&self, id: i64, value: bool) -> Result<Option<Project>, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_all(&self) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM projects ORDER BY updated_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn list_published(&self) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM projects WHERE is_published = TRUE ORDER BY updated_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn list_featured(&self) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM projects WHERE is_published = TRUE AND is_featured = TRUE ORDER BY updated_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM projects WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Project::from))
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM projects WHERE slug = $1 AND is_published = TRUE"
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Project::from))
    }

    async fn insert(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (
                title, slug, category, technology, description, long_description,
                challenge, solution, results, features, images, duration, team_size,
                client_type, live_url, github_url, is_published, is_featured, testimonial
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#
        )
        .bind(&project.title)
        .bind(&project.slug)
        .bind(&project.category)
        .bind(&project.technology)
        .bind(&project.description)
        .bind(&project.long_description)
        .bind(&project.challenge)
        .bind(&project.solution)
        .bind(&project.results)
        .bind(&project.features)
        .bind(Json(project.images.clone()))
        .bind(&project.duration)
        .bind(project.team_size)
        .bind(&project.client_type)
        .bind(&project.live_url)
        .bind(&project.github_url)
        .bind(project.is_published)
        .bind(project.is_featured)
        .bind(project.testimonial.clone().map(Json))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("projects_slug_key") {
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
        patch: &UpdateProjectRequest,
        resolved_slug: &str,
    ) -> Result<Option<Project>, AppError> {
        let mut builder = QueryBuilder::new("UPDATE projects SET updated_at = NOW()");

        builder.push(", slug = ").push_bind(resolved_slug);

        if let Some(title) = patch.title.flatten_ref() {
            builder.push(", title = ").push_bind(title.clone());
        }
        if let Some(category) = patch.category.flatten_ref() {
            builder.push(", category = ").push_bind(category.clone());
        }
        if let Some(technology) = patch.technology.flatten_ref() {
            builder.push(", technology = ").push_bind(technology.clone());
        }
        if let Some(description) = patch.description.flatten_ref() {
            builder.push(", description = ").push_bind(description.clone());
        }
        if let Some(value) = patch.long_description.as_ref_option() {
            builder.push(", long_description = ").push_bind(value.cloned());
        }
        if let Some(value) = patch.challenge.as_ref_option() {
            builder.push(", challenge = ").push_bind(value.cloned());
        }
        if let Some(value) = patch.solution.as_ref_option() {
            builder.push(", solution = ").push_bind(value.cloned());
        }
        if let Some(results) = patch.results.flatten_ref() {
            builder.push(", results = ").push_bind(results.clone());
        }
        if let Some(features) = patch.features.flatten_ref() {
            builder.push(", features = ").push_bind(features.clone());
        }
        if let Some(images) = patch.images.flatten_ref() {
            builder.push(", images = ").push_bind(Json(images.clone()));
        }
        if let Some(value) = patch.duration.as_ref_option() {
            builder.push(", duration = ").push_bind(value.cloned());
        }
        if let Some(team_size) = patch.team_size.flatten_ref() {
            builder.push(", team_size = ").push_bind(*team_size);
        }
        if let Some(value) = patch.client_type.as_ref_option() {
            builder.push(", client_type = ").push_bind(value.cloned());
        }
        if let Some(value) = patch.live_url.as_ref_option() {
            builder.push(", live_url = ").push_bind(value.cloned());
        }
        if let Some(value) = patch.github_url.as_ref_option() {
            builder.push(", github_url = ").push_bind(value.cloned());
        }
        if let Some(published) = patch.is_published.flatten_bool() {
            builder.push(", is_published = ").push_bind(published);
        }
        if let Some(featured) = patch.is_featured.flatten_bool() {
            builder.push(", is_featured = ").push_bind(featured);
        }
        if let Some(value) = patch.testimonial.as_ref_option() {
            builder.push(", testimonial = ").push_bind(value.map(|t| Json(t.clone())));
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING *");

        let row = builder
            .build_query_as::<ProjectRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.constraint() == Some("projects_slug_key") {
                        return AppError::Conflict("Slug already exists".into());
                    }
                }
                AppError::from(e)
            })?;

        Ok(row.map(Project::from))
    }

    async fn publish_flag(&self, id: i64) -> Result<Option<bool>, AppError> {
        let flag = sqlx::query_scalar::<_, bool>(
            "SELECT is_published FROM projects WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flag)
    }

    async fn set_publish_flag(&self, id: i64, value: bool) -> Result<Option<Project>, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "UPDATE projects SET is_published = $2, updated_at = NOW() WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Project::from))
    }

    async fn featured_flag(&self, id: i64) -> Result<Option<bool>, AppError> {
        let flag = sqlx::query_scalar::<_, bool>(
            "SELECT is_featured FROM projects WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flag)
    }

    async fn set_featured_flag(&self, id: i64, value: bool) -> Result<Option<Project>, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "UPDATE projects SET is_featured = $2, updated_at = NOW() WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Project::from))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        Ok(())
    }
}
