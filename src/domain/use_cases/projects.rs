use validator::Validate;

use crate::{
    entities::project::{NewProjectRequest, Project, ProjectInsert, UpdateProjectRequest},
    errors::AppError,
    repositories::project::ProjectRepository,
    slugs,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    pub async fn get_all_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_all().await
    }

    pub async fn get_published_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_published().await
    }

    pub async fn get_featured_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_featured().await
    }

    pub async fn get_project_by_id(&self, id: i64) -> Result<Project, AppError> {
        self.project_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    /// Two-phase lookup: exact slug first so an explicitly-set slug always
    /// wins, then a scan of published rows matching the derived title slug.
    /// Only rows with no persisted slug are fallback-eligible — the scan
    /// exists to keep links alive for rows created before slugs were stored,
    /// not to alias rows that already have one.
    pub async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError> {
        if let Some(project) = self.project_repo.find_published_by_slug(slug).await? {
            return Ok(project);
        }

        let published = self.project_repo.list_published().await?;
        published
            .into_iter()
            .find(|p| p.slug.trim().is_empty() && slugs::matches_derived_slug(&p.title, slug))
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    /// Creates a project; drafts by default, slug derived from the title
    /// unless the editor supplied one.
    pub async fn create_project(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        let insert = ProjectInsert::try_from(request)?;
        self.project_repo.insert(&insert).await
    }

    pub async fn update_project(
        &self,
        id: i64,
        patch: &UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        patch.validate()?;

        let current = self.get_project_by_id(id).await?;
        let resolved_slug = slugs::resolve_slug_for_update(&patch.slug, &patch.title, &current.slug);

        self.project_repo
            .update(id, patch, &resolved_slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    /// Read-then-write flip of is_published; deliberately two round trips,
    /// last write wins under concurrent editors.
    pub async fn toggle_publish_status(&self, id: i64) -> Result<Project, AppError> {
        let current = self.project_repo
            .publish_flag(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        self.project_repo
            .set_publish_flag(id, !current)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    pub async fn toggle_featured_status(&self, id: i64) -> Result<Project, AppError> {
        let current = self.project_repo
            .featured_flag(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        self.project_repo
            .set_featured_flag(id, !current)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        self.project_repo.delete(id).await
    }
}
