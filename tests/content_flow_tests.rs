mod repo_fakes;

use std::sync::atomic::Ordering;

use repo_fakes::*;

use agency_cms::entities::option_fields::OptionField;
use agency_cms::entities::blog_post::NewBlogPostRequest;
use agency_cms::entities::project::{NewProjectRequest, UpdateProjectRequest};
use agency_cms::errors::AppError;
use agency_cms::slugs;
use agency_cms::use_cases::blog::BlogPostHandler;
use agency_cms::use_cases::dashboard::{project_matches, ContentFilter, DashboardState};
use agency_cms::use_cases::projects::ProjectHandler;

fn new_project_request(title: &str, slug: Option<&str>) -> NewProjectRequest {
    serde_json::from_value(serde_json::json!({
        "title": title,
        "slug": slug,
        "category": "Web Development",
        "technology": ["Rust", "PostgreSQL"],
        "description": "Telemetry dashboard for logistics fleets",
        "team_size": 2,
        "is_published": true
    }))
    .unwrap()
}

fn new_post_request(title: &str) -> NewBlogPostRequest {
    serde_json::from_value(serde_json::json!({
        "title": title,
        "excerpt": "A short introduction to the post.",
        "content": "# Heading\n\nBody text.",
        "tags": ["engineering"],
        "is_published": true
    }))
    .unwrap()
}

// ───── Slug resolution ──────────────────────────────────────────────

#[actix_rt::test]
async fn slug_fallback_finds_rows_without_a_persisted_slug() {
    let repo = InMemoryProjectRepo::new();
    // Legacy row: published before the slug column was backfilled
    repo.seed(sample_project("Realtime Fleet Tracker", ""));

    let handler = ProjectHandler::new(repo);
    let found = handler.get_project_by_slug("realtime-fleet-tracker").await.unwrap();
    assert_eq!(found.title, "Realtime Fleet Tracker");
}

#[actix_rt::test]
async fn explicit_slug_takes_the_fast_path_and_blocks_fallback_collisions() {
    let repo = InMemoryProjectRepo::new();
    repo.seed(sample_project("Realtime Fleet Tracker", "pinned-launch-page"));

    let handler = ProjectHandler::new(repo);

    // The explicit slug resolves via the exact match
    let found = handler.get_project_by_slug("pinned-launch-page").await.unwrap();
    assert_eq!(found.title, "Realtime Fleet Tracker");

    // The row already has a slug, so the scan must not alias it under its
    // title-derived slug
    let err = handler.get_project_by_slug("realtime-fleet-tracker").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn unpublished_rows_never_resolve_by_slug() {
    let repo = InMemoryProjectRepo::new();
    let mut draft = sample_project("Hidden Project", "hidden-project");
    draft.is_published = false;
    repo.seed(draft);

    let handler = ProjectHandler::new(repo);
    assert!(matches!(
        handler.get_project_by_slug("hidden-project").await,
        Err(AppError::NotFound(_))
    ));
}

#[actix_rt::test]
async fn blog_post_created_without_slug_resolves_under_derived_slug() {
    let repo = InMemoryBlogPostRepo::new();
    let handler = BlogPostHandler::new(repo);

    let created = handler.create_blog_post(new_post_request("My First Post!!")).await.unwrap();
    assert_eq!(created.slug, "my-first-post");

    let fetched = handler.get_blog_post_by_slug("my-first-post").await.unwrap();
    assert_eq!(fetched.id, created.id);

    assert!(matches!(
        handler.get_blog_post_by_slug("does-not-exist").await,
        Err(AppError::NotFound(_))
    ));
}

// ───── Update semantics ─────────────────────────────────────────────

#[actix_rt::test]
async fn title_only_update_silently_moves_the_canonical_slug() {
    let repo = InMemoryProjectRepo::new();
    let handler = ProjectHandler::new(repo);

    let created = handler
        .create_project(new_project_request("Original Title", None))
        .await
        .unwrap();
    assert_eq!(created.slug, "original-title");

    let patch = UpdateProjectRequest {
        title: OptionField::SetToValue("Rebranded Title".into()),
        ..Default::default()
    };
    let updated = handler.update_project(created.id, &patch).await.unwrap();

    assert_eq!(updated.slug, "rebranded-title");
    // The old link only survives through the derived-slug fallback, which no
    // longer matches the renamed title
    assert!(matches!(
        handler.get_project_by_slug("original-title").await,
        Err(AppError::NotFound(_))
    ));
    assert!(handler.get_project_by_slug("rebranded-title").await.is_ok());
}

#[actix_rt::test]
async fn supplying_a_slug_alongside_the_title_pins_it() {
    let repo = InMemoryProjectRepo::new();
    let handler = ProjectHandler::new(repo);

    let created = handler
        .create_project(new_project_request("Original Title", None))
        .await
        .unwrap();

    let patch = UpdateProjectRequest {
        title: OptionField::SetToValue("Rebranded Title".into()),
        slug: OptionField::SetToValue("original-title".into()),
        ..Default::default()
    };
    let updated = handler.update_project(created.id, &patch).await.unwrap();

    assert_eq!(updated.title, "Rebranded Title");
    assert_eq!(updated.slug, "original-title");
}

#[actix_rt::test]
async fn sequential_partial_updates_merge_with_last_writer_winning() {
    let repo = InMemoryProjectRepo::new();
    let handler = ProjectHandler::new(repo);

    let created = handler
        .create_project(new_project_request("Merge Semantics", None))
        .await
        .unwrap();

    let first = UpdateProjectRequest {
        description: OptionField::SetToValue("first description".into()),
        duration: OptionField::SetToValue("3 months".into()),
        ..Default::default()
    };
    handler.update_project(created.id, &first).await.unwrap();

    let second = UpdateProjectRequest {
        description: OptionField::SetToValue("second description".into()),
        client_type: OptionField::SetToValue("Startup".into()),
        ..Default::default()
    };
    let after = handler.update_project(created.id, &second).await.unwrap();

    // Union of both patches, second write wins on overlap
    assert_eq!(after.description, "second description");
    assert_eq!(after.duration.as_deref(), Some("3 months"));
    assert_eq!(after.client_type.as_deref(), Some("Startup"));
    assert_eq!(after.title, "Merge Semantics");
}

#[actix_rt::test]
async fn explicit_null_clears_a_nullable_field() {
    let repo = InMemoryProjectRepo::new();
    let handler = ProjectHandler::new(repo);

    let mut request = new_project_request("Nullable Fields", None);
    request.duration = Some("6 months".into());
    let created = handler.create_project(request).await.unwrap();
    assert_eq!(created.duration.as_deref(), Some("6 months"));

    let patch = UpdateProjectRequest {
        duration: OptionField::SetToNull,
        ..Default::default()
    };
    let updated = handler.update_project(created.id, &patch).await.unwrap();
    assert_eq!(updated.duration, None);
}

// ───── Toggles ──────────────────────────────────────────────────────

#[actix_rt::test]
async fn toggling_twice_restores_the_flag_with_exactly_two_writes() {
    let repo = InMemoryProjectRepo::new();
    let handler = ProjectHandler::new(repo);

    let created = handler
        .create_project(new_project_request("Toggle Target", None))
        .await
        .unwrap();
    assert!(created.is_published);

    let base_writes = handler.project_repo.writes.load(Ordering::SeqCst);
    let base_reads = handler.project_repo.flag_reads.load(Ordering::SeqCst);

    let off = handler.toggle_publish_status(created.id).await.unwrap();
    assert!(!off.is_published);
    let on = handler.toggle_publish_status(created.id).await.unwrap();
    assert!(on.is_published);

    // Each toggle is one flag read plus one write — nothing extra
    assert_eq!(handler.project_repo.writes.load(Ordering::SeqCst) - base_writes, 2);
    assert_eq!(handler.project_repo.flag_reads.load(Ordering::SeqCst) - base_reads, 2);
}

#[actix_rt::test]
async fn toggling_a_missing_row_is_not_found() {
    let repo = InMemoryProjectRepo::new();
    let handler = ProjectHandler::new(repo);
    assert!(matches!(
        handler.toggle_publish_status(404).await,
        Err(AppError::NotFound(_))
    ));
}

// ───── Deletion ─────────────────────────────────────────────────────

#[actix_rt::test]
async fn deleted_rows_are_gone_from_both_lookup_paths() {
    let repo = InMemoryProjectRepo::new();
    let handler = ProjectHandler::new(repo);

    let created = handler
        .create_project(new_project_request("Ephemeral", None))
        .await
        .unwrap();

    handler.delete_project(created.id).await.unwrap();

    assert!(matches!(
        handler.get_project_by_id(created.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        handler.get_project_by_slug("ephemeral").await,
        Err(AppError::NotFound(_))
    ));
}

// ───── Dashboard synchronization ────────────────────────────────────

#[actix_rt::test]
async fn freshly_created_row_is_searchable_before_any_reload() {
    let repo = InMemoryProjectRepo::new();
    let handler = ProjectHandler::new(repo);
    let dashboard = DashboardState::new();

    // Dashboard loads the (empty) collection once
    dashboard.projects.load(handler.get_all_projects().await.unwrap());

    // Editor creates a project; the returned row is patched into the cache
    let created = handler
        .create_project(new_project_request("Night Sky Observatory", None))
        .await
        .unwrap();
    dashboard.projects.apply_created(created.clone());

    // A search over the local cache must surface it without a re-fetch
    let filter = ContentFilter {
        search: "observatory".into(),
        ..Default::default()
    };
    let visible: Vec<_> = dashboard
        .projects
        .snapshot()
        .into_iter()
        .filter(|p| project_matches(&filter, p))
        .collect();

    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, created.id);
}

#[actix_rt::test]
async fn failed_mutation_leaves_the_cache_untouched() {
    let repo = InMemoryProjectRepo::new();
    let handler = ProjectHandler::new(repo);
    let dashboard = DashboardState::new();

    let created = handler
        .create_project(new_project_request("Stable Row", None))
        .await
        .unwrap();
    dashboard.projects.load(handler.get_all_projects().await.unwrap());

    // Updating a nonexistent id fails; per the sync contract no patch is applied
    let patch = UpdateProjectRequest {
        description: OptionField::SetToValue("should not appear".into()),
        ..Default::default()
    };
    assert!(handler.update_project(created.id + 99, &patch).await.is_err());

    let rows = dashboard.projects.snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Telemetry dashboard for logistics fleets");
}

// ───── Slugify contract ─────────────────────────────────────────────

#[test]
fn slugify_is_idempotent_over_representative_titles() {
    for title in [
        "My First Post!!",
        "Scaling Postgres to 1M rows",
        "Ünïcode Heavy — Title",
    ] {
        let once = slugs::slugify(title);
        assert_eq!(slugs::slugify(&once), once);
    }
}
