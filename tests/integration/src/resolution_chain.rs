//! End-to-end resolution across a realistic configuration chain:
//! built-in defaults, a user template directory, and a project template
//! directory, merged grandparent → parent → child.

use prompt_sources::{
    DirSource, MemorySource, RaceGroup, SourceHandle, SourceSet,
};
use std::fs;
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn template_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (file, text) in files {
        fs::write(dir.path().join(file), text).unwrap();
    }
    dir
}

/// Built-in defaults (grandparent), user dir (parent), project dir (child),
/// all contributing to one "templates" group plus standalone fallbacks.
fn build_chain(user: &TempDir, project: &TempDir) -> SourceSet {
    let builtin = SourceHandle::new(
        MemorySource::new()
            .with_template("system", "builtin system prompt")
            .with_template("fallback-only", "builtin fallback"),
    );
    let grandparent = SourceSet::new(vec![
        RaceGroup::named([builtin.clone()], "templates").into(),
        builtin.into(),
    ]);

    let user_source = SourceHandle::new(DirSource::new(user.path()));
    let parent = SourceSet::new(vec![RaceGroup::named([user_source], "templates").into()]);

    let project_source = SourceHandle::new(DirSource::new(project.path()));
    let child = SourceSet::new(vec![RaceGroup::named([project_source], "templates").into()]);

    child.merge_with_parent(&parent.merge_with_parent(&grandparent))
}

#[tokio::test]
async fn test_project_templates_shadow_user_and_builtin() {
    init_tracing();
    let user = template_dir(&[("system.md", "user system prompt")]);
    let project = template_dir(&[("system.md", "project system prompt")]);

    let chain = build_chain(&user, &project);
    let content = chain.resolve("system").await.unwrap();
    assert_eq!(content.text, "project system prompt");
    assert!(content.cacheable);
}

#[tokio::test]
async fn test_chain_falls_back_level_by_level() {
    init_tracing();
    let user = template_dir(&[("review.md", "user review prompt")]);
    let project = template_dir(&[]);

    let chain = build_chain(&user, &project);
    assert_eq!(chain.resolve("review").await.unwrap().text, "user review prompt");
    assert_eq!(
        chain.resolve("system").await.unwrap().text,
        "builtin system prompt"
    );
}

#[tokio::test]
async fn test_whole_chain_collapses_to_single_group() {
    init_tracing();
    let user = template_dir(&[]);
    let project = template_dir(&[]);

    let chain = build_chain(&user, &project);
    // One merged "templates" group with all three level members; the
    // standalone builtin entry is deduplicated against its earlier group
    // occurrence.
    assert_eq!(chain.len(), 1);

    assert_eq!(
        chain.resolve("fallback-only").await.unwrap().text,
        "builtin fallback"
    );
}

#[tokio::test]
async fn test_exhausted_chain_reports_not_found_once() {
    init_tracing();
    let user = template_dir(&[]);
    let project = template_dir(&[]);

    let chain = build_chain(&user, &project);
    let err = chain.resolve("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "template not found: nope");
}
