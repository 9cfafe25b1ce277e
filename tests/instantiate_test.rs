use kratestack::descriptor::ProjectDescriptor;
use kratestack::error::Error;
use kratestack::ignore::ExcludeSet;
use kratestack::instantiate::{instantiate, validate_project_name, Instantiator, Outcome, Phase};
use kratestack::manifest::Manifest;
use kratestack::snapshot::snapshot;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use test_log::test;

mod utils;
use utils::{list_tree, sample_workspace, write, ScriptedPrompter};

/// Snapshots the sample workspace and returns (source, template holder, template root).
fn sample_template() -> (TempDir, TempDir, std::path::PathBuf) {
    let source = TempDir::new().unwrap();
    sample_workspace(source.path());
    let out = TempDir::new().unwrap();
    let template = out.path().join("template");
    let manifest = Manifest::new(
        ["apps", "package.json", ".gitignore", "README.md"],
        ExcludeSet::new(["node_modules", "target", "dist"]),
    )
    .unwrap();
    snapshot(source.path(), &template, &manifest).unwrap();
    (source, out, template)
}

fn created(outcome: Outcome) -> kratestack::instantiate::ProjectSummary {
    match outcome {
        Outcome::Created(summary) => summary,
        Outcome::Cancelled => panic!("expected the project to be created"),
    }
}

#[test]
fn test_round_trip_restores_gitignore() {
    let (source, _out, template) = sample_template();
    let projects = TempDir::new().unwrap();

    let summary = created(
        instantiate(&template, projects.path(), "my-app", false, &ScriptedPrompter::silent())
            .unwrap(),
    );

    let project = projects.path().join("my-app");
    assert!(summary.gitignore_restored);
    assert_eq!(
        fs::read(project.join(".gitignore")).unwrap(),
        fs::read(source.path().join(".gitignore")).unwrap()
    );
    assert!(!project.join("gitignore").exists());
    assert_eq!(
        fs::read_to_string(project.join("apps/web/.gitignore")).unwrap(),
        ".next\n"
    );
    assert!(project.join("apps/web/src/page.tsx").is_file());
}

#[test]
fn test_descriptor_name_rewritten() {
    let (_source, _out, template) = sample_template();
    let projects = TempDir::new().unwrap();

    let summary = created(
        instantiate(&template, projects.path(), "my-app", false, &ScriptedPrompter::silent())
            .unwrap(),
    );

    assert!(summary.descriptor_renamed);
    assert_eq!(
        fs::read_to_string(projects.path().join("my-app/package.json")).unwrap(),
        "{\n  \"name\": \"my-app\",\n  \"version\": \"0.1.0\",\n  \"private\": true\n}\n"
    );
}

#[test]
fn test_descriptor_fields_preserved() {
    let template = TempDir::new().unwrap();
    write(template.path(), "package.json", r#"{"name":"old","version":"1.0.0","private":true}"#);
    let projects = TempDir::new().unwrap();

    instantiate(template.path(), projects.path(), "my-app", false, &ScriptedPrompter::silent())
        .unwrap();

    let written = ProjectDescriptor::read(projects.path().join("my-app/package.json")).unwrap();
    let expected =
        ProjectDescriptor::parse(r#"{"name":"my-app","version":"1.0.0","private":true}"#).unwrap();
    assert_eq!(written, expected);
    assert_eq!(written.to_json_string().unwrap(), expected.to_json_string().unwrap());
}

#[test]
fn test_template_without_descriptor() {
    let template = TempDir::new().unwrap();
    write(template.path(), "README.md", "readme");
    let projects = TempDir::new().unwrap();

    let summary = created(
        instantiate(template.path(), projects.path(), "bare", false, &ScriptedPrompter::silent())
            .unwrap(),
    );

    assert!(!summary.descriptor_renamed);
    assert!(!summary.gitignore_restored);
    assert!(!projects.path().join("bare/package.json").exists());
    assert!(projects.path().join("bare/README.md").is_file());
}

#[test]
fn test_declined_overwrite_leaves_target_untouched() {
    let (_source, _out, template) = sample_template();
    let projects = TempDir::new().unwrap();
    let target = projects.path().join("my-app");
    write(&target, "keep.txt", "mine");
    let modified = fs::metadata(target.join("keep.txt")).unwrap().modified().unwrap();
    let prompt = ScriptedPrompter::answering(false);

    let mut instantiator = Instantiator::new(&template, &target, "my-app");
    let outcome = instantiator.run(&prompt).unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(instantiator.phase(), Phase::Cancelled);
    assert_eq!(prompt.confirms.get(), 1);
    assert_eq!(list_tree(&target), vec![Path::new("keep.txt").to_path_buf()]);
    assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "mine");
    assert_eq!(fs::metadata(target.join("keep.txt")).unwrap().modified().unwrap(), modified);
    assert_eq!(
        list_tree(projects.path()),
        vec![Path::new("my-app").to_path_buf(), Path::new("my-app/keep.txt").to_path_buf()]
    );
}

#[test]
fn test_accepted_overwrite_replaces_target() {
    let (_source, _out, template) = sample_template();
    let projects = TempDir::new().unwrap();
    let target = projects.path().join("my-app");
    write(&target, "keep.txt", "mine");
    let prompt = ScriptedPrompter::answering(true);

    let mut instantiator = Instantiator::new(&template, &target, "my-app");
    created(instantiator.run(&prompt).unwrap());

    assert_eq!(instantiator.phase(), Phase::Finalized);
    assert_eq!(prompt.confirms.get(), 1);
    assert!(!target.join("keep.txt").exists());
    assert!(target.join("package.json").is_file());
}

#[test]
fn test_force_skips_confirmation() {
    let (_source, _out, template) = sample_template();
    let projects = TempDir::new().unwrap();
    write(&projects.path().join("my-app"), "keep.txt", "mine");

    instantiate(&template, projects.path(), "my-app", true, &ScriptedPrompter::silent()).unwrap();

    assert!(!projects.path().join("my-app/keep.txt").exists());
}

#[test]
fn test_template_is_not_modified() {
    let (_source, out, template) = sample_template();
    let pristine = out.path().join("pristine");
    kratestack::ioutils::copy_tree(&template, &pristine, |_, _| false).unwrap();
    let projects = TempDir::new().unwrap();

    instantiate(&template, projects.path(), "my-app", false, &ScriptedPrompter::silent()).unwrap();

    assert!(!dir_diff::is_different(&template, &pristine).unwrap());
    assert!(template.join("gitignore").is_file());
}

#[test]
fn test_project_matches_template_except_transforms() {
    let (_source, _out, template) = sample_template();
    let projects = TempDir::new().unwrap();

    instantiate(&template, projects.path(), "my-app", false, &ScriptedPrompter::silent()).unwrap();

    let rename = |p: std::path::PathBuf| {
        if p == Path::new("gitignore") {
            Path::new(".gitignore").to_path_buf()
        } else {
            p
        }
    };
    let mut expected: Vec<_> = list_tree(&template).into_iter().map(rename).collect();
    expected.sort();
    assert_eq!(list_tree(&projects.path().join("my-app")), expected);
}

#[test]
fn test_malformed_descriptor_fails_without_creating_target() {
    let template = TempDir::new().unwrap();
    write(template.path(), "package.json", "{ not json");
    let projects = TempDir::new().unwrap();

    let mut instantiator =
        Instantiator::new(template.path(), projects.path().join("my-app"), "my-app");
    let err = instantiator.run(&ScriptedPrompter::silent()).unwrap_err();

    assert!(matches!(err, Error::DescriptorMalformed { .. }));
    assert_eq!(instantiator.phase(), Phase::Failed);
    assert!(list_tree(projects.path()).is_empty());
}

#[test]
fn test_gitignore_conflict_is_fatal() {
    let template = TempDir::new().unwrap();
    write(template.path(), "gitignore", "packed");
    write(template.path(), ".gitignore", "plain");
    let projects = TempDir::new().unwrap();

    let err = instantiate(template.path(), projects.path(), "app", false, &ScriptedPrompter::silent())
        .unwrap_err();

    assert!(matches!(err, Error::DotfileConflict { .. }));
    assert!(!projects.path().join("app").exists());
}

#[test]
fn test_missing_template_fails() {
    let projects = TempDir::new().unwrap();
    let err = instantiate(
        projects.path().join("no-template"),
        projects.path(),
        "app",
        false,
        &ScriptedPrompter::silent(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
}

#[test]
fn test_target_inside_template_is_rejected() {
    let (_source, _out, template) = sample_template();
    let err = instantiate(&template, &template, "app", false, &ScriptedPrompter::silent())
        .unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
    assert!(!template.join("app").exists());
}

#[test]
fn test_validate_project_name() {
    assert!(validate_project_name("my-app").is_ok());
    assert!(validate_project_name("@scope-less name").is_ok());
    assert!(validate_project_name("").is_err());
    assert!(validate_project_name("   ").is_err());
    assert!(validate_project_name(".").is_err());
    assert!(validate_project_name("..").is_err());
    assert!(validate_project_name("a/b").is_err());
    assert!(validate_project_name("a\\b").is_err());
}

#[test]
fn test_invalid_name_fails_before_touching_disk() {
    let (_source, _out, template) = sample_template();
    let projects = TempDir::new().unwrap();

    let err = instantiate(&template, projects.path(), "../escape", false, &ScriptedPrompter::silent())
        .unwrap_err();

    assert!(matches!(err, Error::ValidationError(_)));
    assert!(list_tree(projects.path()).is_empty());
}
