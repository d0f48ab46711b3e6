mod common;

use std::fs;
use std::path::Path;
use std::time::Duration;

use common::{build_zip, serve_once};
use starter::error::Error;
use starter::generator::{generate, GenerateOptions, Report};
use starter::loader::TemplateSource;
use starter::project::ProjectContext;
use starter::EMBEDDED_TEMPLATE;
use tempfile::TempDir;

fn write_file(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn local(template: &TempDir) -> TemplateSource {
    TemplateSource::LocalDirectory(template.path().to_path_buf())
}

#[test]
fn test_template_without_placeholders_is_mirrored() {
    let template = TempDir::new().unwrap();
    write_file(template.path(), "README.md", b"# hello\n");
    write_file(template.path(), "src/lib/util.go", b"package lib\n");
    write_file(template.path(), "docs/a.txt", b"a");
    fs::create_dir_all(template.path().join("empty")).unwrap();

    let work_dir = TempDir::new().unwrap();
    let project = ProjectContext::new("myapp", work_dir.path()).unwrap();
    generate(&project, &local(&template), &GenerateOptions::default()).unwrap();

    assert!(!dir_diff::is_different(template.path(), project.destination_root()).unwrap());
}

#[test]
fn test_placeholders_are_replaced_in_contents() {
    let template = TempDir::new().unwrap();
    write_file(template.path(), "go.mod", b"module response-std\n\ngo 1.22\n");
    write_file(
        template.path(),
        "response-std/handler.go",
        b"package response_std\n\nimport \"response-std/config\"\n",
    );

    let work_dir = TempDir::new().unwrap();
    let project = ProjectContext::new("myapp", work_dir.path()).unwrap();
    let report = generate(&project, &local(&template), &GenerateOptions::default()).unwrap();

    let dest = project.destination_root();
    assert_eq!(fs::read_to_string(dest.join("go.mod")).unwrap(), "module myapp\n\ngo 1.22\n");
    assert_eq!(
        fs::read_to_string(dest.join("response-std/handler.go")).unwrap(),
        "package myapp\n\nimport \"myapp/config\"\n"
    );
    assert_eq!(report, Report { directories: 1, text_files: 2, binary_files: 0 });
}

#[test]
fn test_rename_paths_substitutes_names() {
    let template = TempDir::new().unwrap();
    write_file(template.path(), "cmd/response-std/main.go", b"package main // response-std\n");

    let work_dir = TempDir::new().unwrap();
    let project = ProjectContext::new("myapp", work_dir.path()).unwrap();
    let options = GenerateOptions { rename_paths: true, ..Default::default() };
    generate(&project, &local(&template), &options).unwrap();

    let dest = project.destination_root();
    assert!(!dest.join("cmd/response-std").exists());
    assert_eq!(
        fs::read_to_string(dest.join("cmd/myapp/main.go")).unwrap(),
        "package main // myapp\n"
    );
}

#[test]
fn test_binary_files_are_copied_verbatim() {
    let png: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDRresponse-std\0\xff\xfe";
    let template = TempDir::new().unwrap();
    write_file(template.path(), "assets/logo.png", png);

    let work_dir = TempDir::new().unwrap();
    let project = ProjectContext::new("myapp", work_dir.path()).unwrap();
    let report = generate(&project, &local(&template), &GenerateOptions::default()).unwrap();

    assert_eq!(fs::read(project.destination_root().join("assets/logo.png")).unwrap(), png);
    assert_eq!(report.binary_files, 1);
}

#[test]
fn test_existing_destination_is_rejected_before_any_write() {
    let template = TempDir::new().unwrap();
    write_file(template.path(), "go.mod", b"module response-std\n");

    let work_dir = TempDir::new().unwrap();
    let existing = work_dir.path().join("myapp");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("notes.txt"), "keep me").unwrap();

    let project = ProjectContext::new("myapp", work_dir.path()).unwrap();
    let err = generate(&project, &local(&template), &GenerateOptions::default()).unwrap_err();

    assert!(matches!(err, Error::DestinationExists { .. }));
    assert_eq!(fs::read_dir(&existing).unwrap().count(), 1);
    assert_eq!(fs::read_to_string(existing.join("notes.txt")).unwrap(), "keep me");
}

#[test]
fn test_existing_destination_skips_download() {
    let work_dir = TempDir::new().unwrap();
    fs::create_dir(work_dir.path().join("myapp")).unwrap();

    let project = ProjectContext::new("myapp", work_dir.path()).unwrap();
    let source = TemplateSource::RemoteArchive("http://127.0.0.1:9/t.zip".to_string());
    let err = generate(&project, &source, &GenerateOptions::default()).unwrap_err();

    assert!(matches!(err, Error::DestinationExists { .. }));
    assert!(!work_dir.path().join("template.zip").exists());
}

#[test]
fn test_template_config_is_honored() {
    let template = TempDir::new().unwrap();
    write_file(
        template.path(),
        "starter.yaml",
        b"placeholders:\n  - my-template\nrename_paths: true\nignore:\n  - \"*.log\"\n",
    );
    write_file(template.path(), "my-template.txt", b"name: my-template, kept: response-std\n");
    write_file(template.path(), "build.log", b"noise\n");

    let work_dir = TempDir::new().unwrap();
    let project = ProjectContext::new("myapp", work_dir.path()).unwrap();
    let report = generate(&project, &local(&template), &GenerateOptions::default()).unwrap();

    let dest = project.destination_root();
    assert_eq!(
        fs::read_to_string(dest.join("myapp.txt")).unwrap(),
        "name: myapp, kept: response-std\n"
    );
    assert!(!dest.join("starter.yaml").exists());
    assert!(!dest.join("build.log").exists());
    assert_eq!(report.files(), 1);
}

#[test]
fn test_invalid_template_config_is_reported() {
    let template = TempDir::new().unwrap();
    write_file(template.path(), "starter.json", b"{\"placeholders\": [\"app\", \"my-app\"]}");

    let work_dir = TempDir::new().unwrap();
    let project = ProjectContext::new("myapp", work_dir.path()).unwrap();
    let err = generate(&project, &local(&template), &GenerateOptions::default()).unwrap_err();

    assert!(matches!(err, Error::ConfigError(_)));
    assert!(!project.destination_root().exists());
}

#[test]
fn test_embedded_template_is_materialized() {
    let work_dir = TempDir::new().unwrap();
    let project = ProjectContext::new("myapp", work_dir.path()).unwrap();
    let source = TemplateSource::Embedded(&EMBEDDED_TEMPLATE);

    let report = generate(&project, &source, &GenerateOptions::default()).unwrap();

    let dest = project.destination_root();
    assert!(fs::read_to_string(dest.join("go.mod")).unwrap().starts_with("module myapp\n"));
    assert!(fs::read_to_string(dest.join("main.go")).unwrap().contains("\"myapp/response\""));
    assert!(dest.join("config/config.go").is_file());
    assert_eq!(report.to_string(), "2 directories, 6 files (0 binary)");
}

#[cfg(unix)]
#[test]
fn test_embedded_files_get_default_mode() {
    use std::os::unix::fs::PermissionsExt;

    let work_dir = TempDir::new().unwrap();
    let project = ProjectContext::new("myapp", work_dir.path()).unwrap();
    generate(&project, &TemplateSource::Embedded(&EMBEDDED_TEMPLATE), &GenerateOptions::default())
        .unwrap();

    let metadata = fs::metadata(project.destination_root().join("go.mod")).unwrap();
    assert_eq!(metadata.permissions().mode() & 0o777, 0o644);
}

#[test]
fn test_invalid_project_names() {
    let work_dir = TempDir::new().unwrap();
    for name in ["", "  ", ".", "..", "a/b", "a\\b"] {
        assert!(
            matches!(
                ProjectContext::new(name, work_dir.path()),
                Err(Error::ValidationError { .. })
            ),
            "'{name}' should be rejected"
        );
    }
    assert_eq!(fs::read_dir(work_dir.path()).unwrap().count(), 0);
}

fn remote_run_options(scratch: &TempDir) -> GenerateOptions {
    GenerateOptions {
        scratch_parent: Some(scratch.path().to_path_buf()),
        timeout: Some(Duration::from_secs(5)),
        ..Default::default()
    }
}

fn entry_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_remote_template_is_materialized_and_scratch_removed() {
    let archive = build_zip(&[
        ("go-starter-main/README.md", "repository readme\n"),
        ("go-starter-main/template/go.mod", "module response-std\n"),
        ("go-starter-main/template/cmd/main.go", "package main // response-std\n"),
    ]);
    let base = serve_once("200 OK", archive);
    let source = TemplateSource::RemoteArchive(format!(
        "{base}/owner/go-starter/archive/refs/heads/main.zip"
    ));

    let work_dir = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    let project = ProjectContext::new("myapp", work_dir.path()).unwrap();
    let report = generate(&project, &source, &remote_run_options(&scratch)).unwrap();

    let dest = project.destination_root();
    assert_eq!(fs::read_to_string(dest.join("go.mod")).unwrap(), "module myapp\n");
    assert_eq!(
        fs::read_to_string(dest.join("cmd/main.go")).unwrap(),
        "package main // myapp\n"
    );
    assert!(!dest.join("README.md").exists());
    assert_eq!(report, Report { directories: 1, text_files: 2, binary_files: 0 });

    assert_eq!(entry_names(work_dir.path()), vec!["myapp"]);
    assert!(entry_names(scratch.path()).is_empty());
}

#[test]
fn test_remote_failure_after_extraction_removes_scratch() {
    let archive = build_zip(&[
        ("template/starter.json", "{\"placeholders\": [\"a\", \"ab\"]}"),
        ("template/go.mod", "module ab\n"),
    ]);
    let base = serve_once("200 OK", archive);
    let source = TemplateSource::RemoteArchive(format!("{base}/t.zip"));

    let work_dir = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    let project = ProjectContext::new("myapp", work_dir.path()).unwrap();
    let err = generate(&project, &source, &remote_run_options(&scratch)).unwrap_err();

    assert!(matches!(err, Error::ConfigError(_)));
    assert!(!project.destination_root().exists());
    assert!(entry_names(work_dir.path()).is_empty());
    assert!(entry_names(scratch.path()).is_empty());
}
