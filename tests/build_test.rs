use std::fs;

use tempfile::TempDir;
use tfustomize::build::{build_target, write_output};
use tfustomize::error::Error;

fn write(dir: &TempDir, name: &str, content: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "base/main.tf",
        "resource \"aws_s3_bucket\" \"logs\" {\n  bucket = \"logs-dev\"\n}\n",
    );
    write(
        &dir,
        "overlay/tfustomization.hcl",
        r#"
tfustomize {
  syntax_version = "v1"
}

resources {
  paths = ["../base"]
}

patches {
  paths = ["patches"]
}
"#,
    );
    write(
        &dir,
        "overlay/patches/bucket.tf",
        "resource \"aws_s3_bucket\" \"logs\" {\n  bucket = \"logs-prod\"\n}\n",
    );
    write(
        &dir,
        "overlay/patches/outputs.tf",
        "output \"bucket\" {\n  value = aws_s3_bucket.logs.bucket\n}\n",
    );
    dir
}

#[test]
fn test_build_target() {
    let dir = setup_project();

    let result = build_target(dir.path().join("overlay")).unwrap();

    assert_eq!(
        result,
        r#"output "bucket" {
  value = aws_s3_bucket.logs.bucket
}

resource "aws_s3_bucket" "logs" {
  bucket = "logs-prod"
}
"#
    );
}

#[test]
fn test_write_output_creates_directory() {
    let dir = setup_project();
    let target = dir.path().join("overlay");
    let result = build_target(&target).unwrap();

    let written = write_output(target.join("generated"), "main.tf", &result).unwrap();

    assert_eq!(written, target.join("generated").join("main.tf"));
    assert_eq!(fs::read_to_string(written).unwrap(), result);
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();

    let err = build_target(dir.path()).unwrap_err();

    match err {
        Error::NotFound { path } => assert!(path.ends_with("tfustomization.hcl")),
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_config_without_resources() {
    let dir = TempDir::new().unwrap();
    write(&dir, "tfustomization.hcl", "patches {\n  paths = [\"p.tf\"]\n}\n");

    let err = build_target(dir.path()).unwrap_err();

    assert!(matches!(err, Error::MissingConfiguration(_)));
}

#[test]
fn test_missing_patch_path() {
    let dir = setup_project();
    write(
        &dir,
        "overlay/tfustomization.hcl",
        "resources {\n  paths = [\"../base\"]\n}\npatches {\n  paths = [\"nope.tf\"]\n}\n",
    );

    let err = build_target(dir.path().join("overlay")).unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
}
