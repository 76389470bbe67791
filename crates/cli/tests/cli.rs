//! Runs the `shapegen` binary against the shop catalog fixture.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

fn shop_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("core")
        .join("tests")
        .join("fixtures")
        .join("shop.json")
}

fn shapegen() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_shapegen"));
    command.env("SHAPEGEN_LOG", "error");
    command
}

#[test]
fn test_generates_into_output_directory() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let output = dir.path().join("ts");

    let result = shapegen()
        .arg("--files")
        .arg(shop_fixture())
        .arg("--output")
        .arg(&output)
        .current_dir(dir.path())
        .output()
        .expect("Failed to run shapegen");

    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert!(output.join("IRestApi.ts").is_file());
    let widget = fs::read_to_string(output.join("Widget.ts")).unwrap();
    assert!(widget.starts_with("import { CategoryEnum } from \"./CategoryEnum\";"));
}

#[test]
fn test_dry_run_lists_files_without_writing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let output = dir.path().join("ts");

    let result = shapegen()
        .args(["--dry-run", "-m", "typescript", "-o"])
        .arg(&output)
        .arg("-f")
        .arg(shop_fixture())
        .current_dir(dir.path())
        .output()
        .expect("Failed to run shapegen");

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        [
            "IRestApi.ts",
            "WidgetsController.ts",
            "Widget.ts",
            "CategoryEnum.ts"
        ]
    );
    assert!(!output.exists());
}

#[test]
fn test_failure_exits_with_one() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ \"types\": [ { \"name\": \"X\" } ] }").unwrap();

    let result = shapegen()
        .arg("-f")
        .arg(&broken)
        .current_dir(dir.path())
        .output()
        .expect("Failed to run shapegen");

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("broken.json"));
}

#[test]
fn test_config_file_in_working_directory() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("shapegen.toml"),
        format!(
            "output-dir = \"client\"\ninputs = [{:?}]\n",
            shop_fixture().to_string_lossy()
        ),
    )
    .unwrap();

    let result = shapegen()
        .current_dir(dir.path())
        .output()
        .expect("Failed to run shapegen");

    assert!(result.status.success());
    assert!(dir.path().join("client").join("CategoryEnum.ts").is_file());
}
