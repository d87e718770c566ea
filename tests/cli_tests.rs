//! CLI integration tests using the REAL jarflat binary

mod common;

use common::{JarBuilder, TestWorkspace, jarflat_cmd};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    jarflat_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("jar-in-jar"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--staging-dir"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_version_output() {
    jarflat_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jarflat"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    jarflat_cmd()
        .arg("--frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--frobnicate"));
}

#[test]
fn test_missing_input_directory_fails() {
    let workspace = TestWorkspace::new();
    let missing = workspace.temp.path().join("nowhere");

    jarflat_cmd()
        .arg(&missing)
        .arg("--output")
        .arg(&workspace.output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Input directory not found"));
}

#[test]
fn test_existing_output_directory_fails() {
    let workspace = TestWorkspace::new();
    workspace.add_jar("a.jar", &JarBuilder::new().fabric_mod("a", "1.0.0").build());
    std::fs::create_dir_all(&workspace.output).unwrap();

    workspace
        .cmd()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Output directory already exists"));
    assert!(workspace.output_names().is_empty());
}

#[test]
fn test_default_output_is_inside_input() {
    let workspace = TestWorkspace::new();
    workspace.add_jar("a.jar", &JarBuilder::new().fabric_mod("a", "1.0.0").build());

    jarflat_cmd()
        .arg(&workspace.mods)
        .arg("--staging-dir")
        .arg(&workspace.staging)
        .env_remove("JARFLAT_OUTPUT")
        .assert()
        .success();
    assert!(workspace.mods.join("flattenedMods").join("a.jar").is_file());
}

#[test]
fn test_input_and_output_from_environment() {
    let workspace = TestWorkspace::new();
    workspace.add_jar("a.jar", &JarBuilder::new().fabric_mod("a", "1.0.0").build());

    jarflat_cmd()
        .env("JARFLAT_INPUT", &workspace.mods)
        .env("JARFLAT_OUTPUT", &workspace.output)
        .arg("--staging-dir")
        .arg(&workspace.staging)
        .assert()
        .success();
    assert_eq!(workspace.output_names(), ["a.jar"]);
}

#[test]
fn test_verbose_logs_debug_output() {
    let workspace = TestWorkspace::new();
    workspace.add_jar("a.jar", &JarBuilder::new().fabric_mod("a", "1.0.0").build());

    workspace
        .cmd()
        .arg("--verbose")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("Flattening"));
}
