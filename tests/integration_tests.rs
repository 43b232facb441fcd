//! Integration tests for the indivo-admin CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to get an indivo-admin command isolated from the caller's environment
fn indivo_admin() -> Command {
    let mut cmd = Command::cargo_bin("indivo-admin").unwrap();
    cmd.env_remove("INDIVO_CONTRIB_SCHEMA_ROOTS")
        .env_remove("INDIVO_CORE_SCHEMA_ROOTS")
        .env_remove("INDIVO_ADMIN_DEV_MODE")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to write a schema bundle directory
fn write_bundle(root: &Path, name: &str, schema: &str, transform: Option<&str>) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("schema.xsd"), schema).unwrap();
    if let Some(xsl) = transform {
        fs::write(dir.join("transform.xsl"), xsl).unwrap();
    }
}

/// Helper to create contrib and core roots with a few bundles
fn setup_schema_roots() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let contrib = tmp.path().join("contrib");
    let core = tmp.path().join("core");
    fs::create_dir_all(&contrib).unwrap();
    fs::create_dir_all(&core).unwrap();

    write_bundle(
        &core,
        "simplenote",
        "<xs:element name=\"simpleclinicalnote\"/>",
        Some("<xsl:template match=\"simpleclinicalnote\"/>"),
    );
    write_bundle(&core, "lab", "<xs:element name=\"LabResult\"/>", None);
    write_bundle(&contrib, "lab", "<xs:element name=\"LabResult\" site=\"contrib\"/>", None);
    tmp
}

fn root_args(tmp: &TempDir) -> Vec<String> {
    vec![
        "--contrib-root".to_string(),
        tmp.path().join("contrib").display().to_string(),
        "--core-root".to_string(),
        tmp.path().join("core").display().to_string(),
    ]
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    indivo_admin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indivo"));
}

#[test]
fn test_version_displays() {
    indivo_admin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("indivo-admin"));
}

#[test]
fn test_unknown_command_fails() {
    indivo_admin()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Locate Command Tests
// ============================================================================

#[test]
fn test_locate_prints_core_schema_path() {
    let tmp = setup_schema_roots();
    let expected = tmp.path().join("core/simplenote/schema.xsd");

    indivo_admin()
        .current_dir(tmp.path())
        .args(root_args(&tmp))
        .args(["locate", "urn:x#simpleclinicalnote"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn test_locate_prefers_contrib() {
    let tmp = setup_schema_roots();
    let expected = tmp.path().join("contrib/lab/schema.xsd");

    indivo_admin()
        .current_dir(tmp.path())
        .args(root_args(&tmp))
        .args(["locate", "http://indivo.org/vocab/xml/documents#LabResult"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn test_locate_transform() {
    let tmp = setup_schema_roots();

    indivo_admin()
        .current_dir(tmp.path())
        .args(root_args(&tmp))
        .args(["locate", "--transform", "urn:x#simpleclinicalnote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("transform.xsl"));
}

#[test]
fn test_locate_json_includes_content() {
    let tmp = setup_schema_roots();

    let output = indivo_admin()
        .current_dir(tmp.path())
        .args(root_args(&tmp))
        .args(["--format", "json", "locate", "urn:x#simpleclinicalnote"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["kind"], "schema");
    assert!(value["content"].as_str().unwrap().contains("simpleclinicalnote"));
}

#[test]
fn test_locate_unknown_type_fails() {
    let tmp = setup_schema_roots();

    indivo_admin()
        .current_dir(tmp.path())
        .args(root_args(&tmp))
        .args(["locate", "urn:x#unknowntype"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknowntype"));
}

#[test]
fn test_locate_without_fragment_fails() {
    let tmp = setup_schema_roots();

    indivo_admin()
        .current_dir(tmp.path())
        .args(root_args(&tmp))
        .args(["locate", "urn:x:simpleclinicalnote"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid document type"));
}

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_show_renders_escaped_html() {
    let tmp = setup_schema_roots();

    indivo_admin()
        .current_dir(tmp.path())
        .args(root_args(&tmp))
        .args(["show", "urn:x#simpleclinicalnote"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<b>"))
        .stdout(predicate::str::contains("&lt;xs:element"));
}

#[test]
fn test_show_not_found_degrades_to_message() {
    let tmp = setup_schema_roots();

    indivo_admin()
        .current_dir(tmp.path())
        .args(root_args(&tmp))
        .args(["show", "urn:x#unknowntype"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No schema.xsd found"))
        .stdout(predicate::str::contains("contrib"))
        .stdout(predicate::str::contains("core"));
}

// ============================================================================
// Config and Roots Tests
// ============================================================================

#[test]
fn test_roots_from_project_config() {
    let tmp = setup_schema_roots();
    let core = tmp.path().join("core");
    fs::write(
        tmp.path().join("indivo-admin.yaml"),
        format!("core_schema_roots:\n  - {}\n", core.display()),
    )
    .unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["--format", "json", "roots"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tier\": \"core\""))
        .stdout(predicate::str::contains("\"exists\": true"));
}

#[test]
fn test_env_roots() {
    let tmp = setup_schema_roots();

    indivo_admin()
        .current_dir(tmp.path())
        .env("INDIVO_CORE_SCHEMA_ROOTS", tmp.path().join("core"))
        .args(["locate", "urn:x#simpleclinicalnote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("simplenote"));
}

#[test]
fn test_explicit_config_must_exist() {
    let tmp = TempDir::new().unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["--config", "missing.yaml", "roots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read config file"));
}

// ============================================================================
// Admin Registry and Links Tests
// ============================================================================

#[test]
fn test_models_list() {
    let tmp = TempDir::new().unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["models", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CodedValue"))
        .stdout(predicate::str::contains("SimpleClinicalNote"));
}

#[test]
fn test_models_show_unknown_fails() {
    let tmp = TempDir::new().unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["models", "show", "Spaceship"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown model"));
}

#[test]
fn test_models_show_dev_mode_secrets() {
    let tmp = TempDir::new().unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .env("INDIVO_ADMIN_DEV_MODE", "1")
        .args(["models", "show", "account"])
        .assert()
        .success()
        .stdout(predicate::str::contains("primary_secret"));
}

#[test]
fn test_links_document_sidebar() {
    let tmp = TempDir::new().unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["links", "document", "--id", "d1", "--record", "r1", "--owner", "a1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<a href=\"/admin/indivo/fact/?document=d1\">Facts</a>",
        ))
        .stdout(predicate::str::contains("/admin/indivo/account/a1/"));
}

#[test]
fn test_links_record_with_demographics() {
    let tmp = TempDir::new().unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["links", "record", "--id", "r1", "--label", "Jane's record"])
        .args(["--demographics", "dm7", "--given-name", "Jane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane's record (r1)"))
        .stdout(predicate::str::contains(
            "<a href=\"/admin/indivo/demographics/dm7/\">Jane</a>",
        ));
}

#[test]
fn test_links_record_demographics_needs_name() {
    let tmp = TempDir::new().unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["links", "record", "--id", "r1", "--label", "x", "--demographics", "dm7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--given-name"));
}

#[test]
fn test_links_demographics_document() {
    let tmp = TempDir::new().unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["links", "demographics", "--document", "d 1", "--fqn", "demo@apps"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<a href=\"/admin/indivo/document/d%201/\">demo@apps : d 1</a>",
        ));
}

#[test]
fn test_links_audit_missing_columns() {
    let tmp = TempDir::new().unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["links", "audit", "--record", "r1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/admin/indivo/record/r1/"))
        .stdout(predicate::str::contains("no document"));
}

#[test]
fn test_links_encounter_json() {
    let tmp = TempDir::new().unwrap();

    let output = indivo_admin()
        .current_dir(tmp.path())
        .args(["--format", "json", "links", "encounter"])
        .args(["--prefix", "Dr.", "--given", "Ada", "--family", "Lovelace"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["provider"], "Dr. Ada Lovelace");
    assert_eq!(value["fact"], "no record");
}

#[test]
fn test_links_fact_columns() {
    let tmp = TempDir::new().unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["links", "fact", "--document", "d9", "--fqn", "allergy@apps.indivo.org"])
        .args(["--record-label", "Jane's record (r1)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("allergy@apps.indivo.org (d9)"))
        .stdout(predicate::str::contains("Jane's record (r1)"));
}

#[test]
fn test_links_use_configured_prefix() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("indivo-admin.yaml"), "admin_prefix: /backoffice\n").unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["links", "encounter", "--fact", "f3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<a href=\"/backoffice/indivo/fact/f3/\">Fact: f3</a>",
        ));
}

// ============================================================================
// Failure Rendering and Root Resolution Tests
// ============================================================================

#[cfg(unix)]
#[test]
fn test_show_unreadable_root_degrades_to_message() {
    let tmp = TempDir::new().unwrap();
    let looped = tmp.path().join("looped");
    std::os::unix::fs::symlink(&looped, &looped).unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["--core-root", looped.to_str().unwrap()])
        .args(["show", "urn:x#simpleclinicalnote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot read schema root"));
}

#[cfg(unix)]
#[test]
fn test_locate_unreadable_root_fails() {
    let tmp = TempDir::new().unwrap();
    let looped = tmp.path().join("looped");
    std::os::unix::fs::symlink(&looped, &looped).unwrap();

    indivo_admin()
        .current_dir(tmp.path())
        .args(["--core-root", looped.to_str().unwrap()])
        .args(["locate", "urn:x#simpleclinicalnote"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read schema root"));
}

#[test]
fn test_root_under_file_is_skipped() {
    let tmp = setup_schema_roots();
    let bogus = tmp.path().join("core/simplenote/schema.xsd/nested");

    indivo_admin()
        .current_dir(tmp.path())
        .args(["--contrib-root", bogus.to_str().unwrap()])
        .args(["--core-root", tmp.path().join("core").to_str().unwrap()])
        .args(["locate", "urn:x#simpleclinicalnote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("simplenote"));
}

#[test]
fn test_show_json_is_pretty() {
    let tmp = setup_schema_roots();

    let output = indivo_admin()
        .current_dir(tmp.path())
        .args(root_args(&tmp))
        .args(["--format", "json", "show", "urn:x#unknowntype"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.trim_end().contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["found"], false);
    assert_eq!(value["error"], "not_found");
}

#[test]
fn test_relative_config_roots_from_subdirectory() {
    let tmp = setup_schema_roots();
    fs::write(
        tmp.path().join("indivo-admin.yaml"),
        "core_schema_roots:\n  - core\n",
    )
    .unwrap();
    let nested = tmp.path().join("work/deep");
    fs::create_dir_all(&nested).unwrap();

    indivo_admin()
        .current_dir(&nested)
        .args(["locate", "urn:x#simpleclinicalnote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("simplenote"));
}
