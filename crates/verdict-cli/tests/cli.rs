use std::{fs, path::PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

fn cli() -> Command {
    Command::cargo_bin("verdict-cli").expect("Binary exists")
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write a fixture");
    path
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("UTF-8 output")
}

#[test]
fn valid_instance() {
    let dir = TempDir::new().expect("Temporary directory");
    let schema = write(&dir, "schema.json", r#"{"type": "integer", "minimum": 0}"#);
    let instance = write(&dir, "instance.json", "5");

    let output = cli()
        .arg(&schema)
        .arg("-i")
        .arg(&instance)
        .output()
        .expect("Runs");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        format!("{} - VALID\n", instance.display())
    );
}

#[test]
fn one_invalid_instance_fails_the_run() {
    let dir = TempDir::new().expect("Temporary directory");
    let schema = write(&dir, "schema.json", r#"{"type": "integer", "minimum": 0}"#);
    let good = write(&dir, "good.json", "5");
    let bad = write(&dir, "bad.json", "-5");

    let output = cli()
        .arg(&schema)
        .arg("-i")
        .arg(&good)
        .arg("-i")
        .arg(&bad)
        .output()
        .expect("Runs");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        format!(
            "{} - VALID\n{} - INVALID\n",
            good.display(),
            bad.display()
        )
    );
}

#[test]
fn plain_output() {
    let dir = TempDir::new().expect("Temporary directory");
    let schema = write(&dir, "schema.json", r#"{"maxLength": 3}"#);
    let short = write(&dir, "short.json", r#""abc""#);
    let long = write(&dir, "long.json", r#""abcd""#);

    let output = cli()
        .arg(&schema)
        .args(["--output", "plain"])
        .arg("-i")
        .arg(&short)
        .arg("-i")
        .arg(&long)
        .output()
        .expect("Runs");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "true\nfalse\n");
}

#[test]
fn broken_schema_makes_everything_invalid() {
    let dir = TempDir::new().expect("Temporary directory");
    let schema = write(&dir, "schema.json", r#"{"type": "invalid"}"#);
    let instance = write(&dir, "instance.json", "1");

    let output = cli()
        .arg(&schema)
        .args(["--output", "plain", "-i"])
        .arg(&instance)
        .output()
        .expect("Runs");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "false\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Schema error"));
}

#[test]
fn unparsable_instance() {
    let dir = TempDir::new().expect("Temporary directory");
    let schema = write(&dir, "schema.json", "{}");
    let instance = write(&dir, "instance.json", "{not json");

    let output = cli()
        .arg(&schema)
        .arg("-i")
        .arg(&instance)
        .output()
        .expect("Runs");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse"));
}

#[test]
fn missing_schema_file() {
    let dir = TempDir::new().expect("Temporary directory");
    let instance = write(&dir, "instance.json", "1");

    let output = cli()
        .arg(dir.path().join("missing.json"))
        .arg("-i")
        .arg(&instance)
        .output()
        .expect("Runs");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn external_resource() {
    let dir = TempDir::new().expect("Temporary directory");
    let schema = write(
        &dir,
        "schema.json",
        r#"{"$ref": "http://example.com/positive.json"}"#,
    );
    let positive = write(&dir, "positive.json", r#"{"exclusiveMinimum": 0}"#);
    let instance = write(&dir, "instance.json", "0");

    let output = cli()
        .arg(&schema)
        .arg("--resource")
        .arg(format!("http://example.com/positive.json={}", positive.display()))
        .args(["--output", "plain", "-i"])
        .arg(&instance)
        .output()
        .expect("Runs");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "false\n");
}

#[test]
fn unresolvable_reference_without_resource() {
    let dir = TempDir::new().expect("Temporary directory");
    let schema = write(
        &dir,
        "schema.json",
        r#"{"$ref": "http://example.com/positive.json"}"#,
    );
    let instance = write(&dir, "instance.json", "1");

    let output = cli()
        .arg(&schema)
        .args(["--output", "plain", "-i"])
        .arg(&instance)
        .output()
        .expect("Runs");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "false\n");
}

#[test]
fn configuration_file() {
    let dir = TempDir::new().expect("Temporary directory");
    let schema = write(&dir, "schema.json", r##"{"$ref": "#/$defs/a", "$defs": {"a": {"$ref": "#/$defs/b"}, "b": {"$ref": "#/$defs/c"}, "c": {"type": "integer"}}}"##);
    let config = write(&dir, "config.json", r#"{"max_ref_depth": 2}"#);
    let instance = write(&dir, "instance.json", "1");

    let limited = cli()
        .arg(&schema)
        .arg("--config")
        .arg(&config)
        .args(["--output", "plain", "-i"])
        .arg(&instance)
        .output()
        .expect("Runs");
    assert_eq!(stdout(&limited), "false\n");

    let overridden = cli()
        .arg(&schema)
        .arg("--config")
        .arg(&config)
        .args(["--max-ref-depth", "8", "--output", "plain", "-i"])
        .arg(&instance)
        .output()
        .expect("Runs");
    assert_eq!(overridden.status.code(), Some(0));
    assert_eq!(stdout(&overridden), "true\n");
}

#[test]
fn skipping_schema_validation() {
    let dir = TempDir::new().expect("Temporary directory");
    let schema = write(&dir, "schema.json", r#"{"minimum": 1, "$comment": 5}"#);
    let instance = write(&dir, "instance.json", "2");

    let checked = cli()
        .arg(&schema)
        .args(["--output", "plain", "-i"])
        .arg(&instance)
        .output()
        .expect("Runs");
    assert_eq!(stdout(&checked), "false\n");

    let unchecked = cli()
        .arg(&schema)
        .args(["--no-schema-validation", "--output", "plain", "-i"])
        .arg(&instance)
        .output()
        .expect("Runs");
    assert_eq!(stdout(&unchecked), "true\n");
}

#[test]
fn instance_is_required() {
    let dir = TempDir::new().expect("Temporary directory");
    let schema = write(&dir, "schema.json", "{}");
    cli().arg(&schema).assert().failure();
}
