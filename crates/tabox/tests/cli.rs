//! End-to-end tests against the built binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tabox"))
        .args(args)
        .output()
        .unwrap()
}

const LAYOUT: &str = r#"{
    "columns": [
        {"header": "Name", "key": "name"},
        {"header": "CPU", "key": "cpu", "data_type": "kcpu",
         "justification": "right", "summary": "sum"}
    ]
}"#;

const DATA: &str = r#"[
    {"name": "api", "cpu": "500m"},
    {"name": "db", "cpu": "1"}
]"#;

#[test]
fn renders_a_table() {
    let dir = TempDir::new().unwrap();
    let layout = write(dir.path(), "layout.json", LAYOUT);
    let data = write(dir.path(), "data.json", DATA);

    let out = run(&["--layout", &layout, "--data", &data, "--no-color"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("│ api"));
    assert!(stdout.contains("500m"));
    assert!(stdout.contains("1,500m"), "summary row missing: {stdout}");
    assert!(stdout.starts_with('╭'));
    assert!(stdout.ends_with("╯\n"));
}

#[test]
fn no_color_strips_all_escapes() {
    let dir = TempDir::new().unwrap();
    let layout = write(dir.path(), "layout.json", LAYOUT);
    let data = write(dir.path(), "data.json", DATA);

    let out = run(&["--layout", &layout, "--data", &data, "--no-color"]);
    assert!(!String::from_utf8(out.stdout).unwrap().contains('\u{1b}'));
}

#[test]
fn color_is_on_by_default_even_when_piped() {
    let dir = TempDir::new().unwrap();
    let layout = write(dir.path(), "layout.json", LAYOUT);
    let data = write(dir.path(), "data.json", DATA);

    let out = run(&["--layout", &layout, "--data", &data]);
    assert!(out.status.success());
    assert!(String::from_utf8(out.stdout).unwrap().contains("\u{1b}["));
}

#[test]
fn malformed_layout_fails_with_empty_stdout() {
    let dir = TempDir::new().unwrap();
    let layout = write(dir.path(), "layout.json", "{ not json");
    let data = write(dir.path(), "data.json", DATA);

    let out = run(&["--layout", &layout, "--data", &data]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(!out.stderr.is_empty());
}

#[test]
fn missing_file_fails_with_a_diagnostic() {
    let dir = TempDir::new().unwrap();
    let data = write(dir.path(), "data.json", DATA);
    let absent = dir.path().join("nope.json");

    let out = run(&["--layout", &absent.to_string_lossy(), "--data", &data]);
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("nope.json"));
}

#[test]
fn debug_goes_to_stderr_and_stdout_is_stable() {
    let dir = TempDir::new().unwrap();
    let layout = write(dir.path(), "layout.json", LAYOUT);
    let data = write(dir.path(), "data.json", DATA);

    let plain = run(&["--layout", &layout, "--data", &data, "--no-color"]);
    let debug = run(&["--layout", &layout, "--data", &data, "--no-color", "--debug"]);
    assert_eq!(plain.stdout, debug.stdout);
    let stderr = String::from_utf8(debug.stderr).unwrap();
    assert!(stderr.contains("table width"));
}

#[test]
fn dynamic_title_runs_through_the_shell() {
    let dir = TempDir::new().unwrap();
    let layout = write(
        dir.path(),
        "layout.json",
        r#"{
            "title": "host $(echo fixed-host)",
            "columns": [{"header": "Name", "key": "name"}]
        }"#,
    );
    let data = write(dir.path(), "data.json", r#"[{"name": "api"}]"#);

    let out = run(&["--layout", &layout, "--data", &data, "--no-color"]);
    assert!(out.status.success());
    assert!(String::from_utf8(out.stdout).unwrap().contains("host fixed-host"));
}

#[test]
fn too_many_columns_warns_but_renders() {
    let cols: Vec<String> = (0..40)
        .map(|i| format!(r#"{{"header": "H{i}", "key": "k{i}"}}"#))
        .collect();
    let layout_json = format!(r#"{{ "columns": [{}] }}"#, cols.join(","));

    let dir = TempDir::new().unwrap();
    let layout = write(dir.path(), "layout.json", &layout_json);
    let data = write(dir.path(), "data.json", "[]");

    let out = run(&["--layout", &layout, "--data", &data, "--no-color"]);
    assert!(out.status.success());
    assert!(String::from_utf8(out.stderr).unwrap().contains("warning"));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("H31"));
    assert!(!stdout.contains("H32"));
}
