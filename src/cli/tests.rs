//! Unit tests for CLI commands

use crate::cli::{run_cli, Cli, Commands};
use clap::Parser;
use std::io::Write;

const MANIFEST: &str = r#"
routes:
  - path: /
    handler: home
  - methods: [GET, POST]
    path: /item/<id>
    handler: show_item
    constraints:
      id: '\d+'
  - path: /greet/<name?>
    handler: greet
not_found: missing
"#;

fn manifest_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(MANIFEST.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    run_cli(&cli, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_resolve_command_parses() {
    let cli = Cli::try_parse_from(["trierouter", "resolve", "--routes", "r.yaml", "GET", "/a"])
        .unwrap();
    match cli.command {
        Commands::Resolve {
            routes,
            method,
            path,
        } => {
            assert_eq!(routes.to_string_lossy(), "r.yaml");
            assert_eq!(method, "GET");
            assert_eq!(path, "/a");
        }
        Commands::Inspect { .. } => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_resolve_requires_method_and_path() {
    assert!(Cli::try_parse_from(["trierouter", "resolve", "--routes", "r.yaml", "GET"]).is_err());
}

#[test]
fn test_inspect_lists_routes() {
    let file = manifest_file();
    let path = file.path().to_str().unwrap();
    let output = run(&["trierouter", "inspect", "--routes", path]);
    let lines: Vec<&str> = output.lines().map(str::trim_end).collect();
    assert_eq!(
        lines,
        vec![
            "GET     /",
            "GET     /item/<id>",
            "GET     /greet",
            "GET     /greet/<name?>",
            "POST    /item/<id>",
            "*       missing",
        ]
    );
}

#[test]
fn test_resolve_prints_status_and_body() {
    let file = manifest_file();
    let path = file.path().to_str().unwrap();

    let output = run(&["trierouter", "resolve", "--routes", path, "POST", "/item/7/?x=1"]);
    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("200"));
    let body: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(body["handler"], "show_item");
    assert_eq!(body["params"]["id"], "7");

    let output = run(&["trierouter", "resolve", "--routes", path, "GET", "/item/abc"]);
    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("404"));
    let body: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(body["handler"], "missing");
    assert_eq!(body["path"], "/item/abc");
}

#[test]
fn test_missing_manifest_is_an_error() {
    let cli = Cli::try_parse_from([
        "trierouter",
        "inspect",
        "--routes",
        "/definitely/not/here.yaml",
    ])
    .unwrap();
    let err = run_cli(&cli, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read route manifest"));
}
