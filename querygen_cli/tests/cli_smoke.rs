use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::tempdir;

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("workspace root")
        .to_path_buf()
}

fn querygen() -> Command {
    if let Some(bin) = option_env!("CARGO_BIN_EXE_querygen_cli") {
        Command::new(bin)
    } else {
        let mut cmd = Command::new("cargo");
        cmd.args(["run", "-q", "-p", "querygen_cli", "--"]);
        cmd
    }
}

#[test]
fn cli_generates_demo_catalog() {
    let catalog = workspace_root().join("demos").join("catalog.json");
    assert!(catalog.exists(), "demo catalog missing at {}", catalog.display());

    let temp_dir = tempdir().expect("temp output dir");
    let output = temp_dir.path().join("queries.txt");

    let status = querygen()
        .args([
            "catalog",
            "--catalog",
            catalog.to_str().expect("catalog"),
            "--output",
            output.to_str().expect("output"),
        ])
        .current_dir(workspace_root())
        .status()
        .expect("failed to spawn querygen_cli");
    assert!(status.success(), "querygen_cli exited with {status:?}");

    let written = fs::read_to_string(&output).expect("generated queries");
    let lines: Vec<&str> = written.lines().collect();
    // 1 + 1 + 15 + 3 + 1 + 15 + 2
    assert_eq!(lines.len(), 38);
    assert_eq!(lines[0], "http://localhost:8080/app/departments");
    assert_eq!(lines[1], "http://localhost:8080/classes");
    assert_eq!(
        lines[37],
        "http://localhost:8080/products/by-filters?product=654321&promotion=123456"
    );
}

#[test]
fn cli_generates_inline_query_to_stdout() {
    let output = querygen()
        .args([
            "query",
            "--name",
            "Regions",
            "--host",
            "http://localhost:8080/",
            "--url",
            "/regions",
            "--mix",
            "region=north america,europe",
            "--always-filter",
        ])
        .current_dir(workspace_root())
        .output()
        .expect("failed to spawn querygen_cli");
    assert!(output.status.success(), "querygen_cli exited with {:?}", output.status);

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "http://localhost:8080/regions?region=north%20america",
            "http://localhost:8080/regions?region=europe",
            "http://localhost:8080/regions?region=north%20america&region=europe",
        ]
    );
}

#[test]
fn cli_rejects_unknown_catalog_query() {
    let catalog = workspace_root().join("demos").join("catalog.json");
    let status = querygen()
        .args([
            "catalog",
            "--catalog",
            catalog.to_str().expect("catalog"),
            "--query",
            "Missing",
            "--dry-run",
        ])
        .current_dir(workspace_root())
        .status()
        .expect("failed to spawn querygen_cli");
    assert!(!status.success());
}
