use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("matprice").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("matprice"));
}

fn write_inputs(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let rows = dir.join("rows.json");
    fs::write(
        &rows,
        r#"[
          {"time_bucket":"2024-01-01","specification":"NI","average_price":"48,000,000","unit":"원/톤"},
          {"time_bucket":"2024-02-01","specification":"NI","average_price":50000000,"unit":"원/톤"},
          {"time_bucket":"2024-01-01","specification":"SAND","average_price":150,"unit":"원/kg"},
          {"time_bucket":"2024-02-01","specification":"SAND","average_price":200,"unit":"원/kg"}
        ]"#,
    )
    .unwrap();
    let catalog = dir.join("catalog.csv");
    fs::write(
        &catalog,
        "specification,id,display_name\nNI,nickel,Nickel\nSAND,sand,Sand\nCU,copper,Copper\n",
    )
    .unwrap();
    (rows, catalog)
}

#[test]
fn axes_prints_chart_spec_json() {
    let dir = tempdir().unwrap();
    let (rows, catalog) = write_inputs(dir.path());
    let out = Command::cargo_bin("matprice")
        .unwrap()
        .args(["axes", "--rows"])
        .arg(&rows)
        .arg("--catalog")
        .arg(&catalog)
        .args(["--locale", "en"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["assignment"]["primary_series_ids"][0], "nickel");
    assert_eq!(v["assignment"]["secondary_series_ids"][0], "sand");
    assert_eq!(v["legend"].as_array().unwrap().len(), 3);
}

#[test]
fn table_prints_dash_for_missing_changes() {
    let dir = tempdir().unwrap();
    let (rows, catalog) = write_inputs(dir.path());
    let mut cmd = Command::cargo_bin("matprice").unwrap();
    cmd.args(["table", "--rows"])
        .arg(&rows)
        .arg("--catalog")
        .arg(&catalog);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sand • Sand  latest=200 원/kg"))
        .stdout(predicate::str::contains("mom=+33.3%"))
        .stdout(predicate::str::contains("copper • Copper  latest=-"));
}

#[test]
fn bad_date_is_rejected() {
    let dir = tempdir().unwrap();
    let (rows, catalog) = write_inputs(dir.path());
    let mut cmd = Command::cargo_bin("matprice").unwrap();
    cmd.args(["axes", "--rows"])
        .arg(&rows)
        .arg("--catalog")
        .arg(&catalog)
        .args(["--from", "yesterday"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid --from"));
}

#[test]
fn inverted_date_window_is_rejected() {
    let dir = tempdir().unwrap();
    let (rows, catalog) = write_inputs(dir.path());
    let mut cmd = Command::cargo_bin("matprice").unwrap();
    cmd.args(["table", "--rows"])
        .arg(&rows)
        .arg("--catalog")
        .arg(&catalog)
        .args(["--from", "2024-03", "--to", "2024-01-01"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("is after --to"));

    let mut cmd = Command::cargo_bin("matprice").unwrap();
    cmd.args(["table", "--rows"])
        .arg(&rows)
        .arg("--catalog")
        .arg(&catalog)
        .args(["--to", "13/2024"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid --to"));
}
