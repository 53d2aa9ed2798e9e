use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

/// Two-year, three-country dataset in the processed-CSV shape.
const SAMPLE: &str = "\
country,id,region,sub_region,income_group,population,year,life_expectancy,education_ratio,pop_density,child_mortality,children_per_woman
Jordan,400,Asia,Western Asia,Upper middle,9000000,2014,74.0,1.02,,18.0,3.5
Jordan,400,Asia,Western Asia,Upper middle,9200000,2015,74.3,1.01,,17.5,3.4
Japan,392,Asia,Eastern Asia,High,127000000,2014,83.5,1.00,,2.8,1.4
Japan,392,Asia,Eastern Asia,High,127000000,2015,83.8,1.00,,2.7,1.4
Yemen,887,Asia,Western Asia,Low,26000000,2014,64.0,1.60,,48.0,4.3
Yemen,887,Asia,Western Asia,Low,26500000,2015,64.3,1.58,,46.0,4.2
";

fn write_sample(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("gapminder.csv");
    std::fs::write(&path, SAMPLE).unwrap();
    path
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("gapex").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gapex"));
}

#[test]
fn bar_selects_the_top_country_for_the_reference_year() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_sample(&dir);
    let mut cmd = Command::cargo_bin("gapex").unwrap();
    cmd.args([
        "bar",
        "--data",
        data.to_str().unwrap(),
        "--stat",
        "life_expectancy",
        "--year",
        "2015",
        "--show",
        "top",
        "--count",
        "1",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Japan"))
        .stdout(predicate::str::contains("Jordan").not());
}

#[test]
fn subregions_cascade_from_the_region_filter() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_sample(&dir);
    let mut cmd = Command::cargo_bin("gapex").unwrap();
    cmd.args(["subregions", "--data", data.to_str().unwrap(), "--region", "Asia"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("Western Asia\nEastern Asia\n"));
}

#[test]
fn trend_exports_ranked_rows_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_sample(&dir);
    let out = dir.path().join("trend.json");
    let mut cmd = Command::cargo_bin("gapex").unwrap();
    cmd.args([
        "trend",
        "--data",
        data.to_str().unwrap(),
        "--stat",
        "child_mortality",
        "--years",
        "2014:2015",
        "--show",
        "bottom",
        "--count",
        "1",
        "--out",
        out.to_str().unwrap(),
    ]);
    cmd.assert().success();

    let text = std::fs::read_to_string(&out).unwrap();
    let rows: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
    // Japan has the lowest child mortality in 2015; both its years export.
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["country"] == "Japan"));
}

#[test]
fn unknown_statistic_is_rejected_at_the_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_sample(&dir);
    let mut cmd = Command::cargo_bin("gapex").unwrap();
    cmd.args([
        "bar",
        "--data",
        data.to_str().unwrap(),
        "--stat",
        "gdp_per_capita",
        "--year",
        "2015",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown statistic"));
}
