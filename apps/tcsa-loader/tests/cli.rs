use assert_cmd::Command;
use predicates::str::contains;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const SLN: &str = "\u{feff}\nMicrosoft Visual Studio Solution File, Format Version 12.00\n\
# Visual Studio Version 17\nVisualStudioVersion = 17.5.33627.172\n\
MinimumVisualStudioVersion = 10.0.40219.1\n";

fn workspace(root: &Path, tc_version: &str, errors: &str) {
    fs::create_dir(root.join(".git")).unwrap();
    fs::write(root.join("Machine.sln"), SLN).unwrap();
    fs::create_dir_all(root.join("Plc")).unwrap();
    fs::write(
        root.join("Plc/Machine.tsproj"),
        format!(
            "<?xml version=\"1.0\"?>\n<TcSmProject xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" TcSmVersion=\"1.0\" TcVersion=\"{}\">\n</TcSmProject>\n",
            tc_version
        ),
    )
    .unwrap();
    fs::write(root.join("errors.json"), errors).unwrap();
}

fn analyze(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tcsa-loader").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(root)
        .args([
            "analyze",
            "-v",
            "Machine.sln",
            "-t",
            "Plc/Machine.tsproj",
            "--driver",
            "error-list",
            "--error-list",
            "errors.json",
        ]);
    cmd
}

const MEDIUM_ONLY: &str = r#"[
  {"ErrorLevel": "Medium", "Description": "SA0033: Unused variable 'x'", "FileName": "Plc/POUs/MAIN.TcPOU", "Line": 12, "Column": 3, "Project": "Plc"},
  {"ErrorLevel": "High", "Description": "C0077: Unknown type: 'FOO'", "FileName": "Plc/POUs/FB_A.TcPOU", "Line": 7, "Column": 1, "Project": "Plc"},
  {"ErrorLevel": "Low", "Description": "SA0001: dropped by the level filter", "FileName": "Plc/POUs/MAIN.TcPOU", "Line": 1, "Column": 1, "Project": "Plc"}
]"#;

const WITH_HIGH: &str = r#"[
  {"ErrorLevel": "High", "Description": "SA0001: Possible index out of range", "FileName": "Plc/POUs/MAIN.TcPOU", "Line": 20, "Column": 5, "Project": "Plc"},
  {"ErrorLevel": "High", "Description": "SA0001: Possible index out of range", "FileName": "Plc/POUs/MAIN.TcPOU", "Line": 20, "Column": 5, "Project": "Plc"},
  {"ErrorLevel": "Medium", "Description": "SA0033: Unused variable 'x'", "FileName": "Plc/POUs/MAIN.TcPOU", "Line": 12, "Column": 3, "Project": "Plc"}
]"#;

#[test]
fn test_version_subcommand() {
    let mut cmd = Command::cargo_bin("tcsa-loader").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_clean_build_succeeds() {
    let dir = tempdir().unwrap();
    workspace(dir.path(), "3.1.4024.0", "[]");
    analyze(dir.path())
        .assert()
        .code(0)
        .stdout(contains("static_analysis=0"));
}

#[test]
fn test_medium_findings_are_unstable_and_native_report_written() {
    let dir = tempdir().unwrap();
    workspace(dir.path(), "3.1.4024.0", MEDIUM_ONLY);
    analyze(dir.path())
        .args(["-r", "out/report.json"])
        .assert()
        .code(2)
        .stdout(contains("SA0033"));

    let text = fs::read_to_string(dir.path().join("out/report.json")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v["VisualStudioSolutionName"], "Machine");
    assert_eq!(v["TwinCATProjectName"], "Machine");
    assert_eq!(v["StaticAnalyzerErrors"].as_array().unwrap().len(), 1);
    assert_eq!(v["OtherErrors"].as_array().unwrap().len(), 1);
    assert_eq!(v["StaticAnalyzerErrors"][0]["Description"], "Unused variable 'x'");
    assert_eq!(v["OtherErrors"][0]["Description"], "Unknown type: 'FOO'");
}

#[test]
fn test_high_findings_fail_and_gitlab_report_is_deduplicated() {
    let dir = tempdir().unwrap();
    workspace(dir.path(), "3.1.4024.0", WITH_HIGH);
    analyze(dir.path())
        .args(["-r", "gl-code-quality.json", "-f", "Gitlab"])
        .assert()
        .code(1);

    let text = fs::read_to_string(dir.path().join("gl-code-quality.json")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    let issues = v.as_array().unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0]["severity"], "critical");
    assert_eq!(issues[0]["description"], "SA0001: Possible index out of range");
    assert_eq!(issues[1]["severity"], "major");
    assert_eq!(issues[1]["location"]["lines"]["begin"], 12);
    assert_eq!(issues[0]["fingerprint"].as_str().unwrap().len(), 32);
}

#[test]
fn test_fingerprint_subcommand_matches_report() {
    let dir = tempdir().unwrap();
    workspace(dir.path(), "3.1.4024.0", WITH_HIGH);
    analyze(dir.path())
        .args(["-r", "gl.json", "-f", "gitlab"])
        .assert()
        .code(1);
    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("gl.json")).unwrap()).unwrap();
    let expected = v[1]["fingerprint"].as_str().unwrap().to_string();

    let mut cmd = Command::cargo_bin("tcsa-loader").unwrap();
    cmd.args([
        "fingerprint",
        "SA0033: Unused variable 'x'",
        "Plc/POUs/MAIN.TcPOU",
        "12",
        "major",
    ])
    .assert()
    .success()
    .stdout(contains(expected));
}

#[test]
fn test_old_twincat_version_fails_without_report() {
    let dir = tempdir().unwrap();
    workspace(dir.path(), "3.1.4021.5", WITH_HIGH);
    analyze(dir.path())
        .args(["-r", "report.json"])
        .assert()
        .code(1)
        .stderr(contains("3.1.4022.0"));
    assert!(!dir.path().join("report.json").exists());
}

#[test]
fn test_missing_solution_fails() {
    let dir = tempdir().unwrap();
    workspace(dir.path(), "3.1.4024.0", "[]");
    fs::remove_file(dir.path().join("Machine.sln")).unwrap();
    analyze(dir.path())
        .assert()
        .code(1)
        .stderr(contains("does not exist"));
}

#[test]
fn test_unknown_report_format_fails_before_build() {
    let dir = tempdir().unwrap();
    workspace(dir.path(), "3.1.4024.0", "[]");
    analyze(dir.path())
        .args(["-r", "r.json", "-f", "sarif"])
        .assert()
        .code(1)
        .stderr(contains("unknown report format"));
    assert!(!dir.path().join("r.json").exists());
}

#[test]
fn test_config_file_supplies_defaults_and_json_output() {
    let dir = tempdir().unwrap();
    workspace(dir.path(), "3.1.4024.0", MEDIUM_ONLY);
    fs::write(
        dir.path().join("tcsa.toml"),
        r#"
solution = "Machine.sln"
project = "Plc/Machine.tsproj"
output = "json"
[report]
path = "reports/gl.json"
format = "gitlab"
[driver]
kind = "error-list"
error_list = "errors.json"
"#,
    )
    .unwrap();
    let mut cmd = Command::cargo_bin("tcsa-loader").unwrap();
    let assert = cmd
        .env("NO_COLOR", "1")
        .current_dir(dir.path())
        .arg("analyze")
        .assert()
        .code(2);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["summary"]["medium"], 1);
    assert_eq!(v["summary"]["exit_code"], 2);
    assert!(dir.path().join("reports/gl.json").exists());
}
