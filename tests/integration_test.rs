use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn folio_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_folio"));
    cmd.current_dir(dir).env("FOLIO_LOG", "off");
    cmd
}

fn write_work(dir: &Path) {
    let data = dir.join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("work.json"),
        r#"{
  "items": [
    { "slug": "old-co", "title": "Old Co", "period": "Jan 2018 - Mar 2020", "role": "Engineer" },
    { "slug": "now-co", "title": "Now Co", "period": "Feb 2022 - Present", "role": "Lead" },
    { "slug": "mid-co", "title": "Mid Co", "period": "Apr 2020 - Jan 2022", "role": "Senior" }
  ]
}
"#,
    )
    .unwrap();
}

#[test]
fn test_init_creates_documents() {
    let tmp = TempDir::new().unwrap();

    let output = folio_cmd(tmp.path()).args(["init"]).output().unwrap();

    assert!(output.status.success());
    for file in ["work.json", "projects.json", "links.json", "tools.json"] {
        assert!(tmp.path().join("data").join(file).exists(), "{} missing", file);
    }

    let tools = fs::read_to_string(tmp.path().join("data/tools.json")).unwrap();
    assert!(tools.contains("\"development\""));
    assert!(tools.contains("\"hardware\""));
}

#[test]
fn test_init_twice_is_harmless() {
    let tmp = TempDir::new().unwrap();
    write_work(tmp.path());

    folio_cmd(tmp.path()).args(["init"]).output().unwrap();
    let output = folio_cmd(tmp.path()).args(["init"]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("already exist"));

    // Existing content is left alone
    let work = fs::read_to_string(tmp.path().join("data/work.json")).unwrap();
    assert!(work.contains("now-co"));
}

#[test]
fn test_data_dir_flag() {
    let tmp = TempDir::new().unwrap();

    let output = folio_cmd(tmp.path())
        .args(["--data-dir", "content", "init"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(tmp.path().join("content/work.json").exists());
    assert!(!tmp.path().join("data").exists());
}

#[test]
fn test_config_file_paths() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("folio.yaml"),
        "data_dir: site-data\npaths:\n  work: experience.json\n",
    )
    .unwrap();

    let output = folio_cmd(tmp.path()).args(["init"]).output().unwrap();

    assert!(output.status.success());
    assert!(tmp.path().join("site-data/experience.json").exists());
    assert!(tmp.path().join("site-data/projects.json").exists());
}

#[test]
fn test_bad_config_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("folio.yaml"), "bind: [unclosed\n").unwrap();

    let output = folio_cmd(tmp.path()).args(["init"]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("folio.yaml"));
}

#[test]
fn test_list_work_newest_first() {
    let tmp = TempDir::new().unwrap();
    write_work(tmp.path());

    let output = folio_cmd(tmp.path()).args(["list", "work"]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("now-co"));
    assert!(lines[1].starts_with("mid-co"));
    assert!(lines[2].starts_with("old-co"));
}

#[test]
fn test_list_json() {
    let tmp = TempDir::new().unwrap();
    write_work(tmp.path());

    let output = folio_cmd(tmp.path())
        .args(["list", "work", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let slugs: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["now-co", "mid-co", "old-co"]);
}

#[test]
fn test_list_missing_document_is_empty() {
    let tmp = TempDir::new().unwrap();

    let output = folio_cmd(tmp.path()).args(["list", "links"]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No link entries"));
}

#[test]
fn test_list_corrupt_document_is_empty() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("data")).unwrap();
    fs::write(tmp.path().join("data/projects.json"), "{ not json").unwrap();

    let output = folio_cmd(tmp.path()).args(["list", "projects"]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No project entries"));
}

#[test]
fn test_list_invalid_kind_fails() {
    let tmp = TempDir::new().unwrap();

    let output = folio_cmd(tmp.path()).args(["list", "widgets"]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("widgets"));
}

#[test]
fn test_delete_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    write_work(tmp.path());

    let output = folio_cmd(tmp.path())
        .args(["delete", "work", "mid-co"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Deleted work 'mid-co'"));

    let output = folio_cmd(tmp.path())
        .args(["delete", "work", "mid-co"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("nothing to delete"));

    let work = fs::read_to_string(tmp.path().join("data/work.json")).unwrap();
    assert!(!work.contains("mid-co"));
    assert!(work.contains("now-co"));
    assert!(work.contains("old-co"));
}

#[test]
fn test_delete_tool_requires_category() {
    let tmp = TempDir::new().unwrap();
    folio_cmd(tmp.path()).args(["init"]).output().unwrap();

    let output = folio_cmd(tmp.path())
        .args(["delete", "tools", "Vim"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("category"));
}

#[test]
fn test_hash_password() {
    let tmp = TempDir::new().unwrap();

    let mut child = folio_cmd(tmp.path())
        .args(["hash-password"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"hunter2\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let hash = stdout.trim();
    assert!(hash.starts_with("$argon2"));
    assert!(folio::auth::verify_password(hash, "hunter2"));
}

#[test]
fn test_hash_password_rejects_empty() {
    let tmp = TempDir::new().unwrap();

    let mut child = folio_cmd(tmp.path())
        .args(["hash-password"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"\n").unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(!output.status.success());
}
