//! 命令行行为测试（不依赖真实 TFS 服务器）
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn tfs_search() -> Command {
    let mut cmd = Command::cargo_bin("tfs-search").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

/// 指向本机一个不可达端口的配置文件，保证测试不会访问真实服务器
fn unreachable_config(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, "collection_url = \"http://127.0.0.1:9/tfs/{server}\"\ntimeout_secs = 5\n").unwrap();
    path
}

#[test]
fn no_arguments_prints_usage() {
    tfs_search()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Usage"))
        .stdout(predicate::str::contains("/S\tInput search file"));
}

#[test]
fn term_and_search_file_prints_usage() {
    tfs_search()
        .args(["needle", "/S:terms.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Usage"))
        .stdout(predicate::str::contains("Searching for").not());
}

#[test]
fn unknown_switch_counts_as_search_term() {
    tfs_search()
        .args(["needle", "/Q:abc"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Usage"));
}

#[test]
fn missing_search_file_reports_error_and_exits_cleanly() {
    let dir = tempdir().unwrap();
    let cfg = unreachable_config(dir.path());
    let terms = dir.path().join("missing.txt");
    tfs_search()
        .env("TFS_SEARCH_CONFIG", &cfg)
        .arg(format!("/S:{}", terms.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("load search terms"))
        .stdout(predicate::str::contains("missing.txt"))
        .stdout(predicate::str::contains("(Press any key to continue)"))
        .stdout(predicate::str::contains("Completed.").not());
}

#[test]
fn unreachable_server_reports_error_and_exits_cleanly() {
    let dir = tempdir().unwrap();
    let cfg = unreachable_config(dir.path());
    let out = dir.path().join("out.csv");
    tfs_search()
        .env("TFS_SEARCH_CONFIG", &cfg)
        .arg("needle")
        .arg("/F:*.cs")
        .arg(format!("/O:{}", out.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Searching for 'needle' within tfs-01 (file type:*.cs)"))
        .stdout(predicate::str::contains("authenticate"))
        .stdout(predicate::str::contains("Completed.").not());
    assert!(!out.exists());
}

#[test]
fn malformed_config_reports_error() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    fs::write(&cfg, "timeout_secs = \"soon\"\n").unwrap();
    tfs_search()
        .env("TFS_SEARCH_CONFIG", &cfg)
        .arg("needle")
        .assert()
        .success()
        .stdout(predicate::str::contains("load configuration"));
}
