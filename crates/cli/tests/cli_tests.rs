//! CLI integration tests
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use predicates::prelude::*;
use tempfile::TempDir;

/// Runs the binary from a scratch directory so the default `results/` lands there.
fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("seo-audit");
    cmd.current_dir(std::env::temp_dir());
    cmd
}

fn get_fixture_path(name: &str) -> String {
    format!("{}/../../tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Serves `body` to a single request and returns the URL.
fn serve_once(body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/page.html", listener.local_addr().unwrap());
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        let _ = stream.read(&mut buf);
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes());
    });
    url
}

/// Accepts one connection and never answers; the flag flips once the client hangs up.
fn serve_silence() -> (String, Arc<AtomicBool>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/slow.html", listener.local_addr().unwrap());
    let closed = Arc::new(AtomicBool::new(false));
    let flag = closed.clone();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        while matches!(stream.read(&mut buf), Ok(n) if n > 0) {}
        flag.store(true, Ordering::SeqCst);
    });
    (url, closed)
}

#[test]
fn test_cli_file_text_report() {
    cmd()
        .args(["--file", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analysis for:"))
        .stdout(predicate::str::contains("Caring for Sourdough Starters"))
        .stdout(predicate::str::contains("Content Length: Content is too short (Priority: High)"));
}

#[test]
fn test_cli_json_format() {
    let output = cmd()
        .args([
            "-f",
            "json",
            "--file",
            &get_fixture_path("article.html"),
            "--base-url",
            "https://www.bakery.example/starters",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["url"], "https://www.bakery.example/starters");
    assert_eq!(value["metrics"]["word_count"], 92);
    assert_eq!(value["metrics"]["num_internal_links"], 3);
    assert_eq!(value["top_keywords"]["starter"], 6);
    assert_eq!(value["suggestions"][0]["category"], "Content Length");
}

#[test]
fn test_cli_document_heading_order() {
    let output = cmd()
        .args([
            "-f",
            "json",
            "--heading-order",
            "document",
            "--file",
            &get_fixture_path("article.html"),
        ])
        .output()
        .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["headings"][0], "Why starters fail");
}

#[test]
fn test_cli_save_pending() {
    let tmp = TempDir::new().unwrap();
    let results = tmp.path().join("results");

    cmd()
        .args(["--save", "--results-dir", results.to_str().unwrap()])
        .args(["--file", &get_fixture_path("headings.html"), "--base-url", "https://example.com"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Analysis saved to"));

    let saved: Vec<_> = std::fs::read_dir(&results).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(saved.len(), 1);
    let name = saved[0].file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("https___example.com_pending_"));

    let record: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&saved[0]).unwrap()).unwrap();
    assert_eq!(record["headings"], serde_json::json!(["Title", "Sub"]));
    assert!(record.get("suggestions").is_none());
}

#[test]
fn test_cli_approve() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args(["--approve", "--results-dir", tmp.path().to_str().unwrap()])
        .args(["--file", &get_fixture_path("empty_content.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("approved and saved"));

    let name = std::fs::read_dir(tmp.path()).unwrap().next().unwrap().unwrap().file_name();
    assert!(name.to_str().unwrap().contains("_approved_"));
}

#[test]
fn test_cli_missing_file() {
    cmd()
        .args(["--file", "nonexistent.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error analyzing nonexistent.html"));
}

#[test]
fn test_cli_creates_results_dir_at_startup() {
    let tmp = TempDir::new().unwrap();
    let results = tmp.path().join("results");

    cmd()
        .args(["--results-dir", results.to_str().unwrap()])
        .args(["--file", &get_fixture_path("headings.html")])
        .assert()
        .success();

    assert!(results.is_dir());
    assert_eq!(std::fs::read_dir(&results).unwrap().count(), 0);
}

#[test]
fn test_cli_reports_each_url_before_fetching_the_next() {
    let tmp = TempDir::new().unwrap();
    let good = serve_once(std::fs::read_to_string(get_fixture_path("headings.html")).unwrap());
    let (slow, closed) = serve_silence();

    let mut child = Command::new(env!("CARGO_BIN_EXE_seo-audit"))
        .args(["--timeout", "20", "--results-dir", tmp.path().to_str().unwrap(), &good, &slow])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let stdout = child.stdout.take().unwrap();
    let first = BufReader::new(stdout).lines().next().unwrap().unwrap();

    assert_eq!(first, format!("Analysis for: {}", good));
    assert!(!closed.load(Ordering::SeqCst), "second fetch should still be pending");

    child.kill().unwrap();
    child.wait().unwrap();
}

#[test]
fn test_cli_nothing_to_analyze() {
    cmd().assert().failure().stderr(predicate::str::contains("Nothing to analyze"));
}

#[test]
fn test_cli_base_url_requires_file() {
    cmd().args(["--base-url", "https://example.com"]).assert().failure();
}

#[test]
fn test_cli_bulk_failures_do_not_halt_or_save() {
    let tmp = TempDir::new().unwrap();
    let list = tmp.path().join("urls.txt");
    std::fs::write(&list, "http://127.0.0.1:1/a\n\nnot a url\n").unwrap();
    let results = tmp.path().join("results");

    cmd()
        .args(["--timeout", "5", "--save", "--results-dir", results.to_str().unwrap()])
        .args(["--bulk", list.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error analyzing http://127.0.0.1:1/a"))
        .stderr(predicate::str::contains("Error analyzing not a url"))
        .stderr(predicate::str::contains("2 of 2 analyses failed"));

    assert!(!results.exists() || std::fs::read_dir(&results).unwrap().next().is_none());
}

#[test]
fn test_cli_bulk_from_stdin() {
    cmd()
        .args(["--bulk", "-"])
        .write_stdin("ftp://example.com/file\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error analyzing ftp://example.com/file"));
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", "--file", &get_fixture_path("headings.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("seo-audit"));
}
