use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn mdnav_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mdnav"));
    cmd.current_dir(cwd);
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run mdnav with `document` on stdin.
fn run_with_stdin(cwd: &Path, args: &[&str], document: &str) -> Output {
    let mut child = mdnav_cmd(cwd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // mdnav may exit before reading stdin (bad config, bad arguments).
    if let Err(e) = child.stdin.take().unwrap().write_all(document.as_bytes()) {
        assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe, "stdin write failed: {e}");
    }
    child.wait_with_output().unwrap()
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "mdnav failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn resolve_direct_link_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("index.md");
    std::fs::write(&doc, "# Title\n\nRead [the guide](guide/intro.md) first.\n").unwrap();

    let output = mdnav_cmd(dir.path())
        .args(["resolve", "--line", "3", "--column", "8", "--file"])
        .arg(&doc)
        .output()
        .unwrap();

    let expected = dir.path().join("guide/intro.md");
    assert_eq!(stdout_of(&output), format!("OpenInEditor {}\n", expected.display()));
}

#[test]
fn resolve_json_from_stdin_with_explicit_dir() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_stdin(
        dir.path(),
        &["resolve", "--json", "--line", "1", "--column", "2", "--dir", "/docs"],
        "[text](sub/page.md)\n",
    );

    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(json, serde_json::json!({ "action": "open_in_editor", "target": "/docs/sub/page.md" }));
}

#[test]
fn resolve_follows_reference_definition() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_stdin(
        dir.path(),
        &["resolve", "--line", "1", "--column", "3"],
        "[site][home]\n\n[home]: https://example.com\n",
    );
    assert_eq!(stdout_of(&output), "OpenInBrowser https://example.com\n");
}

#[test]
fn resolve_without_link_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_stdin(dir.path(), &["resolve", "--line", "1", "--column", "3"], "no links here\n");
    assert_eq!(stdout_of(&output), "NoOp\n");

    let output = run_with_stdin(dir.path(), &["resolve", "--line", "1", "--column", "3"], "[text][ref]\n");
    assert_eq!(stdout_of(&output), "NoOp\n");
}

#[test]
fn config_extensions_send_other_files_to_the_os() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".mdnav.toml"), "extensions = \".md, .markdown\"\n").unwrap();

    let output = run_with_stdin(dir.path(), &["resolve", "--line", "1", "--column", "1"], "[pic](photo.png)\n");
    assert_eq!(stdout_of(&output), "OpenWithOs photo.png\n");

    let output = run_with_stdin(
        dir.path(),
        &["resolve", "--line", "1", "--column", "1", "--extensions", ".png", "--dir", "/docs"],
        "[pic](photo.png)\n",
    );
    assert_eq!(stdout_of(&output), "OpenInEditor /docs/photo.png\n");
}

#[test]
fn open_emits_editor_command() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_stdin(
        dir.path(),
        &["open", "--line", "1", "--column", "1"],
        "[x](|filename|/abs/my notes.md)\n",
    );
    assert_eq!(stdout_of(&output), "edit /abs/my\\ notes.md\n");
}

#[test]
fn open_without_link_emits_only_editor_commands() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_stdin(dir.path(), &["open", "--line", "1", "--column", "0"], "plain\n");
    let stdout = stdout_of(&output);
    assert_eq!(stdout, "echo \"<mdnav: no link>\"\n");
    assert!(stdout.lines().all(|l| l.starts_with("echo ") || l.starts_with("edit ")));
    assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn empty_document_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_stdin(dir.path(), &["resolve", "--line", "1", "--column", "0"], "");
    assert_eq!(stdout_of(&output), "NoOp\n");

    let doc = dir.path().join("empty.md");
    std::fs::write(&doc, "").unwrap();
    let output = mdnav_cmd(dir.path())
        .args(["open", "--line", "1", "--column", "0", "--file"])
        .arg(&doc)
        .output()
        .unwrap();
    assert_eq!(stdout_of(&output), "echo \"<mdnav: no link>\"\n");
}

#[test]
fn line_out_of_range_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_stdin(dir.path(), &["resolve", "--line", "5", "--column", "0"], "one\ntwo\n");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Line Out Of Range"));
}

#[test]
fn missing_document_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = mdnav_cmd(dir.path())
        .args(["resolve", "--line", "1", "--column", "0", "--file", "missing.md"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Document Not Found"));
}

#[test]
fn malformed_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".mdnav.toml"), "extensions = [").unwrap();
    std::fs::write(dir.path().join("doc.md"), "x\n").unwrap();
    let output = mdnav_cmd(dir.path())
        .args(["resolve", "--line", "1", "--column", "0", "--file", "doc.md"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid TOML"));
}

#[test]
fn debug_flag_logs_resolution_steps() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_stdin(
        dir.path(),
        &["resolve", "--debug", "--line", "1", "--column", "1", "--dir", "/docs"],
        "[a](b.md)\n",
    );
    assert_eq!(stdout_of(&output), "OpenInEditor /docs/b.md\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("found direct link"));
}
