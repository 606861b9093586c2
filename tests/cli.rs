use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn missing_video_id_prints_failure_envelope() {
    Command::cargo_bin("get_transcript")
        .unwrap()
        .assert()
        .success()
        .stdout("{\"success\": false, \"error\": \"No Video ID provided\"}\n");
}

#[test]
fn missing_video_id_is_repeatable() {
    let run = || {
        Command::cargo_bin("get_transcript")
            .unwrap()
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn nothing_is_logged_by_default() {
    Command::cargo_bin("get_transcript")
        .unwrap()
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn url_instead_of_id_fails_without_network() {
    let output = Command::cargo_bin("get_transcript")
        .unwrap()
        .arg("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);

    let value: serde_json::Value = serde_json::from_str(stdout.trim_end()).unwrap();
    assert_eq!(value["success"], false);
    assert!(value["error"]
        .as_str()
        .unwrap()
        .contains("You provided a YouTube URL instead of the video ID"));
}
