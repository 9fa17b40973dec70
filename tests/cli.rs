use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn headless_run_prints_final_state() {
    let mut cmd = Command::cargo_bin("torus-sketch").expect("binary exists");
    cmd.arg("--headless")
        .arg("--size")
        .arg("800x600")
        .arg("--frames")
        .arg("10");
    cmd.assert()
        .success()
        .stdout(contains("Viewport 800x600 (aspect 1.3333)"))
        .stdout(contains("Simulated 10 frame(s)"))
        .stdout(contains("Final sketch state:"))
        .stdout(contains(" - frame 10"))
        .stdout(contains(" - time 0.50"))
        .stdout(contains(" - rotation (0.0050, 0.0100)"))
        .stdout(contains(" - passes render -> bloom"));
}

#[test]
fn headless_run_defaults_to_ten_frames() {
    let mut cmd = Command::cargo_bin("torus-sketch").expect("binary exists");
    cmd.arg("--headless");
    cmd.assert()
        .success()
        .stdout(contains("Viewport 1280x720"))
        .stdout(contains("Simulated 10 frame(s)"));
}

#[test]
fn zero_size_viewport_is_rejected() {
    let mut cmd = Command::cargo_bin("torus-sketch").expect("binary exists");
    cmd.arg("--headless").arg("--size").arg("0x600");
    cmd.assert()
        .failure()
        .stderr(contains("viewport has zero extent (0x600)"));
}

#[test]
fn malformed_size_is_rejected() {
    let mut cmd = Command::cargo_bin("torus-sketch").expect("binary exists");
    cmd.arg("--headless").arg("--size").arg("800by600");
    cmd.assert()
        .failure()
        .stderr(contains("--size expects WIDTHxHEIGHT"));
}

#[test]
fn unknown_argument_is_rejected() {
    let mut cmd = Command::cargo_bin("torus-sketch").expect("binary exists");
    cmd.arg("--nonsense");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown argument: --nonsense"));
}
