use assert_cmd::Command;
use predicates::prelude::*;

mod common;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_image_help() {
    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args(["image", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("target"));
}

#[test]
fn test_pdf_help() {
    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args(["pdf", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Ghostscript"));
}

#[test]
fn test_video_help() {
    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args(["video", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("FFmpeg"));
}

#[test]
fn test_setup_help() {
    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args(["setup", "--help"]);
    cmd.assert().success();
}

#[test]
fn test_image_nonexistent_input() {
    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args(["image", "nonexistent.jpg", "out.jpg"]);
    cmd.assert().failure();
}

#[test]
fn test_image_rejects_out_of_range_target() {
    let temp_dir = common::create_temp_directory();
    let input = common::create_fake_image(temp_dir.path(), "test.jpg");

    for bad in ["0", "100"] {
        let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
        cmd.args(["image", &input.to_string_lossy(), "out.jpg", "-t", bad]);
        cmd.assert().failure();
    }
}

#[test]
fn test_image_rejects_undecodable_file() {
    let temp_dir = common::create_temp_directory();
    let input = common::create_fake_image(temp_dir.path(), "test.jpg");
    let output = temp_dir.path().join("out.jpg");

    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args([
        "image",
        &input.to_string_lossy(),
        &output.to_string_lossy(),
        "-t",
        "50",
    ]);
    cmd.assert().failure();
}

#[test]
fn test_image_compresses_real_jpeg() {
    let temp_dir = common::create_temp_directory();
    let input = common::create_real_jpeg(temp_dir.path(), "photo.jpg");
    let output = temp_dir.path().join("photo_small.jpg");

    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args([
        "image",
        &input.to_string_lossy(),
        &output.to_string_lossy(),
        "-t",
        "50",
    ]);
    cmd.assert().success();
    assert!(output.exists());
}

#[test]
fn test_image_converts_opaque_png_output_extension() {
    let temp_dir = common::create_temp_directory();
    let input = common::create_real_png(temp_dir.path(), "figure.png");
    let output = temp_dir.path().join("figure_out.png");

    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args([
        "image",
        &input.to_string_lossy(),
        &output.to_string_lossy(),
        "-t",
        "30",
    ]);
    cmd.assert().success();
    assert!(temp_dir.path().join("figure_out.jpg").exists());
}

#[test]
fn test_image_quiet_mode_silences_stdout() {
    let temp_dir = common::create_temp_directory();
    let input = common::create_real_jpeg(temp_dir.path(), "photo.jpg");
    let output = temp_dir.path().join("photo_small.jpg");

    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args([
        "image",
        &input.to_string_lossy(),
        &output.to_string_lossy(),
        "-t",
        "50",
        "--quiet",
    ]);
    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_image_default_output_path() {
    let temp_dir = common::create_temp_directory();
    let input = common::create_real_jpeg(temp_dir.path(), "photo.jpg");

    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args(["image", &input.to_string_lossy(), "-t", "50"]);
    cmd.assert().success();
    assert!(temp_dir.path().join("photo_compressed.jpg").exists());
}

#[test]
fn test_pdf_nonexistent_input() {
    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args(["pdf", "nonexistent.pdf", "out.pdf"]);
    cmd.assert().failure();
}

#[test]
fn test_pdf_rejects_out_of_range_level() {
    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args(["pdf", "doc.pdf", "out.pdf", "-l", "5"]);
    cmd.assert().failure();
}

#[test]
fn test_video_nonexistent_input() {
    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.args(["video", "nonexistent.mp4", "out.mp4"]);
    cmd.assert().failure();
}

#[test]
fn test_unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("media-squeeze").unwrap();
    cmd.arg("squash");
    cmd.assert().failure();
}
