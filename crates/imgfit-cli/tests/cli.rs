use std::fs;
use std::io::Cursor;
use std::path::Path;

use assert_cmd::Command;
use image::{DynamicImage, ImageFormat, RgbImage};
use predicates::prelude::*;
use tempfile::TempDir;

use imgfit_core::extract::{decode_payload, encode_payload, format_blob};
use imgfit_core::{ImageExtractor, ImageKind, ImageResizer, RasterResizer};

fn png_blob(width: u32, height: u32) -> String {
    let image = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
        image::Rgb([(x % 256) as u8, 64, 32])
    }));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    format_blob(ImageKind::Png, &encode_payload(&bytes))
}

fn widths(text: &str) -> Vec<u32> {
    ImageExtractor::new()
        .find_all(text)
        .filter_map(|m| m.parse())
        .map(|image| {
            let data = decode_payload(&image.payload).unwrap();
            RasterResizer::new().dimensions(&data).unwrap().0
        })
        .collect()
}

/// Command with an isolated config directory.
fn imgfit(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("imgfit").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn diagram(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("diagram.drawio");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_help_lists_options() {
    let dir = TempDir::new().unwrap();
    imgfit(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--percentage"))
        .stdout(predicate::str::contains("--width"));
}

#[test]
fn test_percentage_resizes_in_place() {
    let dir = TempDir::new().unwrap();
    let prefix = r#"<mxCell style="shape=image;image="#;
    let suffix = r#""/>"#;
    let path = diagram(&dir, &format!("{}{}{}", prefix, png_blob(1000, 10), suffix));

    imgfit(dir.path())
        .arg("--file")
        .arg(&path)
        .args(["--percentage", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 resized"));

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with(prefix));
    assert!(written.ends_with(suffix));
    assert_eq!(widths(&written), vec![500]);
}

#[test]
fn test_width_only() {
    let dir = TempDir::new().unwrap();
    let path = diagram(&dir, &format!("{} {}", png_blob(400, 4), png_blob(50, 4)));

    imgfit(dir.path())
        .arg("--file")
        .arg(&path)
        .args(["--width", "100"])
        .assert()
        .success();

    // The narrower image is never enlarged
    assert_eq!(widths(&fs::read_to_string(&path).unwrap()), vec![100, 50]);
}

#[test]
fn test_without_parameters_file_is_untouched() {
    let dir = TempDir::new().unwrap();
    let content = format!("<a>{}</a>", png_blob(20, 2));
    let path = diagram(&dir, &content);

    imgfit(dir.path())
        .arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("percentage or width"));

    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_corrupt_image_reported_and_kept() {
    let dir = TempDir::new().unwrap();
    let corrupt = "data:image/png,bm90IGFuIGltYWdl;";
    let path = diagram(&dir, &format!("{}|{}", corrupt, png_blob(100, 2)));

    imgfit(dir.path())
        .arg("--file")
        .arg(&path)
        .args(["--percentage", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 failed"));

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with(&format!("{}|", corrupt)));
    assert_eq!(widths(written.split('|').nth(1).unwrap()), vec![10]);
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    imgfit(dir.path())
        .arg("--file")
        .arg(dir.path().join("missing.drawio"))
        .args(["--percentage", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_positional_strategy_from_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.json");
    fs::write(&config, r#"{"document": {"strategy": "positional"}}"#).unwrap();
    let path = diagram(&dir, &png_blob(300, 3));

    imgfit(dir.path())
        .arg("--file")
        .arg(&path)
        .args(["--percentage", "50", "-c"])
        .arg(&config)
        .assert()
        .success();

    assert_eq!(widths(&fs::read_to_string(&path).unwrap()), vec![150]);
}

#[test]
fn test_by_position_flag_with_identical_blobs() {
    let dir = TempDir::new().unwrap();
    let original = png_blob(240, 4);
    let content = format!("<a>{}</a>\n<b>{}</b>\n", original, original);
    let path = diagram(&dir, &content);

    imgfit(dir.path())
        .arg("--file")
        .arg(&path)
        .args(["--percentage", "25", "--by-position"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 resized"));

    let written = fs::read_to_string(&path).unwrap();
    assert!(!written.contains(&original));
    assert!(written.starts_with("<a>"));
    assert!(written.contains("</a>\n<b>"));
    assert!(written.ends_with("</b>\n"));
    assert_eq!(widths(&written), vec![60, 60]);
}

#[test]
fn test_config_init_and_get() {
    let dir = TempDir::new().unwrap();

    imgfit(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    assert!(dir.path().join("imgfit").join("config.json").exists());

    imgfit(dir.path())
        .args(["config", "get", "resize.jpeg_quality"])
        .assert()
        .success()
        .stdout(predicate::str::contains("80"));

    imgfit(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_validates_values() {
    let dir = TempDir::new().unwrap();

    imgfit(dir.path())
        .args(["config", "set", "document.strategy", "positional"])
        .assert()
        .success();

    imgfit(dir.path())
        .args(["config", "get", "document.strategy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("positional"));

    imgfit(dir.path())
        .args(["config", "set", "document.strategy", "sideways"])
        .assert()
        .failure();
}
