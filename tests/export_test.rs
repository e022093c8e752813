use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slideshot"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn count_files_with_pattern(dir: &Path, pattern: &str) -> usize {
    let glob_pattern = format!("{}/{}", dir.to_string_lossy(), pattern);
    glob::glob(&glob_pattern)
        .expect("Failed to read glob pattern")
        .filter_map(Result::ok)
        .count()
}

fn create_deck(dir: &Path, slides: usize) -> PathBuf {
    let mut body = String::new();
    for i in 1..=slides {
        // Deliberately uneven sizes; captures must still be viewport-sized
        body.push_str(&format!(
            "<div class=\"slide\" style=\"width:{}px;height:{}px;margin:40px\"><h1>Slide {}</h1></div>\n",
            300 + i * 50,
            200 + i * 120,
            i
        ));
    }
    let html = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Deck</title></head>\n<body>\n{}</body>\n</html>",
        body
    );
    let html_path = dir.join("deck.html");
    fs::write(&html_path, html).expect("Failed to write HTML file");
    html_path
}

#[test]
#[ignore] // Ignore by default as it requires Chrome to be installed
fn test_export_produces_one_image_per_slide() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .is_test(true)
        .try_init();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let html_path = create_deck(temp_dir.path(), 3);

    let output = run_command(&[html_path.to_str().unwrap(), "--size", "640x480", "--quality", "80"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let output_dir = temp_dir.path().join("deck");
    assert_eq!(count_files_with_pattern(&output_dir, "slide_*.jpg"), 3);

    for name in ["slide_01.jpg", "slide_02.jpg", "slide_03.jpg"] {
        let (width, height) =
            image::image_dimensions(output_dir.join(name)).expect("Failed to read image");
        assert_eq!((width, height), (640, 480), "{} has the wrong size", name);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[3/3] saved: slide_03.jpg"), "stdout was: {}", stdout);
}

#[test]
#[ignore] // Ignore by default as it requires Chrome to be installed
fn test_export_without_slides_succeeds_with_warning() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let html_path = temp_dir.path().join("empty.html");
    fs::write(&html_path, "<html><body><p>No slides here</p></body></html>")
        .expect("Failed to write HTML file");

    let output = run_command(&[html_path.to_str().unwrap(), "--size", "320x240"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Warning: no .slide elements found"));
    assert_eq!(count_files_with_pattern(&temp_dir.path().join("empty"), "*.jpg"), 0);
}

#[test]
#[ignore] // Ignore by default as it requires Chrome to be installed
fn test_export_with_missing_font_falls_back() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let html_path = create_deck(temp_dir.path(), 2);

    let output = run_command(&[
        html_path.to_str().unwrap(),
        "--size",
        "400x300",
        "--font",
        "/no/such/font.ttf",
        "--stroke",
        "0.5",
        "--scale",
        "1.25",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Warning: font file does not exist"));
    assert_eq!(count_files_with_pattern(&temp_dir.path().join("deck"), "slide_*.jpg"), 2);
}

#[test]
#[ignore] // Ignore by default as it requires Chrome to be installed
fn test_repeated_export_overwrites_same_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let html_path = create_deck(temp_dir.path(), 2);
    let html = html_path.to_str().unwrap();

    assert!(run_command(&[html, "--size", "400x300"]).status.success());
    assert!(run_command(&[html, "--size", "400x300"]).status.success());

    let output_dir = temp_dir.path().join("deck");
    let mut names: Vec<String> = fs::read_dir(&output_dir)
        .expect("Failed to read output directory")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["slide_01.jpg", "slide_02.jpg"]);
}

#[test]
#[ignore] // Ignore by default as it requires Chrome to be installed
fn test_export_slides_inside_smooth_scrolling_container() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let html_path = temp_dir.path().join("nested.html");
    let colors = ["rgb(255, 0, 0)", "rgb(0, 0, 255)", "rgb(0, 128, 0)"];
    let slides: String = colors
        .iter()
        .map(|c| format!("<div class=\"slide\" style=\"height:600px;background:{}\"></div>\n", c))
        .collect();
    let html = format!(
        "<!DOCTYPE html>\n<html><body style=\"margin:0;overflow:hidden\">\n\
         <div style=\"height:600px;overflow-y:scroll;scroll-behavior:smooth\">\n{}</div>\n\
         </body></html>",
        slides
    );
    fs::write(&html_path, html).expect("Failed to write HTML file");

    let output = run_command(&[html_path.to_str().unwrap(), "--size", "400x600"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    // Each capture must show its own slide, not a frame from mid-scroll
    let output_dir = temp_dir.path().join("nested");
    let expected = [[255u8, 0, 0], [0, 0, 255], [0, 128, 0]];
    for (i, rgb) in expected.iter().enumerate() {
        let path = output_dir.join(format!("slide_{:02}.jpg", i + 1));
        let img = image::open(&path).expect("Failed to read image").to_rgb8();
        for (x, y) in [(200, 20), (200, 300), (200, 580)] {
            let pixel = img.get_pixel(x, y).0;
            for channel in 0..3 {
                let diff = (pixel[channel] as i32 - rgb[channel] as i32).abs();
                assert!(diff < 40, "{:?} at ({}, {}) is {:?}, expected {:?}", path, x, y, pixel, rgb);
            }
        }
    }
}
