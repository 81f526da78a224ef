extern crate assert_cmd;
extern crate image;
extern crate predicates;
extern crate tempfile;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn renders_a_png() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("small.png");
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--width", "32", "--height", "24", "--iters", "100", "--procs", "3"])
        .arg("--outfile")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("(32x24) using palette NebulaSpectre"));

    let image = image::open(&out).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (32, 24));
}

#[test]
fn accepts_negative_coordinates() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("zoom.png");
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--width", "16", "--height", "16", "--iters", "50"])
        .args(&["--xmin", "-0.8", "--xmax", "-0.7", "--ymin", "-0.2", "--ymax", "-0.1"])
        .args(&["--palette", "ThermalHeat", "--no-smooth"])
        .arg("--outfile")
        .arg(&out)
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn lists_palettes() {
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .arg("--list-palettes")
        .assert()
        .success()
        .stdout(predicate::str::contains("MonochromeSlate").and(predicate::str::contains("AuroraArc")));
}

#[test]
fn unknown_palettes_are_reported_with_the_alternatives() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("never.png");
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--palette", "Plaid", "--width", "8", "--height", "8"])
        .arg("--outfile")
        .arg(&out)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"Plaid\" not found").and(predicate::str::contains("- ThermalHeat")));
    assert!(!out.exists());
}

#[test]
fn inverted_viewports_are_refused() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("never.png");
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--xmin", "1.0", "--xmax", "-1.0", "--width", "8", "--height", "8"])
        .arg("--outfile")
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("degenerate viewport"));
    assert!(!out.exists());
}

#[test]
fn zero_workers_are_refused_by_the_parser() {
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--procs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Worker count must be between 1 and"));
}
