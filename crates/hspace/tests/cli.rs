#![allow(missing_docs, clippy::tests_outside_test_module)]

use std::process::Command;

use assert_cmd::{
    assert::{Assert, OutputAssertExt},
    cargo::CommandCargoExt,
};

#[allow(deprecated)]
fn hspace(args: &[&str]) -> Assert {
    let mut cmd = Command::cargo_bin("hspace").expect("binary exists");
    cmd.args(args);
    cmd.assert()
}

fn stdout_of(args: &[&str]) -> String {
    let out = hspace(args).success().get_output().stdout.clone();
    String::from_utf8(out).expect("utf8 output")
}

#[test]
fn index_and_point_roundtrip() {
    assert_eq!(stdout_of(&["index", "--bits", "2", "3", "0"]), "15\n");
    assert_eq!(stdout_of(&["point", "-d", "2", "-b", "2", "15"]), "3,0\n");
}

#[test]
fn index_infers_bit_depth() {
    let explicit = stdout_of(&["index", "-b", "3", "5", "2", "7"]);
    let inferred = stdout_of(&["index", "5", "2", "7"]);
    assert_eq!(explicit, inferred);
}

#[test]
fn wide_index_roundtrips() {
    let coords: Vec<String> = (0..40).map(|i| (i * 6).to_string()).collect();
    let mut args = vec!["index", "-b", "8"];
    args.extend(coords.iter().map(String::as_str));
    let index = stdout_of(&args);
    let back = stdout_of(&["point", "-d", "40", "-b", "8", index.trim()]);
    assert_eq!(back.trim(), coords.join(","));
}

#[test]
fn curve_lists_every_cell() {
    let out = stdout_of(&["curve", "4"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0], "0,0 0.000000");
    assert!(lines[15].ends_with(" 1.000000"));

    let out = stdout_of(&["curve", "--three-d", "2"]);
    assert_eq!(out.lines().count(), 8);
}

#[test]
fn proportion_lookup() {
    assert_eq!(stdout_of(&["proportion", "1", "0"]), "0.000000\n");
    assert_eq!(stdout_of(&["proportion", "4", "3", "0"]), "1.000000\n");
    hspace(&["proportion", "4", "-1", "0"]).failure();
    hspace(&["proportion", "0", "0"]).failure();
}

#[test]
fn classic_mapping() {
    assert_eq!(stdout_of(&["xy2d", "2", "1", "0"]), "3\n");
    assert_eq!(stdout_of(&["d2xy", "2", "1"]), "0,1\n");
    hspace(&["xy2d", "6", "0", "0"]).failure();
}

#[test]
fn bad_input_fails() {
    hspace(&["index", "-b", "2", "4"]).failure();
    hspace(&["point", "-d", "2", "-b", "2", "16"]).failure();
    hspace(&["point", "-d", "2", "-b", "2", "not-a-number"]).failure();
}
