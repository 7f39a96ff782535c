use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use tfustomize::cli::{Args, Command};

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("tfustomize")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_build_defaults() {
    let parsed = Args::try_parse_from(make_args(&["build"])).unwrap();

    assert!(!parsed.debug);
    let Command::Build {
        dir,
        print,
        out,
        outfile,
    } = parsed.command;
    assert_eq!(dir, PathBuf::from("."));
    assert!(!print);
    assert_eq!(out, PathBuf::from("generated"));
    assert_eq!(outfile, "main.tf");
}

#[test]
fn test_build_all_flags() {
    let args = make_args(&[
        "--debug",
        "build",
        "overlay",
        "--print",
        "--out",
        "dist",
        "--outfile",
        "merged.tf",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.debug);
    let Command::Build {
        dir,
        print,
        out,
        outfile,
    } = parsed.command;
    assert_eq!(dir, PathBuf::from("overlay"));
    assert!(print);
    assert_eq!(out, PathBuf::from("dist"));
    assert_eq!(outfile, "merged.tf");
}

#[test]
fn test_short_flags() {
    let args = make_args(&["build", "-p", "-o", "dist", "-f", "x.tf", "overlay", "-d"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.debug);
    let Command::Build { print, outfile, .. } = parsed.command;
    assert!(print);
    assert_eq!(outfile, "x.tf");
}

#[test]
fn test_missing_subcommand() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

#[test]
fn test_too_many_dirs() {
    assert!(Args::try_parse_from(make_args(&["build", "a", "b"])).is_err());
}
