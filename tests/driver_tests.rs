use std::io::Write;

use clap::Parser;
use jprops::args::{CliArgs, OutputFormat};
use jprops::driver;
use serde_json::Value;

const MODEL: &str = r#"{
  "classes": [
    { "name": "Object", "package": "java.lang" },
    {
      "name": "Person",
      "package": "people",
      "fields": [{ "name": "age", "type": "int", "modifiers": ["private"] }],
      "methods": [
        { "name": "getName", "returns": "Object", "modifiers": ["public"] },
        { "name": "setName", "params": ["Object"], "modifiers": ["public"] },
        { "name": "getAge", "returns": "int", "modifiers": ["public"] },
        { "name": "setAge", "params": ["int"], "modifiers": ["public"] },
        { "name": "isActive", "returns": "boolean", "modifiers": ["protected"] }
      ]
    },
    {
      "name": "Clash",
      "package": "people",
      "fields": [{ "name": "id", "type": "int", "modifiers": ["public"] }],
      "methods": [{ "name": "getId", "returns": "int", "modifiers": ["public"] }]
    }
  ]
}"#;

fn model_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(MODEL.as_bytes()).expect("write model");
    file
}

fn args(extra: &[&str], path: &std::path::Path) -> CliArgs {
    let mut argv = vec!["jprops".to_string(), path.display().to_string()];
    argv.extend(extra.iter().map(|arg| arg.to_string()));
    CliArgs::try_parse_from(argv).expect("args")
}

#[test]
fn test_default_args() {
    let file = model_file();
    let args = args(&[], file.path());
    assert_eq!(args.format, OutputFormat::Text);
    assert_eq!(args.passes, 1);
    assert!(args.classes.is_empty());
}

#[test]
fn test_passes_out_of_range_rejected() {
    assert!(CliArgs::try_parse_from(["jprops", "m.json", "--passes", "0"]).is_err());
    assert!(CliArgs::try_parse_from(["jprops", "m.json", "--passes", "17"]).is_err());
}

#[test]
fn test_text_report() {
    let file = model_file();
    let out = driver::run(&args(&["--class", "Person"], file.path())).expect("run");
    let expected = "\
class people.Person
  ~ public int age @var (retained, declared private)
  + public Object name @var (synthesized)
  + protected boolean active @val (synthesized)
";
    assert_eq!(out, expected);
}

#[test]
fn test_conflict_is_reported() {
    let file = model_file();
    let out = driver::run(&args(&["-c", "Clash"], file.path())).expect("run");
    let expected = "\
class people.Clash
    public int id (declared)
  ! id: conflicts with field `Clash.id`
";
    assert_eq!(out, expected);
}

#[test]
fn test_json_report() {
    let file = model_file();
    let out = driver::run(&args(&["-f", "json", "-c", "Person"], file.path())).expect("run");
    let report: Value = serde_json::from_str(&out).expect("json");

    let classes = report["classes"].as_array().expect("classes");
    assert_eq!(classes.len(), 1);
    let fields = classes[0]["fields"].as_array().expect("fields");
    assert_eq!(fields.len(), 3);

    assert_eq!(fields[0]["name"], "age");
    assert_eq!(fields[0]["type"], "int");
    assert_eq!(fields[0]["access"], "public");
    assert_eq!(fields[0]["static"], false);
    assert_eq!(fields[0]["mutability"], "var");
    assert_eq!(fields[0]["origin"]["kind"], "retained");
    assert_eq!(fields[0]["origin"]["declared_access"], "private");

    assert_eq!(fields[2]["name"], "active");
    assert_eq!(fields[2]["mutability"], "val");
    assert_eq!(fields[2]["origin"]["kind"], "synthesized");
    assert!(classes[0].get("skipped").is_none());
}

#[test]
fn test_repeated_passes_leave_report_unchanged() {
    let file = model_file();
    let once = driver::run(&args(&[], file.path())).expect("run");
    let thrice = driver::run(&args(&["--passes", "3"], file.path())).expect("run");
    assert_eq!(once, thrice);
}

#[test]
fn test_unknown_class_filter_fails() {
    let file = model_file();
    let err = driver::run(&args(&["-c", "Nobody"], file.path())).expect_err("unknown class");
    assert!(err.to_string().contains("Nobody"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");
    let err = driver::run(&args(&[], &path)).expect_err("missing file");
    assert!(err.to_string().starts_with("failed to read"));
}

#[test]
fn test_invalid_model_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").expect("write");
    let err = driver::run(&args(&[], &path)).expect_err("bad json");
    assert_eq!(err.to_string(), "failed to load class model");
}
