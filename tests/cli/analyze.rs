use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, run};

const MATH: &str = r#"{
    "mainFile": "math.h",
    "decls": [
        {
            "name": "V2",
            "scope": [{"namespace": "engine"}],
            "location": {"path": "math.h", "line": 2, "column": 8},
            "comment": "/// @runtime",
            "kind": {"record": {
                "fields": [
                    {"name": "x", "type": {"builtin": "float"}},
                    {"name": "y", "type": {"builtin": "float"}}
                ]
            }}
        },
        {
            "name": "Scratch",
            "location": {"path": "math.h", "line": 9, "column": 8},
            "kind": {"record": {}}
        }
    ]
}"#;

const PLAYER: &str = r#"{
    "mainFile": "player.h",
    "decls": [
        {
            "name": "V2",
            "scope": [{"namespace": "engine"}],
            "kind": {"record": {"isComplete": false}}
        },
        {
            "name": "Player",
            "location": {"path": "player.h", "line": 4, "column": 7},
            "comment": "/// @runtime @serializer(@engine::V2)",
            "kind": {"record": {
                "tag": "class",
                "fields": [{"name": "position", "type": {"record": 0}, "access": "public"}]
            }}
        }
    ]
}"#;

const ORPHAN: &str = r#"{
    "mainFile": "orphan.h",
    "decls": [
        {"name": "Missing", "kind": {"record": {}}},
        {
            "name": "Orphan",
            "location": {"path": "orphan.h", "line": 1, "column": 8},
            "comment": "/// @runtime",
            "kind": {"record": {"bases": [{"type": {"record": 0}}]}}
        }
    ]
}"#;

#[test]
fn test_analyze_text_report() -> Result<()> {
    let test = CliTest::with_file("dumps/math.json", MATH)?;
    test.write_file("dumps/player.json", PLAYER)?;

    let (code, stdout, stderr) = run(&mut test.analyze_command())?;

    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(
        stdout,
        "struct-or-class  engine::V2  math.h:2:8\n\
         struct-or-class  Player  player.h:4:7\n\
         \u{2713} Extracted 2 types from 2 files\n"
    );

    Ok(())
}

#[test]
fn test_analyze_json_report() -> Result<()> {
    let test = CliTest::with_file("math.json", MATH)?;
    test.write_file("player.json", PLAYER)?;

    let (code, stdout, _) = run(test.analyze_command().args(["--format", "json"]))?;
    assert_eq!(code, 0);

    let document: Value = serde_json::from_str(&stdout)?;
    let types = document["types"].as_array().unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[0]["prettyName"], "engine::V2");
    assert_eq!(types[0]["properties"][1]["name"], "y");
    assert_eq!(types[1]["prettyName"], "Player");
    assert_eq!(types[1]["properties"][0]["type"]["name"], "engine::V2");
    assert_eq!(types[1]["properties"][0]["type"]["resolved"], 0);
    assert_eq!(document["issues"], Value::Array(Vec::new()));
    assert_eq!(document["resolveError"], Value::Null);

    Ok(())
}

#[test]
fn test_analyze_explicit_paths() -> Result<()> {
    let test = CliTest::with_file("math.json", MATH)?;
    test.write_file("player.json", PLAYER)?;

    let (code, stdout, _) = run(test.analyze_command().arg("math.json"))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("engine::V2"));
    assert!(!stdout.contains("Player"));
    assert!(stdout.ends_with("Extracted 1 type from 1 file\n"));

    Ok(())
}

#[test]
fn test_analyze_collect_all() -> Result<()> {
    let test = CliTest::with_file("math.json", MATH)?;

    let (code, stdout, _) = run(test.analyze_command().arg("--collect-all"))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Scratch"));
    assert!(stdout.ends_with("Extracted 2 types from 1 file\n"));

    Ok(())
}

#[test]
fn test_analyze_unresolved_parent_fails() -> Result<()> {
    let test = CliTest::with_file("orphan.json", ORPHAN)?;

    let (code, stdout, _) = run(&mut test.analyze_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("error: unresolved reference 'Missing' in parent of 'Orphan'"));
    assert!(stdout.ends_with("Extracted 1 type from 1 file, 1 error\n"));

    Ok(())
}

#[test]
fn test_analyze_malformed_dump_is_reported() -> Result<()> {
    let test = CliTest::with_file("math.json", MATH)?;
    test.write_file("broken.json", "{ not json")?;

    let (code, stdout, _) = run(&mut test.analyze_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("engine::V2"));
    assert!(stdout.contains("error: malformed declaration dump"));
    assert!(stdout.ends_with("Extracted 1 type from 2 files, 1 error\n"));

    Ok(())
}

#[test]
fn test_analyze_respects_config_ignores() -> Result<()> {
    let test = CliTest::with_file("math.json", MATH)?;
    test.write_file("generated/broken.json", "{ not json")?;
    test.write_file(
        ".cppreflectrc.json",
        r#"{"ignores": ["generated/**"], "workers": 2}"#,
    )?;

    let (code, stdout, stderr) = run(&mut test.analyze_command())?;

    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.ends_with("Extracted 1 type from 1 file\n"));

    Ok(())
}

#[test]
fn test_analyze_invalid_config_is_internal_error() -> Result<()> {
    let test = CliTest::with_file(".cppreflectrc.json", r#"{"workers": 0}"#)?;

    let (code, stdout, stderr) = run(&mut test.analyze_command())?;

    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("Error: "));
    assert!(stderr.contains("'workers' must be at least 1"));

    Ok(())
}

#[test]
fn test_analyze_source_root() -> Result<()> {
    let test = CliTest::with_file("project/math.json", MATH)?;
    test.write_file("other/player.json", PLAYER)?;

    let (code, stdout, _) = run(test.analyze_command().args(["--source-root", "project"]))?;

    assert_eq!(code, 0);
    assert!(stdout.ends_with("Extracted 1 type from 1 file\n"));
    assert!(test.root().join("project/math.json").exists());

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(&mut test.command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("init"));

    Ok(())
}
