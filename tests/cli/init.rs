use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

const CONFIG: &str = ".cppreflectrc.json";

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(test.command().arg("init"))?;
    assert_eq!(code, 0);
    assert_eq!(stdout, "\u{2713} Created .cppreflectrc.json\n");

    let content = test.read_file(CONFIG)?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["includes"][0], "**/*.json");
    assert!(parsed["ignores"].as_array().is_some_and(Vec::is_empty));
    assert_eq!(parsed["compiler"]["cppStandard"], 11);
    assert!(content.contains("\n  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(CONFIG, "{}")?;

    let (code, stdout, stderr) = run(test.command().arg("init"))?;
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert_eq!(stderr, "Error: .cppreflectrc.json already exists\n");
    assert_eq!(test.read_file(CONFIG)?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    run(test.command().arg("init"))?;

    let (code, stdout, stderr) = run(&mut test.analyze_command())?;
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(stdout, "\u{2713} Extracted 0 types from 0 files\n");

    Ok(())
}
