use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let out = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Created"));

    let content = test.read_file(".lexicatrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["localesRoot"], "./i18n");
    assert!(parsed["patterns"].as_array().is_some_and(|p| !p.is_empty()));
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lexicatrc.json", "{}")?;

    let out = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("already exists"));
    assert_eq!(test.read_file(".lexicatrc.json")?, "{}");
    Ok(())
}
