use anyhow::Result;
use insta::assert_json_snapshot;
use serde_json::Value;

use crate::{CliTest, run};

fn setup_catalogs(test: &CliTest) -> Result<()> {
    test.write_file("i18n/tr.json", r#"{"A": {"B": "x", "C": "y"}}"#)?;
    test.write_file("i18n/en.json", r#"{"A": {"B": "x"}}"#)
}

#[test]
fn test_validate_reports_missing_key() -> Result<()> {
    let test = CliTest::new()?;
    setup_catalogs(&test)?;

    let out = run(test.validate_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("1 key in tr missing from en:"), "{}", out.stdout);
    assert!(out.stdout.contains("    A.C"));
    assert!(!out.stdout.contains("in en missing from tr"));
    assert!(out.stdout.contains("en: 1 key, 17 bytes"));

    let report: Value =
        serde_json::from_str(&test.read_file("translation-validation-report.json")?)?;
    assert_json_snapshot!(report["missingKeys"], @r#"
    {
      "en": {
        "missingFrom_tr": []
      },
      "tr": {
        "missingFrom_en": [
          "A.C"
        ]
      }
    }
    "#);
    assert_eq!(report["summary"]["en"]["totalKeys"], 1);
    assert_eq!(report["summary"]["tr"]["totalKeys"], 2);
    Ok(())
}

#[test]
fn test_validate_passes_for_consistent_catalogs() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("i18n/en.json", r#"{"Nav": {"home": "Home", "items": "0"}}"#)?;
    test.write_file("i18n/tr.json", r#"{"Nav": {"home": "Ana Sayfa", "items": "false"}}"#)?;

    let out = run(test.validate_command())?;

    assert_eq!(out.code, Some(0), "{}", out.stdout);
    assert!(out.stdout.contains("Checked 2 locales - no missing keys or empty values"));
    Ok(())
}

#[test]
fn test_validate_flags_empty_values() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "i18n/en.json",
        r#"{"a": "", "b": "   ", "c": "ok", "d": null, "e": "", "f": "", "g": ""}"#,
    )?;

    let out = run(test.validate_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("6 empty values in en:"));
    assert!(out.stdout.contains("... and 1 more"));

    let report: Value =
        serde_json::from_str(&test.read_file("translation-validation-report.json")?)?;
    assert_eq!(
        report["emptyValues"]["en"],
        serde_json::json!(["a", "b", "d", "e", "f", "g"])
    );
    Ok(())
}

#[test]
fn test_validate_parse_error_names_file_and_locale() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("i18n/en.json", r#"{"a": "A"}"#)?;
    test.write_file("i18n/tr.json", r#"{"a": "A""#)?;

    let out = run(test.validate_command())?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("failed to parse 'tr' catalog"), "{}", out.stderr);
    assert!(out.stderr.contains("tr.json"));
    assert!(out.stdout.contains("en: 1 key"));
    Ok(())
}

#[test]
fn test_validate_uses_config_and_no_report() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".lexicatrc.json",
        r#"{ "localesRoot": "./assets/lang", "locales": ["en", "de"] }"#,
    )?;
    test.write_file("assets/lang/en.json", r#"{"a": "A"}"#)?;
    test.write_file("assets/lang/de.json", r#"{"a": "A"}"#)?;
    test.write_file("assets/lang/fr.json", r#"{"b": "B"}"#)?;

    let out = run({
        let mut cmd = test.validate_command();
        cmd.arg("--no-report");
        cmd
    })?;

    assert_eq!(out.code, Some(0), "{}{}", out.stdout, out.stderr);
    assert!(!out.stdout.contains("fr"));
    assert!(!test.root().join("translation-validation-report.json").exists());
    Ok(())
}

#[test]
fn test_validate_missing_locales_dir() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.validate_command())?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("does not exist"));
    Ok(())
}

#[test]
fn test_validate_report_write_failure_still_prints_findings() -> Result<()> {
    let test = CliTest::new()?;
    setup_catalogs(&test)?;

    let out = run({
        let mut cmd = test.validate_command();
        cmd.args(["--report", "missing-dir/report.json"]);
        cmd
    })?;

    assert_eq!(out.code, Some(2));
    assert!(out.stdout.contains("1 key in tr missing from en:"), "{}", out.stdout);
    assert!(out.stderr.contains("failed to write"), "{}", out.stderr);
    assert!(out.stderr.contains("report.json"));
    Ok(())
}
