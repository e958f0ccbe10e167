use anyhow::Result;
use serde_json::{Value, json};

use crate::{CliTest, run};

const CATALOG: &str = r#"{
    "A": {
        "B": "x",
        "C": "y"
    }
}"#;

fn setup(test: &CliTest) -> Result<()> {
    test.write_file("i18n/en.json", CATALOG)?;
    test.write_file(
        "src/app/home.component.ts",
        "this.title = this.translate.instant('A.B');",
    )
}

#[test]
fn test_dry_run_lists_unused_keys() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    let out = run(test.clean_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("en: 2 total, 1 used, 1 unused"), "{}", out.stdout);
    assert!(out.stdout.contains("    A.C"));
    assert!(out.stdout.contains("Would remove 1 unused key."));
    assert_eq!(test.read_file("i18n/en.json")?, CATALOG);
    assert!(!test.root().join("i18n/en.backup.json").exists());
    Ok(())
}

#[test]
fn test_clean_prunes_and_backs_up() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    let out = run({
        let mut cmd = test.clean_command();
        cmd.arg("--clean");
        cmd
    })?;

    assert_eq!(out.code, Some(0), "{}{}", out.stdout, out.stderr);
    assert_eq!(
        test.read_file("i18n/en.json")?,
        "{\n  \"A\": {\n    \"B\": \"x\"\n  }\n}\n"
    );
    assert_eq!(test.read_file("i18n/en.backup.json")?, CATALOG);
    assert!(out.stdout.contains("removed 1 of 2 keys"));
    assert!(out.stdout.contains("Removed 1 unused key from 1 locale."));
    Ok(())
}

#[test]
fn test_clean_twice_removes_nothing_more() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    let mut first = test.clean_command();
    first.arg("--clean");
    run(first)?;
    let pruned = test.read_file("i18n/en.json")?;

    let mut second = test.clean_command();
    second.arg("--clean");
    let out = run(second)?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("No unused keys."));
    assert_eq!(test.read_file("i18n/en.json")?, pruned);
    Ok(())
}

#[test]
fn test_references_from_three_syntaxes() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "i18n/en.json",
        r#"{"A": {"B": {"C": "deep", "D": "unused"}}, "E": "unused"}"#,
    )?;
    test.write_file("src/a.ts", r#"translate.instant("A.B.C")"#)?;
    test.write_file("src/b.html", "{{ 'A.B.C' | translate }}")?;
    test.write_file("src/c.html", r#"<p [translate]="'A.B.C'"></p>"#)?;

    let out = run({
        let mut cmd = test.clean_command();
        cmd.arg("--apply");
        cmd
    })?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Scanned 3 source files, found 3 referenced key paths"));
    let written: Value = serde_json::from_str(&test.read_file("i18n/en.json")?)?;
    assert_eq!(written, json!({"A": {"B": {"C": "deep"}}}));
    Ok(())
}

#[test]
fn test_keep_prefixes_protect_namespace() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lexicatrc.json", r#"{ "keepPrefixes": ["Countries"] }"#)?;
    test.write_file(
        "i18n/en.json",
        r#"{"Countries": {"TR": "Turkey", "DE": "Germany"}, "Old": "gone"}"#,
    )?;
    test.write_file("src/app.ts", "const all = this.translate.instant(ns);")?;

    let mut cmd = test.clean_command();
    cmd.arg("--clean");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    let written: Value = serde_json::from_str(&test.read_file("i18n/en.json")?)?;
    assert_eq!(written, json!({"Countries": {"TR": "Turkey", "DE": "Germany"}}));
    Ok(())
}

#[test]
fn test_write_failure_aborts_only_that_locale() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    test.write_file("i18n/de.json", CATALOG)?;
    // A directory where the backup should go makes the backup write fail.
    std::fs::create_dir_all(test.root().join("i18n/de.backup.json"))?;

    let mut cmd = test.clean_command();
    cmd.arg("--clean");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("failed to write"), "{}", out.stderr);
    assert!(out.stderr.contains("de.backup.json"));
    assert_eq!(test.read_file("i18n/de.json")?, CATALOG);
    assert_eq!(test.read_file("i18n/en.backup.json")?, CATALOG);
    let written: Value = serde_json::from_str(&test.read_file("i18n/en.json")?)?;
    assert_eq!(written, json!({"A": {"B": "x"}}));
    Ok(())
}

#[test]
fn test_missing_source_root_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("i18n/en.json", CATALOG)?;

    let out = run(test.clean_command())?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("sourceRoot"));
    Ok(())
}
