use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in [
        "resourceRoots",
        "database",
        "formats",
        "ignores",
        "managedLocales",
        "emptyPrefixes",
    ] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["database"], "translations.db");

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .transloaderrc.json

    ----- stderr -----
    ");
    assert!(test.root().join(".transloaderrc.json").exists());

    let content = test.read_file(".transloaderrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".transloaderrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    ✘ .transloaderrc.json already exists
    ");
    assert_eq!(test.read_file(".transloaderrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("translations/app.en.yml", "title: Title\n")?;

    assert_cmd_snapshot!(test.import_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Store: [PROJECT]/translations.db
    Loaded 1 file(s) from 1 root(s)

      locale  domain  processed / created / written
      en      app     1 / 1 / 0

    ✓ Processed 1 message(s): 1 key(s) created, 0 message(s) written

    ----- stderr -----
    ");
    assert!(test.database_path().exists());

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::with_file(".transloaderrc.json", r#"{ "ignores": ["[broken"] }"#)?;

    assert_cmd_snapshot!(test.import_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid glob pattern in 'ignores': "[broken"
    "#);

    Ok(())
}
