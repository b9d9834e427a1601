use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr};

fn imported_project(config: Option<&str>) -> Result<CliTest> {
    let test = CliTest::with_file(
        "translations/cart.en.yml",
        "checkout: Checkout\ntotal: Total\n",
    )?;
    test.write_file(
        "translations/cart.fr.yml",
        "checkout: Commander\ntotal: __total\n",
    )?;
    test.write_file("translations/app.en.json", r#"{"title": "My app"}"#)?;
    if let Some(config) = config {
        test.write_file(".transloaderrc.json", config)?;
    }

    let output = test.import_command().arg("--force").output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    Ok(test)
}

#[test]
fn test_list_all_keys() -> Result<()> {
    let test = imported_project(None)?;

    assert_cmd_snapshot!(test.list_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    domain  key       en        fr
    app     title     My app    -
    cart    checkout  Checkout  Commander
    cart    total     Total     __total

    3 key(s)

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_list_untranslated_with_managed_locales() -> Result<()> {
    let test = imported_project(Some(r#"{ "managedLocales": ["en", "fr"] }"#))?;

    assert_cmd_snapshot!(test.list_command().arg("--untranslated"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    domain  key    en      fr
    app     title  My app  -
    cart    total  Total   __total

    2 key(s)

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_list_filters() -> Result<()> {
    let test = imported_project(None)?;

    assert_cmd_snapshot!(test.list_command().args(["--domain", "cart", "--label", "Command"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    domain  key       en        fr
    cart    checkout  Checkout  Commander

    1 key(s)

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_list_without_match() -> Result<()> {
    let test = imported_project(None)?;

    assert_cmd_snapshot!(test.list_command().args(["--key", "shipping"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    No translation keys match

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_list_rejects_unmanaged_locale() -> Result<()> {
    let test = imported_project(Some(r#"{ "managedLocales": ["en", "fr"] }"#))?;

    assert_cmd_snapshot!(test.list_command().args(["--locale", "de"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: locale 'de' is not a managed locale (managed: en, fr)
    ");
    Ok(())
}

#[test]
fn test_list_without_store_is_fatal() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.list_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Translation store not found: [PROJECT]/translations.db (run `transloader import` first)
    ");

    assert!(!test.database_path().exists());
    Ok(())
}

#[test]
fn test_domains() -> Result<()> {
    let test = imported_project(None)?;

    assert_cmd_snapshot!(test.command().arg("domains"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    app
    cart

    ----- stderr -----
    ");
    Ok(())
}
