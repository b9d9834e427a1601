use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, pair};

fn cart_project() -> Result<CliTest> {
    let test = CliTest::with_file("translations/cart.en.yml", "checkout: \"Checkout\"\n")?;
    test.write_file("translations/cart.fr.yml", "checkout: \"Commander\"\n")?;
    Ok(test)
}

#[test]
fn test_import_force_writes_messages() -> Result<()> {
    let test = cart_project()?;

    assert_cmd_snapshot!(test.import_command().arg("--force"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Store: [PROJECT]/translations.db
    Loaded 2 file(s) from 1 root(s)

      locale  domain  processed / created / written
      en      cart    1 / 1 / 1
      fr      cart    1 / 0 / 1

    ✓ Processed 2 message(s): 1 key(s) created, 2 message(s) written

    ----- stderr -----
    ");

    assert_eq!(test.stored_keys()?, vec![pair("cart", "checkout")]);
    assert_eq!(
        test.stored_message("checkout", "cart", "en")?.as_deref(),
        Some("Checkout")
    );
    assert_eq!(
        test.stored_message("checkout", "cart", "fr")?.as_deref(),
        Some("Commander")
    );
    Ok(())
}

#[test]
fn test_import_default_only_creates_keys() -> Result<()> {
    let test = cart_project()?;

    assert_cmd_snapshot!(test.import_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Store: [PROJECT]/translations.db
    Loaded 2 file(s) from 1 root(s)

      locale  domain  processed / created / written
      en      cart    1 / 1 / 0
      fr      cart    1 / 0 / 0

    ✓ Processed 2 message(s): 1 key(s) created, 0 message(s) written

    ----- stderr -----
    ");

    assert_eq!(test.stored_keys()?, vec![pair("cart", "checkout")]);
    assert_eq!(test.stored_message("checkout", "cart", "en")?, None);
    Ok(())
}

#[test]
fn test_import_default_keeps_existing_messages() -> Result<()> {
    let test = cart_project()?;
    test.seed("checkout", "cart", &[("en", "Pay now")])?;

    assert_cmd_snapshot!(test.import_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Store: [PROJECT]/translations.db
    Loaded 2 file(s) from 1 root(s)

      locale  domain  processed / created / written
      en      cart    1 / 0 / 0
      fr      cart    1 / 0 / 0

    ✓ Processed 2 message(s): 0 key(s) created, 0 message(s) written

    ----- stderr -----
    ");
    assert_eq!(
        test.stored_message("checkout", "cart", "en")?.as_deref(),
        Some("Pay now")
    );

    let output = test.import_command().arg("-f").output()?;
    assert!(output.status.success());
    assert_eq!(
        test.stored_message("checkout", "cart", "en")?.as_deref(),
        Some("Checkout")
    );
    Ok(())
}

#[test]
fn test_import_twice_is_idempotent() -> Result<()> {
    let test = cart_project()?;

    test.import_command().output()?;

    assert_cmd_snapshot!(test.import_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Store: [PROJECT]/translations.db
    Loaded 2 file(s) from 1 root(s)

      locale  domain  processed / created / written
      en      cart    1 / 0 / 0
      fr      cart    1 / 0 / 0

    ✓ Processed 2 message(s): 0 key(s) created, 0 message(s) written

    ----- stderr -----
    ");
    assert_eq!(test.stored_keys()?, vec![pair("cart", "checkout")]);
    Ok(())
}

#[test]
fn test_import_clear_removes_stale_keys() -> Result<()> {
    let test = cart_project()?;
    test.seed("stale", "legacy", &[("en", "Old")])?;

    assert_cmd_snapshot!(test.import_command().args(["--clear", "--force"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Store: [PROJECT]/translations.db
    Deleted 1 translation key(s)
    Loaded 2 file(s) from 1 root(s)

      locale  domain  processed / created / written
      en      cart    1 / 1 / 1
      fr      cart    1 / 0 / 1

    ✓ Processed 2 message(s): 1 key(s) created, 2 message(s) written

    ----- stderr -----
    ");

    assert_eq!(test.stored_keys()?, vec![pair("cart", "checkout")]);
    Ok(())
}

#[test]
fn test_import_skips_malformed_names() -> Result<()> {
    let test = CliTest::with_file("translations/readme.txt", "not a translation")?;
    test.write_file("translations/app.en.json", r#"{"menu": {"home": "Home"}}"#)?;

    assert_cmd_snapshot!(test.import_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Store: [PROJECT]/translations.db
    Loaded 1 file(s) from 1 root(s)
      - skipped (malformed name): 1 file(s)

      locale  domain  processed / created / written
      en      app     1 / 1 / 0

    ✓ Processed 1 message(s): 1 key(s) created, 0 message(s) written

    ----- stderr -----
    ");

    assert_eq!(test.stored_keys()?, vec![pair("app", "menu.home")]);
    Ok(())
}

#[test]
fn test_import_skips_po_header_entry() -> Result<()> {
    let test = CliTest::with_file(
        "translations/app.fr.po",
        r#"msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"
"Language: fr\n"

msgid "Save"
msgstr "Enregistrer"
"#,
    )?;

    assert_cmd_snapshot!(test.import_command().arg("--force"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Store: [PROJECT]/translations.db
    Loaded 1 file(s) from 1 root(s)

      locale  domain  processed / created / written
      fr      app     1 / 1 / 1 (1 empty key(s) skipped)

    ✓ Processed 1 message(s): 1 key(s) created, 1 message(s) written

    ----- stderr -----
    ");

    assert_eq!(test.stored_keys()?, vec![pair("app", "Save")]);
    assert_eq!(test.stored_message("", "app", "fr")?, None);
    Ok(())
}

#[test]
fn test_import_missing_loader_is_fatal_and_keeps_store() -> Result<()> {
    let test = CliTest::with_file(".transloaderrc.json", r#"{ "formats": ["yml", "xlf"] }"#)?;
    test.write_file("translations/app.en.xlf", "<xliff/>")?;
    test.seed("keep", "app", &[])?;

    assert_cmd_snapshot!(test.import_command().arg("--clear"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: could not find loader for xlf files
    ");

    assert_eq!(test.stored_keys()?, vec![pair("app", "keep")]);
    Ok(())
}

#[test]
fn test_import_parse_error_is_fatal() -> Result<()> {
    let test = CliTest::with_file("translations/app.en.yml", "title: [unclosed\n")?;

    let mut settings = insta::Settings::clone_current();
    settings.add_filter(r"invalid YAML: .*", "invalid YAML: [DETAILS]");
    settings.bind(|| {
        assert_cmd_snapshot!(test.import_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: failed to load [PROJECT]/translations/app.en.yml: invalid YAML: [DETAILS]
        ");
    });
    Ok(())
}

#[test]
fn test_import_dry_run_persists_nothing() -> Result<()> {
    let test = cart_project()?;

    assert_cmd_snapshot!(test.import_command().args(["--dry-run", "--force"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Dry run: nothing will be persisted
    Loaded 2 file(s) from 1 root(s)

      locale  domain  processed / created / written
      en      cart    1 / 1 / 1
      fr      cart    1 / 0 / 1

    ✓ Processed 2 message(s): 1 key(s) created, 2 message(s) written

    ----- stderr -----
    ");

    assert!(!test.database_path().exists());
    Ok(())
}

#[test]
fn test_import_roots_in_order_first_wins() -> Result<()> {
    let test = CliTest::with_file("app/app.en.yml", "title: App title\n")?;
    test.write_file("vendor/app.en.yml", "title: Vendor title\nfooter: Footer\n")?;

    assert_cmd_snapshot!(
        test.import_command()
            .args(["--force", "--root", "app", "--root", "vendor"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Store: [PROJECT]/translations.db
    Loaded 2 file(s) from 2 root(s)
      - shadowed by an earlier file: 1 message(s)

      locale  domain  processed / created / written
      en      app     2 / 2 / 2

    ✓ Processed 2 message(s): 2 key(s) created, 2 message(s) written

    ----- stderr -----
    "
    );

    assert_eq!(
        test.stored_message("title", "app", "en")?.as_deref(),
        Some("App title")
    );
    assert_eq!(
        test.stored_message("footer", "app", "en")?.as_deref(),
        Some("Footer")
    );
    Ok(())
}

#[test]
fn test_import_uses_configured_roots_and_database() -> Result<()> {
    let test = CliTest::with_file(
        ".transloaderrc.json",
        r#"{ "resourceRoots": ["i18n"], "database": "var/store.db", "ignores": ["drafts/**"] }"#,
    )?;
    test.write_file("i18n/messages.de.po", "msgid \"Save\"\nmsgstr \"Speichern\"\n")?;
    test.write_file("i18n/drafts/messages.de.po", "msgid \"Draft\"\nmsgstr \"Entwurf\"\n")?;

    assert_cmd_snapshot!(test.import_command().arg("-f"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Store: [PROJECT]/var/store.db
    Loaded 1 file(s) from 1 root(s)
      - skipped (ignored): 1 file(s)

      locale  domain    processed / created / written
      de      messages  1 / 1 / 1

    ✓ Processed 1 message(s): 1 key(s) created, 1 message(s) written

    ----- stderr -----
    ");

    assert!(test.root().join("var/store.db").exists());
    assert!(!test.database_path().exists());
    Ok(())
}

#[test]
fn test_import_without_roots_on_disk() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.import_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Store: [PROJECT]/translations.db
    Loaded 0 file(s) from 1 root(s)
    ✓ Processed 0 message(s): 0 key(s) created, 0 message(s) written

    ----- stderr -----
    ");
    Ok(())
}
