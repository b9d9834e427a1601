//! Report formatting and printing utilities.
//!
//! Separate from the engine so transloader can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, DomainsSummary, ImportSummary, InitSummary, ListSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{DomainStats, PlanStats, RecordFailure};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Placeholder for a locale without a message in `list` output.
const MISSING: &str = "-";

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Import(summary) => print_import_to(summary, &mut io::stdout().lock()),
        CommandSummary::List(summary) => print_list_to(summary, &mut io::stdout().lock()),
        CommandSummary::Domains(summary) => print_domains_to(summary, &mut io::stdout().lock()),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

// ============================================================
// import
// ============================================================

/// Print an import summary to a custom writer.
pub fn print_import_to<W: Write>(summary: &ImportSummary, writer: &mut W) {
    let outcome = &summary.outcome;

    match &summary.database {
        Some(path) => {
            let _ = writeln!(writer, "{} {}", "Store:".bold(), path.display());
        }
        None => {
            let _ = writeln!(
                writer,
                "{} nothing will be persisted",
                "Dry run:".yellow().bold()
            );
        }
    }

    if let Some(deleted) = outcome.deleted {
        let _ = writeln!(
            writer,
            "{} {} translation key(s)",
            "Deleted".red().bold(),
            deleted
        );
    }

    let _ = writeln!(
        writer,
        "Loaded {} file(s) from {} root(s)",
        outcome.files_loaded,
        summary.roots.len()
    );
    print_skipped(&outcome.plan, writer);
    if outcome.shadowed_messages > 0 {
        let _ = writeln!(
            writer,
            "  - shadowed by an earlier file: {} message(s)",
            outcome.shadowed_messages
        );
    }

    print_domain_table(&outcome.report.domains, writer);
    print_failures(&outcome.report.failures, writer);

    let report = &outcome.report;
    if report.is_clean() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Processed {} message(s): {} key(s) created, {} message(s) written",
                report.processed(),
                report.created(),
                report.written()
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "\n{} {} record(s) could not be stored ({} processed)",
            FAILURE_MARK.red(),
            report.failures.len(),
            report.processed()
        );
    }
}

fn print_skipped<W: Write>(stats: &PlanStats, writer: &mut W) {
    let rows = [
        ("malformed name", stats.malformed_names),
        ("unsupported format", stats.unsupported_formats),
        ("ignored", stats.ignored),
        ("unreadable", stats.inaccessible),
    ];
    for (label, count) in rows {
        if count > 0 {
            let _ = writeln!(writer, "  - skipped ({}): {} file(s)", label, count);
        }
    }
}

fn print_domain_table<W: Write>(domains: &[DomainStats], writer: &mut W) {
    if domains.is_empty() {
        return;
    }

    let locale_width = column_width("locale", domains.iter().map(|d| d.locale.as_str()));
    let domain_width = column_width("domain", domains.iter().map(|d| d.domain.as_str()));

    let _ = writeln!(writer);
    let _ = writeln!(
        writer,
        "  {}  {}  {}",
        pad("locale", locale_width).dimmed(),
        pad("domain", domain_width).dimmed(),
        "processed / created / written".dimmed()
    );
    for stats in domains {
        let mut line = format!(
            "  {}  {}  {} / {} / {}",
            pad(&stats.locale, locale_width),
            pad(&stats.domain, domain_width),
            stats.processed,
            stats.created,
            stats.written
        );
        if stats.skipped_empty > 0 {
            line.push_str(&format!(" ({} empty key(s) skipped)", stats.skipped_empty));
        }
        let _ = writeln!(writer, "{}", line);
    }
    let _ = writeln!(writer);
}

fn print_failures<W: Write>(failures: &[RecordFailure], writer: &mut W) {
    for failure in failures {
        let _ = writeln!(
            writer,
            "{}: {}.{} \"{}\": {}",
            "error".bold().red(),
            failure.domain,
            failure.locale,
            failure.key,
            failure.error
        );
    }
}

// ============================================================
// list / domains
// ============================================================

/// Print matching keys as a table: domain, key, then one column per locale.
pub fn print_list_to<W: Write>(summary: &ListSummary, writer: &mut W) {
    if summary.keys.is_empty() {
        let _ = writeln!(writer, "No translation keys match");
        return;
    }

    let domain_width = column_width(
        "domain",
        summary.keys.iter().map(|v| v.key.domain.as_str()),
    );
    let key_width = column_width(
        "key",
        summary.keys.iter().map(|v| v.key.trans_key.as_str()),
    );

    let locale_widths: Vec<usize> = summary
        .locales
        .iter()
        .map(|locale| {
            column_width(
                locale,
                summary
                    .keys
                    .iter()
                    .map(|v| cell(v.messages.get(locale).map(String::as_str))),
            )
        })
        .collect();

    let mut header = format!("{}  {}", pad("domain", domain_width), pad("key", key_width));
    for (locale, width) in summary.locales.iter().zip(&locale_widths) {
        header.push_str("  ");
        header.push_str(&pad(locale, *width));
    }
    let _ = writeln!(writer, "{}", header.trim_end().bold());

    for view in &summary.keys {
        let mut line = format!(
            "{}  {}",
            pad(&view.key.domain, domain_width),
            pad(&view.key.trans_key, key_width)
        );
        for (locale, width) in summary.locales.iter().zip(&locale_widths) {
            line.push_str("  ");
            line.push_str(&pad(cell(view.messages.get(locale).map(String::as_str)), *width));
        }
        let _ = writeln!(writer, "{}", line.trim_end());
    }

    let _ = writeln!(writer, "\n{} key(s)", summary.keys.len());
}

pub fn print_domains_to<W: Write>(summary: &DomainsSummary, writer: &mut W) {
    if summary.domains.is_empty() {
        let _ = writeln!(writer, "No domains in the translation store");
        return;
    }
    for domain in &summary.domains {
        let _ = writeln!(writer, "{}", domain);
    }
}

// ============================================================
// init
// ============================================================

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!(
            "{} {} already exists",
            FAILURE_MARK.red(),
            CONFIG_FILE_NAME
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(UnicodeWidthStr::width)
        .chain(std::iter::once(UnicodeWidthStr::width(header)))
        .max()
        .unwrap_or(0)
}

fn cell(message: Option<&str>) -> &str {
    match message {
        Some(message) if !message.is_empty() => message,
        _ => MISSING,
    }
}

/// Left-align `value` to `width` display columns.
fn pad(value: &str, width: usize) -> String {
    let padding = width.saturating_sub(UnicodeWidthStr::width(value));
    format!("{}{}", value, " ".repeat(padding))
}
