use std::{fs, path::Path};

use super::Loader;
use crate::core::{catalogue::Catalogue, error::LoadError};

/// Separator between `msgctxt` and `msgid` in catalogue keys.
pub const CONTEXT_SEPARATOR: char = '|';

/// Loader for gettext `.po` files.
///
/// The key of an entry is its `msgid`, prefixed with `msgctxt|` when the
/// entry has a context. Plural entries keep `msgstr[0]`. The header entry
/// has an empty `msgid` and therefore an empty key.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoLoader;

impl Loader for PoLoader {
    fn load(&self, path: &Path, locale: &str, domain: &str) -> Result<Catalogue, LoadError> {
        let content = fs::read_to_string(path)?;
        let mut catalogue = Catalogue::new(locale);
        for entry in parse_po(&content)? {
            catalogue.add_message(domain, entry.key(), entry.translation);
        }
        Ok(catalogue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    IdPlural,
    Str,
    // msgstr[n] with n > 0, not kept
    OtherPlural,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct PoEntry {
    context: Option<String>,
    source: String,
    translation: String,
}

impl PoEntry {
    fn key(&self) -> String {
        match &self.context {
            Some(context) => format!("{}{}{}", context, CONTEXT_SEPARATOR, self.source),
            None => self.source.clone(),
        }
    }
}

#[derive(Default)]
struct EntryBuilder {
    entry: PoEntry,
    has_id: bool,
    field: Option<Field>,
}

impl EntryBuilder {
    fn finish(&mut self, entries: &mut Vec<PoEntry>) {
        if self.has_id {
            entries.push(std::mem::take(&mut self.entry));
        } else {
            self.entry = PoEntry::default();
        }
        self.has_id = false;
        self.field = None;
    }

    fn append(&mut self, text: &str) {
        match self.field {
            Some(Field::Context) => {
                self.entry.context.get_or_insert_with(String::new).push_str(text)
            }
            Some(Field::Id) => self.entry.source.push_str(text),
            Some(Field::Str) => self.entry.translation.push_str(text),
            Some(Field::IdPlural) | Some(Field::OtherPlural) | None => {}
        }
    }
}

fn parse_po(content: &str) -> Result<Vec<PoEntry>, LoadError> {
    let mut entries = Vec::new();
    let mut builder = EntryBuilder::default();

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            builder.finish(&mut entries);
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let (field, rest) = if let Some(rest) = line.strip_prefix("msgctxt ") {
            // A new context always opens a new entry
            builder.finish(&mut entries);
            (Field::Context, rest)
        } else if let Some(rest) = line.strip_prefix("msgid_plural ") {
            (Field::IdPlural, rest)
        } else if let Some(rest) = line.strip_prefix("msgid ") {
            if builder.has_id {
                builder.finish(&mut entries);
            }
            builder.has_id = true;
            (Field::Id, rest)
        } else if let Some(rest) = line.strip_prefix("msgstr[0] ") {
            (Field::Str, rest)
        } else if line.starts_with("msgstr[") {
            let rest = line.split_once(' ').map(|(_, rest)| rest).unwrap_or("\"\"");
            (Field::OtherPlural, rest)
        } else if let Some(rest) = line.strip_prefix("msgstr ") {
            (Field::Str, rest)
        } else if line.starts_with('"') {
            if builder.field.is_none() {
                return Err(syntax(line_number, "string continuation without a keyword"));
            }
            let text = unquote(line, line_number)?;
            builder.append(&text);
            continue;
        } else {
            return Err(syntax(line_number, format!("unexpected line: {}", line)));
        };

        if field == Field::Context {
            builder.entry.context = Some(String::new());
        }
        builder.field = Some(field);
        let text = unquote(rest, line_number)?;
        builder.append(&text);
    }

    builder.finish(&mut entries);
    Ok(entries)
}

fn syntax(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Syntax {
        line,
        message: message.into(),
    }
}

/// Strip the surrounding quotes of a PO string and resolve escapes.
fn unquote(s: &str, line: usize) -> Result<String, LoadError> {
    let s = s.trim();
    let inner = s
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .filter(|_| s.len() >= 2)
        .ok_or_else(|| syntax(line, format!("expected a quoted string, found {}", s)))?;

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('"') => result.push('"'),
                Some('\\') => result.push('\\'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    Ok(result)
}
