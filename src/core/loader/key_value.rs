use std::{fs, path::Path};

use super::{Loader, join_key};
use crate::core::{catalogue::Catalogue, error::LoadError};

/// Loader for line-based `key = value` files (`.ini`, `.properties`).
///
/// `key: value` is accepted as well. Lines starting with `#`, `;` or `!`
/// are comments. An ini `[section]` header prefixes the keys that follow
/// it with `section.`. Values wrapped in double quotes are unquoted.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValueLoader;

impl Loader for KeyValueLoader {
    fn load(&self, path: &Path, locale: &str, domain: &str) -> Result<Catalogue, LoadError> {
        let content = fs::read_to_string(path)?;
        parse_key_values(&content, locale, domain)
    }
}

fn parse_key_values(content: &str, locale: &str, domain: &str) -> Result<Catalogue, LoadError> {
    let mut catalogue = Catalogue::new(locale);
    let mut section = String::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(['#', ';', '!']) {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = name.trim().to_string();
            continue;
        }

        let Some(separator) = line.find(['=', ':']) else {
            return Err(LoadError::Syntax {
                line: index + 1,
                message: format!("expected `key = value`, found {}", line),
            });
        };
        let key = line[..separator].trim();
        let value = unquote(line[separator + 1..].trim());

        catalogue.add_message(domain, join_key(&section, key), value);
    }

    Ok(catalogue)
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
