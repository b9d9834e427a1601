use std::{fs, path::Path};

use serde_json::Value;

use super::{Loader, join_key};
use crate::core::{catalogue::Catalogue, error::LoadError};

/// Loader for JSON message files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

impl Loader for JsonLoader {
    fn load(&self, path: &Path, locale: &str, domain: &str) -> Result<Catalogue, LoadError> {
        let content = fs::read_to_string(path)?;
        parse_json(&content, locale, domain)
    }
}

fn parse_json(content: &str, locale: &str, domain: &str) -> Result<Catalogue, LoadError> {
    let mut catalogue = Catalogue::new(locale);
    if content.trim().is_empty() {
        return Ok(catalogue);
    }

    let json: Value = serde_json::from_str(content)?;
    match json {
        Value::Object(_) => flatten_json(&json, String::new(), domain, &mut catalogue),
        Value::Null => {}
        other => {
            return Err(LoadError::NotAMapping {
                found: value_kind(&other),
            });
        }
    }
    Ok(catalogue)
}

fn flatten_json(value: &Value, prefix: String, domain: &str, result: &mut Catalogue) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_json(val, join_key(&prefix, key), domain, result);
            }
        }
        Value::Array(arr) => {
            for (index, val) in arr.iter().enumerate() {
                flatten_json(val, join_key(&prefix, &index.to_string()), domain, result);
            }
        }
        Value::String(s) => {
            result.add_message(domain, prefix, s.as_str());
        }
        Value::Number(n) => {
            result.add_message(domain, prefix, n.to_string());
        }
        Value::Bool(b) => {
            result.add_message(domain, prefix, b.to_string());
        }
        // Untranslated placeholder
        Value::Null => {
            result.add_message(domain, prefix, "");
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
