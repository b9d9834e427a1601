use std::{fs, path::Path};

use serde_yaml::Value;

use super::{Loader, join_key};
use crate::core::{catalogue::Catalogue, error::LoadError};

/// Loader for YAML message files (`.yml` and `.yaml`).
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLoader;

impl Loader for YamlLoader {
    fn load(&self, path: &Path, locale: &str, domain: &str) -> Result<Catalogue, LoadError> {
        let content = fs::read_to_string(path)?;
        parse_yaml(&content, locale, domain)
    }
}

fn parse_yaml(content: &str, locale: &str, domain: &str) -> Result<Catalogue, LoadError> {
    let mut catalogue = Catalogue::new(locale);
    if content.trim().is_empty() {
        return Ok(catalogue);
    }

    let yaml: Value = serde_yaml::from_str(content)?;

    match yaml {
        Value::Mapping(_) => flatten_yaml(&yaml, String::new(), domain, &mut catalogue),
        // A document holding only comments parses as null
        Value::Null => {}
        Value::Bool(_) => return Err(LoadError::NotAMapping { found: "boolean" }),
        Value::Number(_) => return Err(LoadError::NotAMapping { found: "number" }),
        Value::String(_) => return Err(LoadError::NotAMapping { found: "string" }),
        Value::Sequence(_) => return Err(LoadError::NotAMapping { found: "sequence" }),
        Value::Tagged(_) => return Err(LoadError::NotAMapping { found: "tagged value" }),
    }
    Ok(catalogue)
}

fn flatten_yaml(value: &Value, prefix: String, domain: &str, result: &mut Catalogue) {
    match value {
        Value::Mapping(map) => {
            for (key, val) in map {
                let Some(segment) = scalar_to_string(key) else {
                    continue;
                };
                flatten_yaml(val, join_key(&prefix, &segment), domain, result);
            }
        }
        Value::Sequence(seq) => {
            for (index, val) in seq.iter().enumerate() {
                flatten_yaml(val, join_key(&prefix, &index.to_string()), domain, result);
            }
        }
        Value::Tagged(tagged) => flatten_yaml(&tagged.value, prefix, domain, result),
        Value::Null => {
            result.add_message(domain, prefix, "");
        }
        scalar => {
            if let Some(message) = scalar_to_string(scalar) {
                result.add_message(domain, prefix, message);
            }
        }
    }
}

/// Render a scalar YAML value as text. Collections have no text form.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Mapping(_) | Value::Sequence(_) => None,
    }
}
