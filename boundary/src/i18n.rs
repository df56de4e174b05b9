//! Message catalogs used to turn message keys into displayed text.

use crate::error::{BoundaryError, Result};
use std::collections::HashMap;
use std::path::Path;

const EN: &str = include_str!("../locales/en.toml");
const DE: &str = include_str!("../locales/de.toml");

/// Locales shipped with the crate.
pub const BUILTIN_LOCALES: [&str; 2] = ["en", "de"];

/// Localisation lookup.
pub trait Translator {
    /// Translate `key`. Implementations return the key itself when it is unknown.
    fn t(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn t(&self, key: &str) -> String {
        self(key)
    }
}

/// Flat key to message map, loaded from nested TOML tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locale: String,
    messages: HashMap<String, String>,
}

impl Catalog {
    /// Built-in English catalog
    pub fn english() -> Self {
        Self::builtin("en").unwrap_or_default()
    }

    /// Load one of the built-in catalogs.
    pub fn builtin(locale: &str) -> Result<Self> {
        let source = match locale {
            "en" => EN,
            "de" => DE,
            _ => {
                return Err(BoundaryError::UnknownLocale {
                    locale: locale.to_string(),
                    available: BUILTIN_LOCALES.join(", "),
                })
            }
        };
        Self::parse(locale, source, Path::new(locale))
    }

    /// Load a catalog from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(locale: &str, path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse(locale, &content, path)
    }

    fn parse(locale: &str, source: &str, origin: &Path) -> Result<Self> {
        let table: toml::Table =
            toml::from_str(source).map_err(|e| BoundaryError::catalog_parse(origin, e))?;

        let mut messages = HashMap::new();
        flatten(&table, "", &mut messages)?;

        Ok(Self {
            locale: locale.to_string(),
            messages,
        })
    }

    /// Entries of `other` replace entries of `self`.
    #[must_use]
    pub fn merged_with(mut self, other: Catalog) -> Self {
        self.messages.extend(other.messages);
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn flatten(table: &toml::Table, prefix: &str, out: &mut HashMap<String, String>) -> Result<()> {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };

        match value {
            toml::Value::String(s) => {
                out.insert(key, s.clone());
            }
            toml::Value::Table(nested) => flatten(nested, &key, out)?,
            _ => return Err(BoundaryError::InvalidCatalogEntry { key }),
        }
    }
    Ok(())
}

impl Translator for Catalog {
    fn t(&self, key: &str) -> String {
        match self.get(key) {
            Some(message) => message.to_string(),
            None => {
                tracing::debug!(key, locale = %self.locale, "missing translation");
                key.to_string()
            }
        }
    }
}
