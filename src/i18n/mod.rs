//! Localization.
//!
//! Catalogs are nested JSON objects embedded at build time and flattened
//! to dotted keys (`errors.http400`). Lookup tries the current locale, then
//! the fallback locale, then gives the key back unchanged.

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::AppConfig;
use crate::traits::Translator;

type Catalog = HashMap<String, String>;

static CATALOGS: Lazy<HashMap<&'static str, Catalog>> = Lazy::new(|| {
    let mut catalogs = HashMap::new();
    catalogs.insert("en", parse_catalog(include_str!("locales/en.json")));
    catalogs.insert("lv", parse_catalog(include_str!("locales/lv.json")));
    catalogs
});

fn parse_catalog(source: &str) -> Catalog {
    let mut catalog = Catalog::new();
    match serde_json::from_str::<Value>(source) {
        Ok(value) => flatten("", &value, &mut catalog),
        Err(e) => tracing::error!("Invalid locale catalog: {}", e),
    }
    catalog
}

fn flatten(prefix: &str, value: &Value, out: &mut Catalog) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, child, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        _ => {}
    }
}

#[derive(Debug)]
pub struct Localizer {
    locale: RwLock<String>,
    fallback: String,
    supported: Vec<String>,
}

impl Localizer {
    pub fn new(locale: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            locale: RwLock::new(locale.into()),
            fallback: fallback.into(),
            supported: vec!["lv".to_string(), "en".to_string()],
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            locale: RwLock::new(config.default_locale.clone()),
            fallback: config.fallback_locale.clone(),
            supported: config.supported_locales.clone(),
        }
    }

    pub fn locale(&self) -> String {
        self.locale
            .read()
            .map(|l| l.clone())
            .unwrap_or_else(|_| self.fallback.clone())
    }

    /// Switch locale. Returns `false` and keeps the current one when the
    /// locale is not supported.
    pub fn set_locale(&self, locale: &str) -> bool {
        if !self.supported.iter().any(|l| l == locale) {
            return false;
        }
        match self.locale.write() {
            Ok(mut current) => {
                *current = locale.to_string();
                true
            }
            Err(_) => false,
        }
    }

    fn lookup(locale: &str, key: &str) -> Option<String> {
        CATALOGS.get(locale).and_then(|c| c.get(key)).cloned()
    }
}

impl Translator for Localizer {
    fn translate(&self, key: &str) -> String {
        Self::lookup(&self.locale(), key)
            .or_else(|| Self::lookup(&self.fallback, key))
            .unwrap_or_else(|| key.to_string())
    }
}
