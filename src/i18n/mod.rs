//! Internationalization (i18n) support

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Languages compiled into the binary
const BUILTIN_LANGUAGES: &[(&str, &str)] = &[
    ("pt-BR", include_str!("languages/pt-BR.yml")),
    ("en", include_str!("languages/en.yml")),
];

/// Internationalization handler
#[derive(Debug, Clone)]
pub struct I18n {
    /// Current language
    language: String,
    /// Language data: lang -> key -> translation
    translations: HashMap<String, HashMap<String, serde_yaml::Value>>,
}

impl I18n {
    /// Create a handler with the built-in languages loaded
    pub fn new(language: &str) -> Self {
        let mut translations = HashMap::new();
        for (lang, source) in BUILTIN_LANGUAGES {
            match serde_yaml::from_str::<HashMap<String, serde_yaml::Value>>(source) {
                Ok(data) => {
                    translations.insert(lang.to_string(), data);
                }
                Err(e) => tracing::error!("Built-in language {} is invalid: {}", lang, e),
            }
        }

        Self {
            language: language.to_string(),
            translations,
        }
    }

    /// Load language files from a directory, overriding built-in keys
    pub fn load_languages<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() {
                let ext = path.extension().and_then(|e| e.to_str());
                if matches!(ext, Some("yml") | Some("yaml") | Some("json")) {
                    let lang = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("en")
                        .to_string();

                    let content = fs::read_to_string(&path)?;

                    // Try to parse, skip invalid files
                    let data: Option<HashMap<String, serde_yaml::Value>> = if ext == Some("json") {
                        match serde_json::from_str::<serde_json::Value>(&content) {
                            Ok(json) => Some(convert_json_to_yaml(json)),
                            Err(e) => {
                                tracing::warn!("Failed to parse language file {:?}: {}", path, e);
                                None
                            }
                        }
                    } else {
                        match serde_yaml::from_str(&content) {
                            Ok(data) => Some(data),
                            Err(e) => {
                                tracing::warn!("Failed to parse language file {:?}: {}", path, e);
                                None
                            }
                        }
                    };

                    if let Some(data) = data {
                        self.translations.entry(lang).or_default().extend(data);
                        tracing::debug!("Loaded language file: {:?}", path);
                    }
                }
            }
        }

        Ok(())
    }

    /// Get the current language
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Get a translation by key
    /// Key can be nested like "list.prompt"
    pub fn get(&self, key: &str) -> String {
        self.lookup(key)
            .map(yaml_value_to_string)
            .unwrap_or_else(|| key.to_string())
    }

    /// Get a list translation such as "date.months_short"
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        match self.lookup(key)? {
            serde_yaml::Value::Sequence(items) => {
                Some(items.iter().map(yaml_value_to_string).collect())
            }
            _ => None,
        }
    }

    /// Look the key up in the current language, its base language, then English
    fn lookup(&self, key: &str) -> Option<&serde_yaml::Value> {
        if let Some(value) = self
            .lang_data(&self.language)
            .and_then(|data| get_nested_value(data, key))
        {
            return Some(value);
        }

        self.translations
            .get("en")
            .and_then(|data| get_nested_value(data, key))
    }

    /// Exact match first, then the base language ("pt" for "pt-PT" finds "pt-BR")
    fn lang_data(&self, lang: &str) -> Option<&HashMap<String, serde_yaml::Value>> {
        if let Some(data) = self.translations.get(lang) {
            return Some(data);
        }

        let base = lang.split(['-', '_']).next().unwrap_or(lang).to_lowercase();
        let mut candidates: Vec<_> = self
            .translations
            .iter()
            .filter(|(code, _)| {
                code.split(['-', '_']).next().map(|c| c.to_lowercase()) == Some(base.clone())
            })
            .collect();
        candidates.sort_by(|a, b| a.0.cmp(b.0));
        candidates.into_iter().next().map(|(_, data)| data)
    }
}

/// Get a nested value from a YAML map using dot notation
fn get_nested_value<'a>(
    data: &'a HashMap<String, serde_yaml::Value>,
    key: &str,
) -> Option<&'a serde_yaml::Value> {
    let parts: Vec<&str> = key.split('.').collect();
    let mut current: Option<&serde_yaml::Value> = data.get(parts[0]);

    for part in &parts[1..] {
        match current {
            Some(serde_yaml::Value::Mapping(map)) => {
                current = map.get(serde_yaml::Value::String(part.to_string()));
            }
            _ => return None,
        }
    }

    current
}

/// Convert a YAML value to a string
fn yaml_value_to_string(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => String::new(),
        _ => format!("{:?}", value),
    }
}

/// Convert JSON value to YAML HashMap
fn convert_json_to_yaml(json: serde_json::Value) -> HashMap<String, serde_yaml::Value> {
    let mut result = HashMap::new();

    if let serde_json::Value::Object(obj) = json {
        for (key, value) in obj {
            result.insert(key, json_value_to_yaml(value));
        }
    }

    result
}

fn json_value_to_yaml(json: serde_json::Value) -> serde_yaml::Value {
    match json {
        serde_json::Value::Null => serde_yaml::Value::Null,
        serde_json::Value::Bool(b) => serde_yaml::Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                serde_yaml::Value::Number(i.into())
            } else if let Some(f) = n.as_f64() {
                serde_yaml::Value::Number(serde_yaml::Number::from(f))
            } else {
                serde_yaml::Value::Null
            }
        }
        serde_json::Value::String(s) => serde_yaml::Value::String(s),
        serde_json::Value::Array(arr) => {
            serde_yaml::Value::Sequence(arr.into_iter().map(json_value_to_yaml).collect())
        }
        serde_json::Value::Object(obj) => {
            let mut map = serde_yaml::Mapping::new();
            for (k, v) in obj {
                map.insert(serde_yaml::Value::String(k), json_value_to_yaml(v));
            }
            serde_yaml::Value::Mapping(map)
        }
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new("pt-BR")
    }
}
