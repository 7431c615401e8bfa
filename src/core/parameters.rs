//! Plugin parameter parsing
//!
//! protoc hands the plugin a single parameter string, taken from the
//! `--tmpl_out=<params>:<dir>` (or `--tmpl_opt`) flags. The string is a
//! comma-separated list of `key` or `key=value` tokens.

use std::collections::BTreeMap;

/// Parsed plugin parameters with case-sensitive keys.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parameters {
    values: BTreeMap<String, String>,
}

impl Parameters {
    /// Parse a raw parameter string.
    ///
    /// Whitespace around keys and values is trimmed, a key without `=` maps to
    /// the empty string, and empty tokens are skipped. Everything after the
    /// first `=` belongs to the value.
    ///
    /// # Examples
    /// ```
    /// use protoc_gen_tmpl::core::parameters::Parameters;
    ///
    /// let params = Parameters::parse("conf=gen.json, root = /src ,partial");
    /// assert_eq!(params.get("conf"), Some("gen.json"));
    /// assert_eq!(params.get("root"), Some("/src"));
    /// assert_eq!(params.get("partial"), Some(""));
    /// assert_eq!(params.get("missing"), None);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let values = raw
            .split(',')
            .filter_map(|token| {
                let (key, value) = match token.split_once('=') {
                    Some((key, value)) => (key.trim(), value.trim()),
                    None => (token.trim(), ""),
                };
                (!key.is_empty()).then(|| (key.to_string(), value.to_string()))
            })
            .collect();
        Self { values }
    }

    /// Get the value for `key`, if the key was present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Interpret `key` as a flag: present with an empty value or a truthy value.
    ///
    /// Returns `None` when the key is absent.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key)
            .map(|value| !matches!(value.to_ascii_lowercase().as_str(), "false" | "0" | "no" | "off"))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
