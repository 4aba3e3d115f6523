//! Named placeholders and the values bound to them.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A value bound to a placeholder at execution time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Arrays and objects that were bound without a more specific type.
    Json(serde_json::Value),
}

impl From<&serde_json::Value> for BindValue {
    /// Keep the caller's value with its JSON type.
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => BindValue::Null,
            serde_json::Value::Bool(b) => BindValue::Boolean(*b),
            serde_json::Value::Number(num) => match num.as_i64() {
                Some(int) => BindValue::Integer(int),
                None => num
                    .as_f64()
                    .map_or_else(|| BindValue::Text(num.to_string()), BindValue::Float),
            },
            serde_json::Value::String(s) => BindValue::Text(s.clone()),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                BindValue::Json(value.clone())
            }
        }
    }
}

/// A placeholder name. Only contains `[A-Za-z0-9_]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Placeholder(String);

impl Placeholder {
    /// Derive a placeholder name from arbitrary text, replacing every character outside
    /// `[A-Za-z0-9_]` with `_`.
    pub fn sanitize(raw: &str) -> Placeholder {
        let name: String = raw
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if name.is_empty() {
            Placeholder("p".to_string())
        } else {
            Placeholder(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

/// Placeholders in the order they were bound, each with exactly one value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bindings(IndexMap<Placeholder, BindValue>);

impl Bindings {
    pub fn new() -> Bindings {
        Bindings(IndexMap::new())
    }

    /// Bind a value under a name derived from `base` and return the placeholder used.
    ///
    /// When the sanitized name is already bound a numeric suffix is appended (`_2`, `_3`, ...),
    /// so the same input always yields the same names.
    pub fn bind(&mut self, base: &str, value: BindValue) -> Placeholder {
        let sanitized = Placeholder::sanitize(base);
        let placeholder = if self.0.contains_key(&sanitized) {
            (2..)
                .map(|n| Placeholder(format!("{}_{n}", sanitized.name())))
                .find(|candidate| !self.0.contains_key(candidate))
                .unwrap_or(sanitized)
        } else {
            sanitized
        };
        self.0.insert(placeholder.clone(), value);
        placeholder
    }

    pub fn get(&self, name: &str) -> Option<&BindValue> {
        self.0.get(&Placeholder(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Placeholder, &BindValue)> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(Placeholder::name)
    }
}
