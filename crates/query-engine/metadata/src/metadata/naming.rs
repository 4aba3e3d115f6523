//! Column type inference from naming conventions.
//!
//! The administrative schema encodes column semantics in the identifier itself:
//! `txt_nome_usuario` is free text, `flg_ativo_usuario` is a boolean flag and
//! `locatario_id` references another row. Both the filter parametrizer and the
//! error translator read names through this classifier.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The markers used to recognise column kinds.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NamingConventions {
    /// Prefix of human-readable text columns.
    #[serde(default = "default_text_prefix")]
    pub text_prefix: String,
    /// Prefix of boolean flag columns.
    #[serde(default = "default_flag_prefix")]
    pub flag_prefix: String,
    /// Suffix turning a column name into a list filter, e.g. `ids`.
    #[serde(default = "default_plural_suffix")]
    pub plural_suffix: String,
    /// Marker of identifier columns, matched as `id`, `id_*` or `*_id`.
    #[serde(default = "default_identifier_marker")]
    pub identifier_marker: String,
}

fn default_text_prefix() -> String {
    "txt_".to_string()
}

fn default_flag_prefix() -> String {
    "flg_".to_string()
}

fn default_plural_suffix() -> String {
    "s".to_string()
}

fn default_identifier_marker() -> String {
    "id".to_string()
}

impl Default for NamingConventions {
    fn default() -> Self {
        NamingConventions {
            text_prefix: default_text_prefix(),
            flag_prefix: default_flag_prefix(),
            plural_suffix: default_plural_suffix(),
            identifier_marker: default_identifier_marker(),
        }
    }
}

/// What a column name says about its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Flag,
    Identifier,
    Plain,
}

/// The type a bound value should be coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindType {
    Text,
    Boolean,
    Integer,
    /// Bind whatever the caller supplied.
    Untyped,
}

impl ColumnKind {
    pub fn bind_type(self) -> BindType {
        match self {
            ColumnKind::Text => BindType::Text,
            ColumnKind::Flag => BindType::Boolean,
            ColumnKind::Identifier => BindType::Integer,
            ColumnKind::Plain => BindType::Untyped,
        }
    }
}

impl NamingConventions {
    /// Classify a column name. Prefix markers take precedence over the identifier marker.
    pub fn classify(&self, name: &str) -> ColumnKind {
        if self.is_text(name) {
            ColumnKind::Text
        } else if self.is_flag(name) {
            ColumnKind::Flag
        } else if self.is_identifier(name) {
            ColumnKind::Identifier
        } else {
            ColumnKind::Plain
        }
    }

    pub fn is_text(&self, name: &str) -> bool {
        has_marker_prefix(name, &self.text_prefix)
    }

    pub fn is_flag(&self, name: &str) -> bool {
        has_marker_prefix(name, &self.flag_prefix)
    }

    /// `id`, `id_usuario` and `locatario_id` are identifiers; `idade` is not.
    pub fn is_identifier(&self, name: &str) -> bool {
        let marker = self.identifier_marker.as_str();
        if marker.is_empty() {
            return false;
        }
        let name = unqualified(name).to_ascii_lowercase();
        let marker = marker.to_ascii_lowercase();
        if name == marker {
            return true;
        }
        let leading = name
            .strip_prefix(marker.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
            .is_some_and(|rest| !rest.is_empty());
        let trailing = name
            .strip_suffix(marker.as_str())
            .and_then(|rest| rest.strip_suffix('_'))
            .is_some_and(|rest| !rest.is_empty());
        leading || trailing
    }

    /// The column a list filter targets: `ids` becomes `id`.
    ///
    /// Returns `None` when the key does not carry the plural suffix or nothing is left after
    /// stripping it.
    pub fn singular<'a>(&self, key: &'a str) -> Option<&'a str> {
        if self.plural_suffix.is_empty() {
            return None;
        }
        key.strip_suffix(self.plural_suffix.as_str())
            .filter(|column| !column.is_empty())
    }

    /// `txt_email_usuario` becomes `email_usuario`. Names without the prefix are returned as is.
    pub fn strip_text_prefix<'a>(&self, name: &'a str) -> &'a str {
        if self.text_prefix.is_empty() {
            return name;
        }
        name.strip_prefix(self.text_prefix.as_str()).unwrap_or(name)
    }

    /// The leading word of a column once the text prefix is gone: `txt_email_usuario` becomes
    /// `email`.
    pub fn semantic_stem<'a>(&self, name: &'a str) -> &'a str {
        let stripped = self.strip_text_prefix(name);
        stripped.split('_').next().unwrap_or(stripped)
    }
}

fn has_marker_prefix(name: &str, prefix: &str) -> bool {
    !prefix.is_empty() && unqualified(name).starts_with(prefix)
}

/// `u.txt_nome` is classified by `txt_nome`.
fn unqualified(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conventions() -> NamingConventions {
        NamingConventions::default()
    }

    #[test]
    fn classifies_by_prefix_before_identifier_marker() {
        let naming = conventions();
        assert_eq!(naming.classify("txt_nome"), ColumnKind::Text);
        assert_eq!(naming.classify("flg_ativo"), ColumnKind::Flag);
        assert_eq!(naming.classify("txt_id"), ColumnKind::Text);
        assert_eq!(naming.classify("locatario_id"), ColumnKind::Identifier);
        assert_eq!(naming.classify("id_usuario"), ColumnKind::Identifier);
        assert_eq!(naming.classify("id"), ColumnKind::Identifier);
        assert_eq!(naming.classify("dat_criado_em"), ColumnKind::Plain);
    }

    #[test]
    fn identifier_marker_needs_a_word_boundary() {
        let naming = conventions();
        assert!(!naming.is_identifier("idade"));
        assert!(!naming.is_identifier("valid"));
        assert!(!naming.is_identifier("_id"));
        assert!(naming.is_identifier("u.id_usuario"));
    }

    #[test]
    fn bind_types_follow_kinds() {
        assert_eq!(ColumnKind::Text.bind_type(), BindType::Text);
        assert_eq!(ColumnKind::Flag.bind_type(), BindType::Boolean);
        assert_eq!(ColumnKind::Identifier.bind_type(), BindType::Integer);
        assert_eq!(ColumnKind::Plain.bind_type(), BindType::Untyped);
    }

    #[test]
    fn singular_strips_the_plural_suffix() {
        let naming = conventions();
        assert_eq!(naming.singular("ids"), Some("id"));
        assert_eq!(naming.singular("grupo_ids"), Some("grupo_id"));
        assert_eq!(naming.singular("s"), None);
        assert_eq!(naming.singular("limit"), None);
    }

    #[test]
    fn stems_drop_the_text_prefix() {
        let naming = conventions();
        assert_eq!(naming.strip_text_prefix("txt_email_usuario"), "email_usuario");
        assert_eq!(naming.strip_text_prefix("locatario_id"), "locatario_id");
        assert_eq!(naming.semantic_stem("txt_email_usuario"), "email");
        assert_eq!(naming.semantic_stem("locatario_id"), "locatario");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: NamingConventions =
            serde_json::from_str(r#"{ "textPrefix": "str_" }"#).unwrap();
        assert_eq!(parsed.text_prefix, "str_");
        assert_eq!(parsed.flag_prefix, "flg_");
        assert_eq!(parsed.plural_suffix, "s");
        assert_eq!(parsed.identifier_marker, "id");
    }
}
