//! Type definitions of a low-level SQL string representation.
//!
//! Fragments are assembled with named placeholders (`:txt_nome`) so their names
//! are stable across calls. Postgres clients bind positionally, so a statement
//! is rendered into `$1..$n` form with the parameters in matching order.

use super::bindings::{BindValue, Bindings};
use std::collections::HashMap;

/// A statement ready to be handed to the database client.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SQL {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl SQL {
    pub fn new() -> SQL {
        SQL {
            sql: String::new(),
            params: vec![],
        }
    }

    /// Append a positional parameter and bind its value.
    pub fn append_param(&mut self, param: BindValue) {
        self.params.push(param);
        self.sql.push_str(&format!("${}", self.params.len()));
    }

    /// Render a statement written with named placeholders.
    ///
    /// Each bound `:name` is replaced by `$n`, numbered by first appearance; a name used twice
    /// reuses its number. Names without a binding, `::type` casts and anything inside single
    /// quoted literals are copied verbatim.
    pub fn from_named(text: &str, bindings: &Bindings) -> SQL {
        let mut rendered = SQL::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let chars: Vec<char> = text.chars().collect();
        let mut in_literal = false;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                in_literal = !in_literal;
            }
            let starts_placeholder = !in_literal
                && c == ':'
                && (i == 0 || chars[i - 1] != ':')
                && chars.get(i + 1).is_some_and(|n| *n == '_' || n.is_ascii_alphabetic());
            if !starts_placeholder {
                rendered.sql.push(c);
                i += 1;
                continue;
            }

            let end = chars[i + 1..]
                .iter()
                .position(|n| !(n.is_ascii_alphanumeric() || *n == '_'))
                .map_or(chars.len(), |offset| i + 1 + offset);
            let name: String = chars[i + 1..end].iter().collect();

            match (positions.get(&name), bindings.get(&name)) {
                (Some(position), _) => rendered.sql.push_str(&format!("${position}")),
                (None, Some(value)) => {
                    rendered.append_param(value.clone());
                    positions.insert(name, rendered.params.len());
                }
                (None, None) => {
                    rendered.sql.push(':');
                    rendered.sql.push_str(&name);
                }
            }
            i = end;
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings() -> Bindings {
        let mut bindings = Bindings::new();
        bindings.bind("txt_nome", BindValue::Text("%ana%".into()));
        bindings.bind("limit", BindValue::Integer(10));
        bindings
    }

    #[test]
    fn renders_named_placeholders_positionally() {
        let rendered = SQL::from_named(
            "SELECT * FROM auth.usuarios WHERE txt_nome ILIKE :txt_nome limit  :limit",
            &bindings(),
        );
        assert_eq!(
            rendered.params,
            vec![BindValue::Text("%ana%".into()), BindValue::Integer(10)]
        );
        insta::assert_snapshot!(rendered.sql, @"SELECT * FROM auth.usuarios WHERE txt_nome ILIKE $1 limit  $2");
    }

    #[test]
    fn numbers_follow_first_appearance_and_are_reused() {
        let rendered = SQL::from_named(":limit, :txt_nome, :limit", &bindings());
        assert_eq!(rendered.sql, "$1, $2, $1");
        assert_eq!(rendered.params.len(), 2);
        assert_eq!(rendered.params[0], BindValue::Integer(10));
    }

    #[test]
    fn leaves_casts_literals_and_unknown_names_alone() {
        let rendered = SQL::from_named(
            "SELECT ':txt_nome', now()::date, :unknown, :txt_nome",
            &bindings(),
        );
        assert_eq!(rendered.sql, "SELECT ':txt_nome', now()::date, :unknown, $1");
        assert_eq!(rendered.params, vec![BindValue::Text("%ana%".into())]);
    }

    #[test]
    fn rendered_statements_format_cleanly() {
        let rendered = SQL::from_named(
            "SELECT * FROM auth.grupos WHERE txt_nome ILIKE :txt_nome",
            &bindings(),
        );
        let pretty = sqlformat::format(
            &rendered.sql,
            &sqlformat::QueryParams::None,
            sqlformat::FormatOptions::default(),
        );
        assert!(pretty.contains("$1"));
        assert!(pretty.starts_with("SELECT"));
    }
}
