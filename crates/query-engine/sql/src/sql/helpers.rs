//! Helpers for building SQL fragments in certain shapes and patterns.
//!
//! Column names reach these helpers already checked by [`is_identifier`]; values
//! never do, they are always referenced through a placeholder.

use super::bindings::Placeholder;
use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .expect("identifier pattern is valid")
});

/// Whether a name can be spliced into SQL text as a (possibly table qualified) column.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

// Predicates //

/// `<column> = :p`
pub fn equals(column: &str, placeholder: &Placeholder) -> String {
    format!("{column} = {placeholder}")
}

/// `<column> ILIKE :p`
pub fn case_insensitive_like(column: &str, placeholder: &Placeholder) -> String {
    format!("{column} ILIKE {placeholder}")
}

/// `<column> IN (:p_0, :p_1, ...)`. An empty list matches nothing.
pub fn in_list(column: &str, placeholders: &[Placeholder]) -> String {
    if placeholders.is_empty() {
        return false_predicate();
    }
    let list = placeholders
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{column} IN ({list})")
}

/// A predicate no row satisfies.
pub fn false_predicate() -> String {
    "FALSE".to_string()
}

/// Wrap free text for a partial match.
pub fn contains_pattern(text: &str) -> String {
    format!("%{text}%")
}

// Options //

/// `order_by` becomes `order by`.
pub fn sql_keyword(key: &str) -> String {
    key.replace('_', " ")
}

/// ` <keyword> <expression>`; the expression must have been screened by the guard.
pub fn order_by_fragment(key: &str, expression: &str) -> String {
    format!(" {} {}", sql_keyword(key), expression.trim())
}

/// ` limit  :limit` and ` offset  :offset`.
pub fn paging_fragment(key: &str, placeholder: &Placeholder) -> String {
    format!(" {}  {placeholder}", sql_keyword(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("txt_nome"));
        assert!(is_identifier("u.locatario_id"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("a.b.c"));
        assert!(!is_identifier("nome; drop table x"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn predicates() {
        let p = Placeholder::sanitize("txt_nome");
        assert_eq!(equals("txt_nome", &p), "txt_nome = :txt_nome");
        assert_eq!(case_insensitive_like("txt_nome", &p), "txt_nome ILIKE :txt_nome");
        assert_eq!(contains_pattern("ana"), "%ana%");

        let list = ["ids_0", "ids_1"].map(Placeholder::sanitize);
        assert_eq!(in_list("id", &list), "id IN (:ids_0, :ids_1)");
        assert_eq!(in_list("id", &[]), "FALSE");
    }

    #[test]
    fn options() {
        assert_eq!(
            order_by_fragment("order_by", " txt_nome desc "),
            " order by txt_nome desc"
        );
        assert_eq!(
            paging_fragment("limit", &Placeholder::sanitize("limit")),
            " limit  :limit"
        );
    }
}
