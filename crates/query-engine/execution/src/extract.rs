//! Pull structured facts out of driver detail text.
//!
//! Every extractor is a plain function returning `Some` when its pattern
//! matches. Callers hold ordered lists of extractors and take the first match,
//! so the order of a list decides which message wins on ambiguous text.

use regex::Regex;
use std::sync::LazyLock;

pub type Extractor<T> = fn(&str) -> Option<T>;

/// Run extractors in order and keep the first match.
pub fn first_match<T>(extractors: &[Extractor<T>], detail: &str) -> Option<T> {
    extractors.iter().find_map(|extract| extract(detail))
}

macro_rules! pattern {
    ($name:ident, $regex:literal) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($regex).expect(concat!(stringify!($name), " is valid")));
    };
}

pattern!(KEY_PAIRS, r"Key \(([^)]+)\)=\(([^)]+)\)");
pattern!(
    UNIQUE_CONSTRAINT,
    r#"(?i)duplicate key value violates unique constraint "([^"]+)""#
);
pattern!(NULL_VALUE_COLUMN, r#"(?i)null value in column "([^"]+)""#);
pattern!(ANY_COLUMN, r#"(?i)column "([^"]+)""#);
pattern!(SYNTAX_NEAR, r#"(?i)syntax error at or near "([^"]+)""#);
pattern!(MISSING_COLUMN, r#"(?i)column "([^"]+)" does not exist"#);
pattern!(QUERY_LINE, r"(?m)^LINE (\d+): (.*)$");
pattern!(
    INVALID_TEXT,
    r#"(?i)invalid input syntax for (?:type )?([^:]+): "([^"]*)""#
);

/// A column named in the detail text and the value the server printed for it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub column: String,
    pub value: Option<String>,
}

/// `Key (a, b)=(1, x)` becomes `[(a, 1), (b, x)]`. Columns and values are paired by position.
pub fn key_pairs(detail: &str) -> Option<Vec<KeyPair>> {
    let captures = KEY_PAIRS.captures(detail)?;
    let mut values = captures[2].split(',').map(str::trim);
    let pairs = captures[1]
        .split(',')
        .map(|column| KeyPair {
            column: column.trim().to_string(),
            value: values
                .next()
                .filter(|value| !value.is_empty())
                .map(ToString::to_string),
        })
        .collect();
    Some(pairs)
}

/// The first column of a `Key (...)=(...)` clause.
pub fn first_key_column(detail: &str) -> Option<String> {
    key_pairs(detail)?
        .into_iter()
        .next()
        .map(|pair| pair.column)
}

pub fn unique_constraint(detail: &str) -> Option<String> {
    capture(&UNIQUE_CONSTRAINT, detail)
}

pub fn null_value_column(detail: &str) -> Option<String> {
    capture(&NULL_VALUE_COLUMN, detail)
}

/// Any `column "..."` mention.
pub fn any_column(detail: &str) -> Option<String> {
    capture(&ANY_COLUMN, detail)
}

/// The token the parser stopped at.
pub fn syntax_near(detail: &str) -> Option<String> {
    capture(&SYNTAX_NEAR, detail)
}

pub fn missing_column(detail: &str) -> Option<String> {
    capture(&MISSING_COLUMN, detail)
}

/// The `LINE n: ...` echo of the statement Postgres adds to parse errors.
pub fn query_line(detail: &str) -> Option<(u32, String)> {
    let captures = QUERY_LINE.captures(detail)?;
    let number = captures[1].parse().ok()?;
    Some((number, captures[2].trim_end().to_string()))
}

/// The target type and the literal that failed to parse.
pub fn invalid_text(detail: &str) -> Option<(String, String)> {
    let captures = INVALID_TEXT.captures(detail)?;
    Some((captures[1].trim().to_string(), captures[2].to_string()))
}

fn capture(regex: &Regex, detail: &str) -> Option<String> {
    regex
        .captures(detail)
        .map(|captures| captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_columns_with_values_in_order() {
        let pairs = key_pairs("Key (locatario_id, txt_email_usuario)=(1, joao@ex.com)").unwrap();
        assert_eq!(
            pairs,
            vec![
                KeyPair {
                    column: "locatario_id".to_string(),
                    value: Some("1".to_string()),
                },
                KeyPair {
                    column: "txt_email_usuario".to_string(),
                    value: Some("joao@ex.com".to_string()),
                },
            ]
        );
    }

    #[test]
    fn missing_values_stay_empty() {
        let pairs = key_pairs("Key (a, b)=(1)").unwrap();
        assert_eq!(pairs[1].value, None);
        assert_eq!(key_pairs("no key clause here"), None);
    }

    #[test]
    fn first_matching_extractor_wins() {
        let columns: [Extractor<String>; 2] = [null_value_column, any_column];
        assert_eq!(
            first_match(
                &columns,
                "null value in column \"txt_nome\" of relation \"usuarios\" violates not-null constraint"
            ),
            Some("txt_nome".to_string())
        );
        assert_eq!(
            first_match(&columns, "column \"txt_apelido\" is of type integer"),
            Some("txt_apelido".to_string())
        );
        assert_eq!(first_match(&columns, ""), None);
    }

    #[test]
    fn query_lines_and_literals() {
        let detail = "column \"txt_apelido\" does not exist\nLINE 1: SELECT txt_apelido FROM auth.usuarios\n               ^";
        assert_eq!(missing_column(detail), Some("txt_apelido".to_string()));
        assert_eq!(
            query_line(detail),
            Some((1, "SELECT txt_apelido FROM auth.usuarios".to_string()))
        );
        assert_eq!(
            invalid_text("invalid input syntax for type integer: \"abc\""),
            Some(("integer".to_string(), "abc".to_string()))
        );
        assert_eq!(
            invalid_text("invalid input syntax for integer: \"\""),
            Some(("integer".to_string(), String::new()))
        );
    }

    #[test]
    fn syntax_tokens() {
        assert_eq!(
            syntax_near("syntax error at or near \"order\""),
            Some("order".to_string())
        );
        assert_eq!(
            unique_constraint("duplicate key value violates unique constraint \"uk_email\""),
            Some("uk_email".to_string())
        );
    }
}
