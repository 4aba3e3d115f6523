//! The output of parametrization and the ways a caller assembles it into a statement.

use query_engine_sql::sql::bindings::Bindings;
use query_engine_sql::sql::string::SQL;
use serde::Serialize;

/// Fragments appended after the `WHERE` clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryOptions {
    #[serde(rename = "orderByFragment", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(rename = "limitFragment", skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(rename = "offsetFragment", skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

impl QueryOptions {
    /// The options in the order SQL requires them.
    pub fn tail(&self) -> String {
        [&self.order_by, &self.limit, &self.offset]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

/// Predicates, the values they reference, and the trailing options.
///
/// Every placeholder used in `predicates` or `options` has exactly one entry in `bindings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParametrizationResult {
    pub predicates: Vec<String>,
    pub bindings: Bindings,
    pub options: QueryOptions,
}

impl ParametrizationResult {
    /// The predicates joined with `AND`, if there are any.
    pub fn where_clause(&self) -> Option<String> {
        if self.predicates.is_empty() {
            None
        } else {
            Some(self.predicates.join(" AND "))
        }
    }

    /// Complete `base` with the filters, still using named placeholders.
    ///
    /// Only the outermost query of `base` is considered: when it already has a `WHERE` the
    /// predicates are added with `AND`, and they are placed before a trailing `GROUP BY`,
    /// `HAVING`, `ORDER BY`, `LIMIT` or `OFFSET`. The options always go at the end.
    pub fn statement(&self, base: &str) -> String {
        let base = base.trim_end();
        let mut statement = String::with_capacity(base.len());
        match self.where_clause() {
            Some(clause) => {
                let outline = Outline::of(base);
                let split = outline.trailing_start.unwrap_or(base.len());
                let (head, trailing) = base.split_at(split);
                statement.push_str(head.trim_end());
                statement.push_str(if outline.has_where { " AND " } else { " WHERE " });
                statement.push_str(&clause);
                if !trailing.is_empty() {
                    statement.push(' ');
                    statement.push_str(trailing);
                }
            }
            None => statement.push_str(base),
        }
        statement.push_str(&self.options.tail());
        statement
    }

    /// Complete `base` and render it with positional parameters for the database client.
    pub fn render(&self, base: &str) -> SQL {
        SQL::from_named(&self.statement(base), &self.bindings)
    }
}

/// The clauses of the outermost query of a statement that matter when adding predicates.
#[derive(Debug, Default, PartialEq, Eq)]
struct Outline {
    has_where: bool,
    /// Byte offset of the first clause that must follow `WHERE`.
    trailing_start: Option<usize>,
}

impl Outline {
    /// Scan the words outside parentheses, quoted identifiers and string literals.
    fn of(sql: &str) -> Outline {
        let mut words: Vec<(usize, &str)> = vec![];
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        let mut word_start: Option<usize> = None;

        for (index, c) in sql.char_indices() {
            let in_word = quote.is_none() && (c.is_alphanumeric() || c == '_');
            if !in_word {
                if let Some(start) = word_start.take() {
                    if depth == 0 {
                        words.push((start, &sql[start..index]));
                    }
                }
            }
            match (quote, c) {
                (Some(open), c) if c == open => quote = None,
                (Some(_), _) => {}
                (None, '\'' | '"') => quote = Some(c),
                (None, '(') => depth += 1,
                (None, ')') => depth = depth.saturating_sub(1),
                (None, _) if in_word && word_start.is_none() => word_start = Some(index),
                (None, _) => {}
            }
        }
        if let Some(start) = word_start {
            if depth == 0 {
                words.push((start, &sql[start..]));
            }
        }

        let mut outline = Outline::default();
        for (position, (offset, word)) in words.iter().enumerate() {
            let next_is_by = words
                .get(position + 1)
                .is_some_and(|(_, next)| next.eq_ignore_ascii_case("by"));
            let starts_trailing = match word.to_ascii_lowercase().as_str() {
                "where" => {
                    outline.has_where = true;
                    false
                }
                "group" | "order" => next_is_by,
                "having" | "limit" | "offset" => true,
                _ => false,
            };
            if starts_trailing {
                outline.trailing_start = Some(*offset);
                break;
            }
        }
        outline
    }
}
