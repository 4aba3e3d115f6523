//! Parametrize untyped filter maps.
//!
//! Each entry of the map is matched against an ordered rule table; the first
//! rule that matches decides how the entry becomes SQL. The precedence is:
//!
//! 1. a plural key with a list value becomes an `IN (...)` filter on the singular column,
//! 2. a free-text key becomes a case-insensitive partial match,
//! 3. a flag key becomes a boolean equality,
//! 4. `limit` and `offset` become paging options,
//! 5. `order_by` becomes the ordering option, if the guard accepts it,
//! 6. anything else becomes an equality.
//!
//! Entries with a blank value, or whose key is not a plain column name, are
//! dropped before the table is consulted.

use indexmap::IndexMap;
use query_engine_metadata::metadata::{BindType, NamingConventions};
use query_engine_sql::sql::bindings::BindValue;
use query_engine_sql::sql::guard::{OrderByGuard, Verdict};
use query_engine_sql::sql::helpers;
use rbac_admin_configuration::{Configuration, OrderByPolicy};
use serde_json::Value;

use super::error::Error;
use super::result::ParametrizationResult;
use super::values;

/// Filters as received from the caller, in the order predicates should appear.
pub type FilterMap = IndexMap<String, Value>;

pub const ORDER_BY: &str = "order_by";
pub const LIMIT: &str = "limit";
pub const OFFSET: &str = "offset";

/// Turns filter maps into SQL fragments. Holds configuration only, so one instance can be shared
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct Parametrizer {
    conventions: NamingConventions,
    guard: OrderByGuard,
    order_by_policy: OrderByPolicy,
    max_limit: Option<u64>,
}

/// One filter entry under consideration.
struct Entry<'a> {
    key: &'a str,
    value: &'a Value,
}

/// Accumulated output while walking the filter map.
#[derive(Default)]
struct State {
    result: ParametrizationResult,
    rejected: Option<Error>,
}

struct Rule {
    matches: fn(&Parametrizer, &Entry) -> bool,
    apply: fn(&Parametrizer, &Entry, &mut State),
}

const RULES: [Rule; 6] = [
    Rule {
        matches: Parametrizer::is_list_filter,
        apply: Parametrizer::apply_list_filter,
    },
    Rule {
        matches: Parametrizer::is_text_filter,
        apply: Parametrizer::apply_text_filter,
    },
    Rule {
        matches: Parametrizer::is_flag_filter,
        apply: Parametrizer::apply_flag_filter,
    },
    Rule {
        matches: Parametrizer::is_paging_option,
        apply: Parametrizer::apply_paging_option,
    },
    Rule {
        matches: Parametrizer::is_order_by_option,
        apply: Parametrizer::apply_order_by_option,
    },
    Rule {
        matches: Parametrizer::is_any_filter,
        apply: Parametrizer::apply_equality,
    },
];

/// Parametrize with the default conventions. Never fails.
pub fn parametrize(filters: &FilterMap) -> ParametrizationResult {
    Parametrizer::default().parametrize(filters)
}

impl Parametrizer {
    pub fn new(conventions: NamingConventions) -> Parametrizer {
        Parametrizer {
            conventions,
            ..Parametrizer::default()
        }
    }

    pub fn from_configuration(configuration: &Configuration) -> Parametrizer {
        Parametrizer {
            conventions: configuration.conventions.clone(),
            guard: OrderByGuard {
                check_shape: configuration.order_by.check_shape,
            },
            order_by_policy: configuration.order_by.policy,
            max_limit: configuration.paging.max_limit,
        }
    }

    #[must_use]
    pub fn with_order_by_policy(mut self, policy: OrderByPolicy) -> Parametrizer {
        self.order_by_policy = policy;
        self
    }

    #[must_use]
    pub fn with_guard(mut self, guard: OrderByGuard) -> Parametrizer {
        self.guard = guard;
        self
    }

    #[must_use]
    pub fn with_max_limit(mut self, max_limit: Option<u64>) -> Parametrizer {
        self.max_limit = max_limit;
        self
    }

    /// Translate the filters. Never fails: an `order_by` the guard rejects is dropped even when
    /// the policy is `Reject`; use [`Parametrizer::try_parametrize`] to observe the rejection.
    pub fn parametrize(&self, filters: &FilterMap) -> ParametrizationResult {
        self.run(filters).result
    }

    /// Translate the filters, failing with [`Error::UnsafeOrderBy`] when the policy is `Reject`
    /// and the guard refuses the ordering expression.
    pub fn try_parametrize(&self, filters: &FilterMap) -> Result<ParametrizationResult, Error> {
        let state = self.run(filters);
        match state.rejected {
            Some(error) => Err(error),
            None => Ok(state.result),
        }
    }

    fn run(&self, filters: &FilterMap) -> State {
        let mut state = State::default();
        for (key, value) in filters {
            if values::is_blank(value) {
                continue;
            }
            if !helpers::is_identifier(key) {
                tracing::debug!(key, "dropping filter with a key that is not a column name");
                continue;
            }
            let entry = Entry { key, value };
            if let Some(rule) = RULES.iter().find(|rule| (rule.matches)(self, &entry)) {
                (rule.apply)(self, &entry, &mut state);
            }
        }
        state
    }

    // IN (...) //

    fn is_list_filter(&self, entry: &Entry) -> bool {
        entry.value.is_array() && self.conventions.singular(entry.key).is_some()
    }

    fn apply_list_filter(&self, entry: &Entry, state: &mut State) {
        let (Some(column), Some(elements)) =
            (self.conventions.singular(entry.key), entry.value.as_array())
        else {
            return;
        };
        let integers = self.conventions.is_identifier(column);

        let placeholders: Vec<_> = elements
            .iter()
            .enumerate()
            .filter(|(_, element)| !values::is_blank(element))
            .filter_map(|(position, element)| {
                let value = if integers {
                    BindValue::Integer(values::to_integer(element)?)
                } else {
                    BindValue::from(element)
                };
                Some(
                    state
                        .result
                        .bindings
                        .bind(&format!("{}_{position}", entry.key), value),
                )
            })
            .collect();

        state
            .result
            .predicates
            .push(helpers::in_list(column, &placeholders));
    }

    // Free text //

    fn is_text_filter(&self, entry: &Entry) -> bool {
        self.conventions.is_text(entry.key)
    }

    fn apply_text_filter(&self, entry: &Entry, state: &mut State) {
        let pattern = helpers::contains_pattern(&values::to_text(entry.value));
        let placeholder = state
            .result
            .bindings
            .bind(entry.key, BindValue::Text(pattern));
        state
            .result
            .predicates
            .push(helpers::case_insensitive_like(entry.key, &placeholder));
    }

    // Flags //

    fn is_flag_filter(&self, entry: &Entry) -> bool {
        self.conventions.is_flag(entry.key)
    }

    fn apply_flag_filter(&self, entry: &Entry, state: &mut State) {
        let value = BindValue::Boolean(values::to_boolean(entry.value));
        let placeholder = state.result.bindings.bind(entry.key, value);
        state
            .result
            .predicates
            .push(helpers::equals(entry.key, &placeholder));
    }

    // LIMIT / OFFSET //

    fn is_paging_option(&self, entry: &Entry) -> bool {
        entry.key == LIMIT || entry.key == OFFSET
    }

    fn apply_paging_option(&self, entry: &Entry, state: &mut State) {
        let Some(mut amount) = values::to_integer(entry.value).filter(|amount| *amount >= 0) else {
            tracing::debug!(
                key = entry.key,
                value = %entry.value,
                "dropping paging option that is not a non-negative integer"
            );
            return;
        };
        if entry.key == LIMIT {
            if let Some(max_limit) = self.max_limit {
                let max_limit = i64::try_from(max_limit).unwrap_or(i64::MAX);
                amount = amount.min(max_limit);
            }
        }

        let placeholder = state
            .result
            .bindings
            .bind(entry.key, BindValue::Integer(amount));
        let fragment = Some(helpers::paging_fragment(entry.key, &placeholder));
        if entry.key == LIMIT {
            state.result.options.limit = fragment;
        } else {
            state.result.options.offset = fragment;
        }
    }

    // ORDER BY //

    fn is_order_by_option(&self, entry: &Entry) -> bool {
        entry.key == ORDER_BY
    }

    fn apply_order_by_option(&self, entry: &Entry, state: &mut State) {
        let expression = values::to_text(entry.value);
        let reason = match self.guard.screen(&expression) {
            Verdict::Safe => {
                state.result.options.order_by =
                    Some(helpers::order_by_fragment(entry.key, &expression));
                return;
            }
            Verdict::Blacklisted(keyword) => format!("contains the keyword {keyword}"),
            Verdict::Malformed => "is not a list of columns and directions".to_string(),
        };

        match self.order_by_policy {
            OrderByPolicy::Ignore => {}
            OrderByPolicy::LogAndIgnore => {
                tracing::warn!(order_by = %expression, %reason, "dropping unsafe order_by");
            }
            OrderByPolicy::Reject => {
                tracing::warn!(order_by = %expression, %reason, "rejecting unsafe order_by");
                state.rejected = Some(Error::UnsafeOrderBy { expression, reason });
            }
        }
    }

    // Equality //

    fn is_any_filter(&self, _entry: &Entry) -> bool {
        true
    }

    fn apply_equality(&self, entry: &Entry, state: &mut State) {
        let value = self.typed_value(entry.key, entry.value);
        let placeholder = state.result.bindings.bind(entry.key, value);
        state
            .result
            .predicates
            .push(helpers::equals(entry.key, &placeholder));
    }

    /// Identifier columns are bound as integers when the value allows it; everything else keeps
    /// the caller's type.
    fn typed_value(&self, column: &str, value: &Value) -> BindValue {
        match self.conventions.classify(column).bind_type() {
            BindType::Integer => values::to_integer(value)
                .map_or_else(|| BindValue::from(value), BindValue::Integer),
            BindType::Text => BindValue::Text(values::to_text(value)),
            BindType::Boolean => BindValue::Boolean(values::to_boolean(value)),
            BindType::Untyped => BindValue::from(value),
        }
    }
}
