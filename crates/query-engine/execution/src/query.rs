//! Hand rendered statements to the `sqlx` client.

use query_engine_sql::sql::bindings::BindValue;
use query_engine_sql::sql::string::SQL;
use sqlx::postgres::PgArguments;
use sqlx::Postgres;

/// Create a SQLx query from a rendered statement, binding each parameter with its natural
/// Postgres type. The caller executes it on a connection it owns.
pub fn build_query_with_params(query: &SQL) -> sqlx::query::Query<'_, Postgres, PgArguments> {
    let sqlx_query = sqlx::query(query.sql.as_str());

    query
        .params
        .iter()
        .fold(sqlx_query, |sqlx_query, param| match param {
            BindValue::Null => sqlx_query.bind(None::<String>),
            BindValue::Boolean(b) => sqlx_query.bind(*b),
            BindValue::Integer(i) => sqlx_query.bind(*i),
            BindValue::Float(f) => sqlx_query.bind(*f),
            BindValue::Text(s) => sqlx_query.bind(s.as_str()),
            BindValue::Json(v) => sqlx_query.bind(v),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Execute;

    #[test]
    fn keeps_the_rendered_text() {
        let rendered = SQL {
            sql: "SELECT * FROM auth.usuarios WHERE txt_nome ILIKE $1 AND flg_ativo = $2 limit  $3"
                .to_string(),
            params: vec![
                BindValue::Text("%ana%".to_string()),
                BindValue::Boolean(true),
                BindValue::Integer(10),
            ],
        };
        let mut query = build_query_with_params(&rendered);
        assert_eq!(query.sql(), rendered.sql);
        assert!(query.take_arguments().is_some());
    }
}
