mod common;

use query_engine_sql::sql::bindings::BindValue;
use similar_asserts::assert_eq;

async fn check_parametrization(testname: &str) {
    let result = common::test_parametrization(testname).await.unwrap();
    let actual = serde_json::to_value(&result).unwrap();
    assert_eq!(actual, common::expected_result(testname).unwrap());
}

async fn check_rendering(testname: &str) {
    let rendered = common::test_rendering(testname).await.unwrap();
    assert_eq!(rendered.sql, common::expected_sql(testname).unwrap());
}

mod parametrization {
    use super::check_parametrization;

    #[tokio::test]
    async fn mixed_filters() {
        check_parametrization("mixed_filters").await;
    }

    #[tokio::test]
    async fn order_by_injection() {
        check_parametrization("order_by_injection").await;
    }

    #[tokio::test]
    async fn configured_conventions() {
        check_parametrization("configured_conventions").await;
    }
}

mod rendering {
    use super::check_rendering;

    #[tokio::test]
    async fn mixed_filters() {
        check_rendering("mixed_filters").await;
    }

    #[tokio::test]
    async fn order_by_injection() {
        check_rendering("order_by_injection").await;
    }
}

#[tokio::test]
async fn rendered_parameters_follow_placeholder_order() {
    let rendered = common::test_rendering("mixed_filters").await.unwrap();
    assert_eq!(
        rendered.params,
        vec![
            BindValue::Text("%ana%".into()),
            BindValue::Boolean(true),
            BindValue::Integer(1),
            BindValue::Integer(2),
            BindValue::Integer(3),
            BindValue::Integer(5),
        ]
    );

    let pretty = sqlformat::format(
        &rendered.sql,
        &sqlformat::QueryParams::None,
        sqlformat::FormatOptions::default(),
    );
    assert!(!pretty.contains(':'));

    insta::assert_snapshot!(rendered.sql, @"SELECT * FROM auth.usuarios WHERE txt_nome ILIKE $1 AND flg_ativo = $2 AND id IN ($3, $4, $5) AND locatario_id = $6");
}
