use std::path::Path;

use query_engine_sql::sql::string::SQL;
use query_engine_translation::translation::{FilterMap, ParametrizationResult, Parametrizer};
use tests_common::goldenfiles;

/// Parametrize the filters of a test case.
///
/// A `configuration.json` in the test case directory replaces the default configuration.
pub async fn test_parametrization(testname: &str) -> anyhow::Result<ParametrizationResult> {
    tests_common::init_tracing();
    let directory = goldenfiles::directory(testname);
    let parametrizer = parametrizer_for(&directory).await?;
    let filters: FilterMap = goldenfiles::read_json(&directory, "filters.json")?;
    Ok(parametrizer.parametrize(&filters))
}

/// Parametrize the filters of a test case and complete its `base.sql` with them.
pub async fn test_rendering(testname: &str) -> anyhow::Result<SQL> {
    let directory = goldenfiles::directory(testname);
    let base = goldenfiles::read_text(&directory, "base.sql")?;
    let result = test_parametrization(testname).await?;
    Ok(result.render(&base))
}

/// The expected serialized result of a test case.
pub fn expected_result(testname: &str) -> anyhow::Result<serde_json::Value> {
    goldenfiles::read_json(&goldenfiles::directory(testname), "expected.json")
}

pub fn expected_sql(testname: &str) -> anyhow::Result<String> {
    let sql = goldenfiles::read_text(&goldenfiles::directory(testname), "expected.sql")?;
    Ok(sql.trim_end().to_string())
}

async fn parametrizer_for(directory: &Path) -> anyhow::Result<Parametrizer> {
    if !directory.join("configuration.json").exists() {
        return Ok(Parametrizer::default());
    }
    let parsed = rbac_admin_configuration::parse_configuration(directory).await?;
    let configuration = rbac_admin_configuration::make_runtime_configuration(parsed)?;
    Ok(Parametrizer::from_configuration(&configuration))
}
