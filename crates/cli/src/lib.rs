//! The commands behind the `rbac-admin` binary.
//!
//! Every command returns its output as a string so it can be tested without a
//! process boundary.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Subcommand;

use query_engine_execution::{DriverFailure, ErrorContext, Translator};
use query_engine_translation::translation::{FilterMap, Parametrizer};
use rbac_admin_configuration::{
    make_runtime_configuration, parse_configuration, version1, write_parsed_configuration,
    Configuration, OrderByPolicy, ParsedConfiguration,
};

/// Where the command runs.
#[derive(Debug, Clone)]
pub struct Context {
    /// The configuration directory.
    pub context_path: PathBuf,
}

/// The various commands supported by the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write a default configuration and its JSON schema into the configuration directory.
    Initialize,
    /// Translate a JSON filter map into predicates, bindings and options.
    Parametrize {
        /// A JSON object of filters.
        filters: String,
        /// Fail on an unsafe order_by instead of following the configured policy.
        #[arg(long)]
        strict: bool,
    },
    /// Complete a base statement with a JSON filter map and render it positionally.
    Render {
        /// The statement to complete, e.g. `SELECT * FROM auth.usuarios`.
        #[arg(long)]
        base: String,
        /// A JSON object of filters.
        filters: String,
    },
    /// Translate a database failure into the error record clients receive.
    Translate {
        /// The SQLSTATE reported by the driver.
        #[arg(long)]
        state: String,
        /// The driver's detail text.
        #[arg(long, default_value = "")]
        detail: String,
        /// A JSON object of request data used to refine the message.
        #[arg(long)]
        context: Option<String>,
    },
    /// Print the JSON schema of the configuration file.
    PrintSchema,
}

/// Run a command in a given context.
pub async fn run(command: Command, context: &Context) -> anyhow::Result<String> {
    match command {
        Command::Initialize => initialize(context).await,
        Command::Parametrize { filters, strict } => parametrize(context, &filters, strict).await,
        Command::Render { base, filters } => render(context, &base, &filters).await,
        Command::Translate {
            state,
            detail,
            context: request_context,
        } => translate(context, state, detail, request_context.as_deref()).await,
        Command::PrintSchema => print_schema(),
    }
}

async fn initialize(context: &Context) -> anyhow::Result<String> {
    let configuration_file = context.context_path.join(version1::CONFIGURATION_FILENAME);
    if configuration_file.exists() {
        anyhow::bail!(
            "{} already exists; refusing to overwrite it",
            configuration_file.display()
        );
    }
    write_parsed_configuration(ParsedConfiguration::initial(), &context.context_path).await?;
    tracing::info!(path = %context.context_path.display(), "wrote configuration");
    Ok(format!("wrote {}", configuration_file.display()))
}

async fn parametrize(context: &Context, filters: &str, strict: bool) -> anyhow::Result<String> {
    let configuration = load_configuration(context).await?;
    let filters = parse_filters(filters)?;
    let mut parametrizer = Parametrizer::from_configuration(&configuration);
    if strict {
        parametrizer = parametrizer.with_order_by_policy(OrderByPolicy::Reject);
    }
    let result = parametrizer.try_parametrize(&filters)?;
    Ok(serde_json::to_string_pretty(&result)?)
}

async fn render(context: &Context, base: &str, filters: &str) -> anyhow::Result<String> {
    let configuration = load_configuration(context).await?;
    let filters = parse_filters(filters)?;
    let rendered = Parametrizer::from_configuration(&configuration)
        .parametrize(&filters)
        .render(base);
    let params = rendered
        .params
        .iter()
        .enumerate()
        .map(|(i, param)| Ok(format!("${} = {}", i + 1, serde_json::to_string(param)?)))
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    let mut output = rendered.sql;
    for param in params {
        output.push('\n');
        output.push_str(&param);
    }
    Ok(output)
}

async fn translate(
    context: &Context,
    state: String,
    detail: String,
    request_context: Option<&str>,
) -> anyhow::Result<String> {
    let configuration = load_configuration(context).await?;
    let request_context: ErrorContext = match request_context {
        Some(json) => serde_json::from_str(json).context("--context must be a JSON object")?,
        None => ErrorContext::new(),
    };
    let translated = Translator::new(configuration.conventions)
        .translate(&DriverFailure::new(state, detail), &request_context);
    Ok(serde_json::to_string_pretty(&translated)?)
}

fn print_schema() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(ParsedConfiguration);
    Ok(serde_json::to_string_pretty(&schema)?)
}

/// The configuration in the context directory, or the defaults when there is none.
async fn load_configuration(context: &Context) -> anyhow::Result<Configuration> {
    if !context
        .context_path
        .join(version1::CONFIGURATION_FILENAME)
        .exists()
    {
        tracing::debug!(
            path = %context.context_path.display(),
            "no configuration found, using defaults"
        );
        return Ok(Configuration::default());
    }
    let parsed = parse_configuration(&context.context_path).await?;
    Ok(make_runtime_configuration(parsed)?)
}

fn parse_filters(filters: &str) -> anyhow::Result<FilterMap> {
    serde_json::from_str(filters).context("filters must be a JSON object")
}
