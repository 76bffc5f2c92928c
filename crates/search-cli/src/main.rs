//! Helios search client.
//!
//! Runs one query against a Solr-compatible engine and prints the matching
//! documents as JSON, followed by a pagination summary.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use helios_search::parameter::{Any, FacetField, Fields, Filter, Limit, Offset, Sort};
use helios_search::types::SortDirection;
use helios_search::{
    Backend, ClientConfig, DynamicDocument, Field, HttpProvider, Parameter, Provider, Queryable,
    QueryValue, WireFormat,
};
use tracing::info;

type Doc = DynamicDocument;

/// Command-line arguments: connection settings plus the query to run.
#[derive(Debug, Parser)]
#[command(name = "search-cli")]
#[command(about = "Query a Solr-compatible search engine")]
struct Cli {
    #[command(flatten)]
    client: ClientConfig,

    /// Main query expression.
    #[arg(short, long)]
    query: Option<String>,

    /// Filter query expression (repeatable).
    #[arg(long = "filter")]
    filters: Vec<String>,

    /// Sort as `field[:asc|desc]` (repeatable, first is primary).
    #[arg(long = "sort")]
    sorts: Vec<String>,

    /// Comma-separated stored fields to return.
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Number of documents to skip.
    #[arg(long)]
    offset: Option<u64>,

    /// Documents per page.
    #[arg(long)]
    limit: Option<u64>,

    /// Field to facet on (repeatable).
    #[arg(long = "facet-field")]
    facet_fields: Vec<String>,

    /// Extra engine parameter as `name=value` (repeatable).
    #[arg(long = "param")]
    params: Vec<String>,
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides `level`.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("helios_search={},search_cli={}", level, level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Parses `field[:asc|desc]`.
fn parse_sort(value: &str) -> anyhow::Result<Sort<Doc>> {
    let (name, direction) = match value.split_once(':') {
        Some((name, "asc")) => (name, SortDirection::Ascending),
        Some((name, "desc")) => (name, SortDirection::Descending),
        Some((_, other)) => anyhow::bail!("Unknown sort direction '{}' in '{}'", other, value),
        None => (value, SortDirection::Ascending),
    };
    Ok(Sort::new(Field::new(name), direction))
}

/// Parses `name=value`.
fn parse_param(value: &str) -> anyhow::Result<Any> {
    let (name, value) = value
        .split_once('=')
        .with_context(|| format!("Parameter '{}' is not of the form name=value", value))?;
    Ok(Any::new(name, value)?)
}

/// Turns the command-line query options into parameters.
fn parameters(cli: &Cli) -> anyhow::Result<Vec<Parameter<Doc>>> {
    let mut parameters = Vec::new();

    if let Some(query) = &cli.query {
        parameters.push(Parameter::query(QueryValue::expression(query)?));
    }
    for filter in &cli.filters {
        parameters.push(Filter::new(QueryValue::expression(filter)?).into());
    }
    // Each later sort becomes the primary key, so add them last to first.
    for sort in cli.sorts.iter().rev() {
        parameters.push(parse_sort(sort)?.into());
    }
    if !cli.fields.is_empty() {
        let fields = cli.fields.iter().map(|name| Field::new(name.as_str()));
        parameters.push(Fields::new(fields)?.into());
    }
    if let Some(offset) = cli.offset {
        parameters.push(Offset::new(offset).into());
    }
    if let Some(limit) = cli.limit {
        parameters.push(Limit::new(limit).into());
    }
    for facet in &cli.facet_fields {
        parameters.push(FacetField::new(Field::new(facet)).into());
    }
    for param in &cli.params {
        parameters.push(parse_param(param)?.into());
    }

    Ok(parameters)
}

/// Runs the query through backend `B` and prints the result.
async fn run<B: Backend>(cli: &Cli, provider: Arc<dyn Provider>) -> anyhow::Result<()> {
    let configuration = Arc::new(cli.client.to_configuration());
    let mut query = Queryable::<Doc, B>::with_configuration(provider, configuration);
    query.parameters(parameters(cli)?)?;

    let result = query.execute().await?;
    let documents = result.documents()?;
    let information = result.information()?;

    println!("{}", serde_json::to_string_pretty(&documents)?);

    for facet in result.facet_fields()? {
        println!("facet {}:", facet.name);
        for value in facet.values {
            println!("  {} ({})", value.key, value.quantity);
        }
    }

    println!(
        "{} documents, page {} of {} ({} per page) in {:?}",
        information.document_count,
        information.page_number,
        information.page_count,
        information.page_size,
        information.elapsed_time
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.client.log_level);

    if let Err(errors) = cli.client.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let provider: Arc<dyn Provider> = Arc::new(HttpProvider::from_config(&cli.client)?);

    info!(
        base_url = %cli.client.base_url,
        collection = %cli.client.collection,
        wire_format = %cli.client.wire_format,
        "Running search"
    );

    match cli.client.wire_format {
        WireFormat::Legacy => run_legacy(&cli, provider).await,
        WireFormat::Json => run_json(&cli, provider).await,
    }
}

#[cfg(feature = "legacy")]
async fn run_legacy(cli: &Cli, provider: Arc<dyn Provider>) -> anyhow::Result<()> {
    run::<helios_search::LegacyBackend>(cli, provider).await
}

/// Fallback when the legacy feature is not enabled.
#[cfg(not(feature = "legacy"))]
async fn run_legacy(_cli: &Cli, _provider: Arc<dyn Provider>) -> anyhow::Result<()> {
    anyhow::bail!(
        "The legacy wire format requires the 'legacy' feature. \
         Build with: cargo build -p helios-search-cli --features legacy"
    )
}

#[cfg(feature = "json")]
async fn run_json(cli: &Cli, provider: Arc<dyn Provider>) -> anyhow::Result<()> {
    run::<helios_search::JsonBackend>(cli, provider).await
}

/// Fallback when the json feature is not enabled.
#[cfg(not(feature = "json"))]
async fn run_json(_cli: &Cli, _provider: Arc<dyn Provider>) -> anyhow::Result<()> {
    anyhow::bail!(
        "The JSON wire format requires the 'json' feature. \
         Build with: cargo build -p helios-search-cli --features json"
    )
}
