use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};

use querygen_rs::{ParamKind, QueryBuilder, QuerySource, RunConfig};

#[derive(Parser, Debug)]
#[command(
    name = "querygen",
    about = "Generate every query-string variant of an API filter surface"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate every query declared in a JSON catalog
    #[command(name = "catalog")]
    Catalog(CatalogArgs),
    /// Generate a single query declared on the command line
    #[command(name = "query")]
    Query(QueryArgs),
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Write generated URLs to this file instead of stdout
    #[arg(long = "output", short = 'o', value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Validate and count combinations without writing any URL
    #[arg(long = "dry-run", default_value_t = false)]
    pub dry_run: bool,

    /// Also append logs to this file
    #[arg(long = "log-file", value_hint = clap::ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Path to the JSON query catalog
    #[arg(long = "catalog", value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub catalog: PathBuf,

    /// Only generate queries with these names (comma-delimited or repeated)
    #[arg(long = "query", value_delimiter = ',')]
    pub queries: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// Query name, used in logs
    #[arg(long = "name")]
    pub name: String,

    /// Host, e.g. http://localhost:8080
    #[arg(long = "host")]
    pub host: String,

    /// Path, e.g. /products/by-filters
    #[arg(long = "url")]
    pub url: String,

    /// Fixed parameter present in every query: NAME=V1,V2,...
    #[arg(long = "fix", value_name = "NAME=VALUES", value_parser = parse_param)]
    pub fixed: Vec<(String, Vec<String>)>,

    /// Mixed parameter whose values are combined: NAME=V1,V2,...
    #[arg(long = "mix", value_name = "NAME=VALUES", value_parser = parse_param)]
    pub mixed: Vec<(String, Vec<String>)>,

    /// Drop the query that carries no parameter at all
    #[arg(long = "always-filter", default_value_t = false)]
    pub always_filter: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl Cli {
    pub fn parse() -> Self {
        <Cli as Parser>::parse()
    }
}

impl Commands {
    pub fn output(&self) -> &OutputArgs {
        match self {
            Commands::Catalog(args) => &args.output,
            Commands::Query(args) => &args.output,
        }
    }

    pub fn into_config(self) -> Result<RunConfig> {
        match self {
            Commands::Catalog(args) => args.into_config(),
            Commands::Query(args) => args.into_config(),
        }
    }
}

impl CatalogArgs {
    pub fn into_config(self) -> Result<RunConfig> {
        let only = self
            .queries
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        Ok(RunConfig {
            source: QuerySource::Catalog {
                path: self.catalog,
                only,
            },
            output: self.output.output,
            dry_run: self.output.dry_run,
        })
    }
}

impl QueryArgs {
    pub fn into_config(self) -> Result<RunConfig> {
        let mut builder = QueryBuilder::new(&self.name)?.host(&self.host)?.url(&self.url)?;
        if self.always_filter {
            builder = builder.always_filter();
        }
        let params = self
            .fixed
            .into_iter()
            .map(|param| (ParamKind::Fixed, param))
            .chain(self.mixed.into_iter().map(|param| (ParamKind::Mixed, param)));
        for (kind, (name, values)) in params {
            builder = builder.param(kind, &name, values)?;
        }
        Ok(RunConfig {
            source: QuerySource::Inline(builder.build()),
            output: self.output.output,
            dry_run: self.output.dry_run,
        })
    }
}

/// Parse `NAME=V1,V2` into a name and its ordered values. `NAME=` declares
/// no values.
fn parse_param(raw: &str) -> Result<(String, Vec<String>)> {
    let (name, values) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=VALUES, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("parameter name is empty in '{raw}'"));
    }
    let values = if values.is_empty() {
        Vec::new()
    } else {
        values.split(',').map(str::to_string).collect()
    };
    Ok((name.to_string(), values))
}
