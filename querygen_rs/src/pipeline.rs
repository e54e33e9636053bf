use std::fs::{self, File};

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::{Catalog, select_queries};
use crate::config::{QuerySource, RunConfig};
use crate::generator::{GenerationSummary, Generator};
use crate::query::QuerySpec;
use crate::sink::{Sink, WriterSink};

#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub queries: Vec<GenerationSummary>,
}

impl RunSummary {
    pub fn emitted(&self) -> usize {
        self.queries.iter().map(|q| q.emitted).sum()
    }

    pub fn admissible(&self) -> u128 {
        self.queries.iter().map(|q| q.admissible).sum()
    }
}

/// Resolve the specs a run will generate, in order.
pub fn load_specs(source: &QuerySource) -> Result<Vec<QuerySpec>> {
    match source {
        QuerySource::Catalog { path, only } => {
            let specs = Catalog::load(path)?.into_specs()?;
            select_queries(specs, only)
        }
        QuerySource::Inline(spec) => Ok(vec![spec.clone()]),
    }
}

/// Generate every configured query into `sink`.
pub fn run_with_sink(config: &RunConfig, sink: &mut dyn Sink) -> Result<RunSummary> {
    let specs = load_specs(&config.source)?;
    generate_specs(&specs, config.dry_run, sink)
}

/// Generate every configured query into the configured output file, or
/// stdout.
///
/// Specs are loaded and validated before the output file is opened, so a
/// failed run leaves an existing file untouched.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let specs = load_specs(&config.source)?;
    for spec in &specs {
        spec.validate()?;
    }
    match config.output.as_ref() {
        Some(path) if !config.dry_run => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create output directory {parent:?}"))?;
            }
            let file = File::create(path)
                .with_context(|| format!("failed to open output file {path:?}"))?;
            let mut sink = WriterSink::new(file);
            let summary = generate_specs(&specs, false, &mut sink)?;
            info!(path = %path.display(), lines = sink.lines(), "wrote generated queries");
            Ok(summary)
        }
        _ => generate_specs(&specs, config.dry_run, &mut WriterSink::stdout()),
    }
}

fn generate_specs(specs: &[QuerySpec], dry_run: bool, sink: &mut dyn Sink) -> Result<RunSummary> {
    info!(queries = specs.len(), dry_run, "starting generation");
    let queries = Generator::new()
        .with_dry_run(dry_run)
        .generate_all(specs, sink)?;
    let summary = RunSummary { queries };
    info!(
        queries = summary.queries.len(),
        admissible = %summary.admissible(),
        emitted = summary.emitted(),
        "generation complete"
    );
    Ok(summary)
}
