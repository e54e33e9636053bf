use tracing::info;

use crate::combinator::{ProductIterator, inflate_mixed, is_admissible};
use crate::error::Result;
use crate::query::QuerySpec;
use crate::serialize::serialize;
use crate::sink::Sink;

/// Per-query outcome of a generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationSummary {
    pub name: String,
    /// Combinations before the non-empty filter.
    pub raw: u128,
    /// Combinations that survived the filter.
    pub admissible: u128,
    /// Lines handed to the sink (zero on dry runs).
    pub emitted: usize,
}

/// Stateless driver turning a [`QuerySpec`] into its ordered URL sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct Generator {
    dry_run: bool,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and count only; nothing reaches the sink.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Every admissible `host + url + suffix`, in engine order.
    pub fn urls(&self, spec: &QuerySpec) -> Result<Vec<String>> {
        spec.validate()?;
        let base = spec.base_url();
        let mixed = inflate_mixed(&spec.mixed);
        let urls = ProductIterator::new(&spec.fixed, &mixed)
            .filter(|combination| is_admissible(combination, spec.require_non_empty))
            .map(|combination| format!("{base}{}", serialize(&combination)))
            .collect();
        Ok(urls)
    }

    /// Generate one query into `sink`.
    ///
    /// The whole sequence is computed before the first emit, so a query that
    /// fails validation leaves the sink untouched. Dry runs only count.
    pub fn generate(&self, spec: &QuerySpec, sink: &mut dyn Sink) -> Result<GenerationSummary> {
        let (admissible, emitted) = if self.dry_run {
            spec.validate()?;
            (spec.admissible_combinations(), 0)
        } else {
            let urls = self.urls(spec)?;
            for url in &urls {
                sink.emit(url)?;
            }
            (urls.len() as u128, urls.len())
        };
        let summary = GenerationSummary {
            name: spec.name.clone(),
            raw: spec.raw_combinations(),
            admissible,
            emitted,
        };
        info!(
            query = %summary.name,
            raw = %summary.raw,
            admissible = %summary.admissible,
            emitted = summary.emitted,
            dry_run = self.dry_run,
            "generated query"
        );
        Ok(summary)
    }

    /// Generate several queries in order. Every spec is validated before
    /// anything is emitted.
    pub fn generate_all(
        &self,
        specs: &[QuerySpec],
        sink: &mut dyn Sink,
    ) -> Result<Vec<GenerationSummary>> {
        for spec in specs {
            spec.validate()?;
        }
        let summaries = specs
            .iter()
            .map(|spec| self.generate(spec, sink))
            .collect::<Result<Vec<_>>>()?;
        sink.finish()?;
        Ok(summaries)
    }
}
