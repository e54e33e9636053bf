use std::path::PathBuf;

use crate::query::QuerySpec;

/// Where the queries of a run come from.
#[derive(Clone, Debug)]
pub enum QuerySource {
    /// A catalog file, optionally restricted to the named queries.
    Catalog { path: PathBuf, only: Vec<String> },
    /// A single query declared on the command line.
    Inline(QuerySpec),
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub source: QuerySource,
    /// File receiving the generated URLs; stdout when unset.
    pub output: Option<PathBuf>,
    /// Validate and count without writing any URL.
    pub dry_run: bool,
}
