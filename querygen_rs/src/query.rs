use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::combinator::{MAX_COMBINATIONS, admissible_combinations, total_combinations};
use crate::encode::ParamValues;
use crate::error::{QueryGenError, Result};
use crate::subset::MAX_MIXED_VALUES;

static HOST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?://)?[^/:]+(:\d+)?/?$").expect("host pattern compiles"));

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/[^/]+)+$").expect("url pattern compiles"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// All values are present in every combination.
    Fixed,
    /// One subset of the values is chosen per combination.
    Mixed,
}

impl ParamKind {
    fn method(self) -> &'static str {
        match self {
            ParamKind::Fixed => "fix_param",
            ParamKind::Mixed => "mix_param",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Fixed => f.write_str("fix"),
            ParamKind::Mixed => f.write_str("mix"),
        }
    }
}

impl FromStr for ParamKind {
    type Err = QueryGenError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "fix" | "fixed" => Ok(ParamKind::Fixed),
            "mix" | "mixed" => Ok(ParamKind::Mixed),
            other => Err(QueryGenError::invalid_parameter(format!(
                "unsupported parameter kind '{other}', expected 'fix' or 'mix'"
            ))),
        }
    }
}

/// Immutable snapshot of one query declaration, consumed by the generator.
///
/// Parameter values are stored in their encoded wire form. Both maps keep
/// declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuerySpec {
    pub name: String,
    pub host: String,
    pub url: String,
    pub require_non_empty: bool,
    pub fixed: IndexMap<String, Vec<String>>,
    pub mixed: IndexMap<String, Vec<String>>,
}

impl QuerySpec {
    /// Check the fields generation depends on.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(QueryGenError::configuration("Query name is required."));
        }
        if self.host.is_empty() {
            return Err(QueryGenError::configuration(format!(
                "Query host is required (query '{}').",
                self.name
            )));
        }
        if self.url.is_empty() {
            return Err(QueryGenError::configuration(format!(
                "Query URL is required (query '{}').",
                self.name
            )));
        }
        if self.require_non_empty && self.fixed.is_empty() && self.mixed.is_empty() {
            return Err(QueryGenError::configuration(format!(
                "Query '{}' is always filtered but no filters provided.",
                self.name
            )));
        }
        let raw = self.raw_combinations();
        if raw > MAX_COMBINATIONS {
            return Err(QueryGenError::configuration(format!(
                "Query '{}' expands to {raw} combinations (limit {MAX_COMBINATIONS}).",
                self.name
            )));
        }
        Ok(())
    }

    /// Combinations before the non-empty filter.
    pub fn raw_combinations(&self) -> u128 {
        total_combinations(self.mixed.values().map(Vec::len))
    }

    /// Combinations that survive the non-empty filter.
    pub fn admissible_combinations(&self) -> u128 {
        admissible_combinations(&self.fixed, &self.mixed, self.require_non_empty)
    }

    /// `host + url`, the prefix every generated query shares.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.host, self.url)
    }
}

/// Fluent builder that accumulates a [`QuerySpec`].
///
/// ```
/// use querygen_rs::QueryBuilder;
///
/// let spec = QueryBuilder::new("Sales")?
///     .host("http://localhost:9999")?
///     .url("/sales")?
///     .fix_param("sku", "1232456")?
///     .mix_param("class", ["c1", "c2"])?
///     .build();
/// assert_eq!(spec.raw_combinations(), 4);
/// # Ok::<(), querygen_rs::QueryGenError>(())
/// ```
#[derive(Clone, Debug)]
pub struct QueryBuilder {
    spec: QuerySpec,
}

impl QueryBuilder {
    /// Start a query with a fresh state.
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(QueryGenError::configuration(
                "The `query` method expects a non-empty string name.",
            ));
        }
        Ok(Self {
            spec: QuerySpec {
                name: name.to_string(),
                ..QuerySpec::default()
            },
        })
    }

    /// Discard everything declared so far and start a new query.
    pub fn query(self, name: &str) -> Result<Self> {
        Self::new(name)
    }

    /// Set the host, e.g. `http://localhost:8080`. A trailing slash is
    /// stripped.
    pub fn host(mut self, host: &str) -> Result<Self> {
        if !HOST_PATTERN.is_match(host) {
            return Err(QueryGenError::InvalidHost(host.to_string()));
        }
        self.spec.host = host.strip_suffix('/').unwrap_or(host).to_string();
        Ok(self)
    }

    /// Set the path, one or more `/segment` parts.
    pub fn url(mut self, url: &str) -> Result<Self> {
        if !URL_PATTERN.is_match(url) {
            return Err(QueryGenError::InvalidUrl(url.to_string()));
        }
        self.spec.url = url.to_string();
        Ok(self)
    }

    /// Drop the combination in which no parameter carries a value.
    pub fn always_filter(mut self) -> Self {
        self.spec.require_non_empty = true;
        self
    }

    pub fn fix_param(self, name: &str, values: impl Into<ParamValues>) -> Result<Self> {
        self.param(ParamKind::Fixed, name, values)
    }

    pub fn mix_param(self, name: &str, values: impl Into<ParamValues>) -> Result<Self> {
        self.param(ParamKind::Mixed, name, values)
    }

    /// Declare a parameter of either kind. Values that normalize to an
    /// empty list leave the parameter undeclared; redeclaring a name
    /// replaces its values in place.
    pub fn param(
        mut self,
        kind: ParamKind,
        name: &str,
        values: impl Into<ParamValues>,
    ) -> Result<Self> {
        if name.is_empty() {
            return Err(QueryGenError::invalid_parameter(format!(
                "The `{}` method expects a non-empty string name.",
                kind.method()
            )));
        }
        let values = values.into();
        if values.is_empty() {
            warn!(
                query = %self.spec.name,
                param = name,
                %kind,
                "parameter has no values; skipping"
            );
            return Ok(self);
        }
        let target = match kind {
            ParamKind::Fixed => &mut self.spec.fixed,
            ParamKind::Mixed => {
                if values.len() > MAX_MIXED_VALUES {
                    return Err(QueryGenError::invalid_parameter(format!(
                        "mixed parameter '{name}' has {} values; at most {} are supported",
                        values.len(),
                        MAX_MIXED_VALUES
                    )));
                }
                &mut self.spec.mixed
            }
        };
        target.insert(name.to_string(), values.encoded());
        Ok(self)
    }

    /// Snapshot the declaration. Required fields are checked when the
    /// snapshot is generated.
    pub fn build(self) -> QuerySpec {
        self.spec
    }
}
