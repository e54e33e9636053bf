use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::encode::{ParamValues, RawValues};
use crate::error;
use crate::query::{ParamKind, QueryBuilder, QuerySpec};

/// A file describing many queries for one run.
#[derive(Clone, Debug, Deserialize)]
pub struct Catalog {
    /// Host used by queries that do not set their own.
    #[serde(default)]
    pub host: Option<String>,
    pub queries: Vec<CatalogQuery>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogQuery {
    pub name: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub always_filter: bool,
    /// Parameters in declaration order.
    #[serde(default)]
    pub params: Vec<CatalogParam>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogParam {
    /// `fix` / `fixed` or `mix` / `mixed`.
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub values: Option<RawValues>,
}

impl Catalog {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse query catalog")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read query catalog {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid query catalog {}", path.display()))
    }

    /// Declare every query through the builder, in file order.
    pub fn into_specs(self) -> error::Result<Vec<QuerySpec>> {
        let default_host = self.host;
        self.queries
            .into_iter()
            .map(|query| query.into_spec(default_host.as_deref()))
            .collect()
    }
}

impl CatalogQuery {
    fn into_spec(self, default_host: Option<&str>) -> error::Result<QuerySpec> {
        let mut builder = QueryBuilder::new(&self.name)?;
        // Missing host/url are left empty and reported by validation.
        if let Some(host) = self.host.as_deref().or(default_host) {
            builder = builder.host(host)?;
        }
        if let Some(url) = self.url.as_deref() {
            builder = builder.url(url)?;
        }
        if self.always_filter {
            builder = builder.always_filter();
        }
        for param in self.params {
            let kind: ParamKind = param.kind.parse()?;
            builder = builder.param(kind, &param.name, ParamValues::from(param.values))?;
        }
        Ok(builder.build())
    }
}

/// Keep only the specs whose name is listed. An empty list keeps all of
/// them; a name matching no spec is an error.
pub fn select_queries(specs: Vec<QuerySpec>, names: &[String]) -> Result<Vec<QuerySpec>> {
    if names.is_empty() {
        return Ok(specs);
    }
    let known: HashSet<&str> = specs.iter().map(|spec| spec.name.as_str()).collect();
    if let Some(missing) = names.iter().find(|name| !known.contains(name.as_str())) {
        return Err(anyhow!(
            "unknown query '{missing}'; catalog defines: {}",
            specs
                .iter()
                .map(|spec| spec.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    Ok(specs
        .into_iter()
        .filter(|spec| names.contains(&spec.name))
        .collect())
}
