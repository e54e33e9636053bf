pub mod catalog;
pub mod combinator;
pub mod config;
pub mod encode;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod query;
pub mod serialize;
pub mod sink;
pub mod subset;

pub use catalog::Catalog;
pub use combinator::Combination;
pub use config::{QuerySource, RunConfig};
pub use encode::{ParamValue, ParamValues};
pub use error::QueryGenError;
pub use generator::{GenerationSummary, Generator};
pub use pipeline::{RunSummary, run};
pub use query::{ParamKind, QueryBuilder, QuerySpec};
pub use sink::{Sink, WriterSink};
