//! # cw-02-evaluation-catalog
//!
//! Scoring vocabularies for case assessments, one per
//! (perspective, criterion) pair.
//!
//! - At most one active config per pair; creating a second is a conflict.
//! - Option updates replace the whole list under the config's own lock.
//! - Deactivation is soft. Scores already recorded on cases are raw integers
//!   and are never rewritten.
//! - Reads are served from a TTL cache that writes invalidate.

pub mod adapters;
pub mod cache;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::InMemoryCatalogStore;
pub use cache::{OptionCache, DEFAULT_CACHE_TTL};
pub use domain::{EvaluationConfig, EvaluationOption, OptionInput};
pub use error::{CatalogError, CatalogResult};
pub use ports::{CatalogStore, EvaluationCatalogApi};
pub use service::EvaluationCatalogService;
