//! Ports layer for the Evaluation Catalog

pub mod inbound;
pub mod outbound;

pub use inbound::EvaluationCatalogApi;
pub use outbound::CatalogStore;
