//! Adapters for the Evaluation Catalog

pub mod memory;

pub use memory::InMemoryCatalogStore;
