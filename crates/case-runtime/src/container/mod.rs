//! # Container
//!
//! Configuration and dependency wiring for the runtime.

pub mod config;
pub mod services;

pub use config::{CatalogConfig, ConfigError, RuntimeConfig};
pub use services::{load_directory, ContainerError, ServiceContainer, Workers};
