//! Domain layer for the Evaluation Catalog

pub mod config;

pub use config::{
    default_options, points_range, validate_options, EvaluationConfig, EvaluationOption,
    OptionInput,
};
