//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised when parsing wire values into shared types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not a valid identifier.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Unknown case kind slug.
    #[error("Unknown case kind: {0}")]
    UnknownKind(String),

    /// Unknown case status name.
    #[error("Unknown case status: {0}")]
    UnknownStatus(String),

    /// Unknown role name.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Unknown evaluation perspective.
    #[error("Unknown perspective: {0}")]
    UnknownPerspective(String),

    /// Unknown evaluation criterion.
    #[error("Unknown criterion: {0}")]
    UnknownCriterion(String),
}

/// Caller-facing classification of a failed operation.
///
/// Dependency failures (inbox writes, chat delivery) never reach a caller
/// and so have no class here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or invalid input. Nothing was persisted.
    Validation,
    /// Unknown id. No side effect.
    NotFound,
    /// Duplicate config, illegal transition or stale version. No side effect.
    Conflict,
    /// Primary storage failed. Caller may retry.
    Fatal,
}

/// Errors from the external person/user directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The directory backend could not be reached.
    #[error("Directory unavailable: {0}")]
    Unavailable(String),

    /// The seed data could not be parsed.
    #[error("Invalid directory seed: {0}")]
    InvalidSeed(String),
}
