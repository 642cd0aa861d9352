//! # Shared Types Crate
//!
//! This crate contains the domain entities and directory ports shared by
//! every workflow subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Case kinds, statuses and identifiers are
//!   defined once here and re-used by every subsystem crate.
//! - **Closed Kind Set**: `CaseKind` is an exhaustive enum. Anything that
//!   varies per kind is resolved by `match`, never by string lookup.
//! - **External Identity**: People and login users are owned elsewhere; this
//!   core only reads them through `PersonDirectory` and `UserDirectory`.

pub mod clock;
pub mod directory;
pub mod entities;
pub mod errors;

pub use clock::{Clock, ManualClock, SystemClock};
pub use directory::{DirectorySeed, InMemoryDirectory, PersonDirectory, UserDirectory};
pub use entities::*;
pub use errors::*;
