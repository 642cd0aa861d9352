//! # CW-07 API Gateway
//!
//! HTTP surface for the case workflow core.
//!
//! ```text
//!            x-user-id / x-user-role (set by upstream auth)
//!                          │
//!   ┌──────────────────────┴──────────────────────┐
//!   │  TraceLayer → TimeoutLayer → Router          │
//!   └───────┬──────────────┬──────────────┬────────┘
//!           ▼              ▼              ▼
//!     cw-01 cases    cw-02 catalog   cw-03 inbox
//! ```
//!
//! Every response is wrapped as `{success, data}` or `{success, error}`.
//! Subsystem errors map to status through their `ErrorKind`:
//! Validation 400, NotFound 404, Conflict 409, Fatal 500.

pub mod auth;
pub mod config;
pub mod envelope;
pub mod error;
pub mod router;
pub mod routes;
pub mod service;

pub use auth::{Caller, USER_ID_HEADER, USER_ROLE_HEADER};
pub use config::GatewayConfig;
pub use envelope::Envelope;
pub use error::{ApiError, ApiResult, GatewayError};
pub use router::{build_router, AppState};
pub use service::{bind, serve};
