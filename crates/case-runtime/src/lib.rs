//! # Case Workflow Runtime
//!
//! Wires the case workflow subsystems together and runs them.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and service construction
//! - `adapters/` - Port implementations connecting subsystems
//! - `runtime` - Worker spawning and graceful shutdown
//!
//! ## Event Flow
//!
//! ```text
//!   HTTP ──→ cw-07 gateway ──→ cw-01 lifecycle ──CaseEvent──→ Event Bus
//!                                                                 │
//!                                                                 ↓
//!   cw-06 stale monitor ─────────────escalate───────────→ cw-04 dispatcher
//!                                                           │          │
//!                                                           ↓          ↓
//!                                                    cw-03 inbox  cw-05 chat
//! ```

pub mod adapters;
pub mod container;
pub mod runtime;

pub use container::{RuntimeConfig, ServiceContainer};
pub use runtime::{CaseRuntime, RuntimeError};
