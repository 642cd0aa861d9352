//! # Case Workflow Test Suite
//!
//! Cross-subsystem flows run against the fully wired in-memory services.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs            # Wired container on a manual clock
//!     ├── case_flows.rs          # Status machine and assessments (cw-01 + cw-02)
//!     ├── catalog_flows.rs       # Option vocabulary round trips (cw-02)
//!     └── notification_flows.rs  # Fan-out and stale escalation (cw-03/04/06)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cw-tests
//! cargo test -p cw-tests integration::notification_flows
//! ```

pub mod integration;
