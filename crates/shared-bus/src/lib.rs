//! # Shared Bus - Event Bus for Inter-Subsystem Communication
//!
//! The lifecycle controller and the stale monitor publish `CaseEvent`s here;
//! the notification dispatcher worker subscribes and fans them out. Producers
//! never wait on consumers, which keeps notification work off the request
//! path. Each subscription drains its own unbounded queue, so a consumer
//! that falls behind delays delivery but never loses an event.
//!
//! ## Choreography Pattern
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │  Lifecycle   │                    │  Dispatcher  │
//! │  Controller  │    publish()       │   worker     │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{CaseEvent, CaseSummary, EventFilter, EventTopic, PersonRef};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};
