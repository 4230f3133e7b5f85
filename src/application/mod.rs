//! Application layer - services built on the domain logic.
//!
//! - Date formatter (pattern rendering with an injected clock)
//! - Throttle and debounce wrappers (deferred through a scheduler)
//! - Environment-backed helpers (browser, query parameters)
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters implement, keeping ambient state out of the services.

pub mod environment;
pub mod formatter;
pub mod limiter;
pub mod metrics;
pub mod ports;
