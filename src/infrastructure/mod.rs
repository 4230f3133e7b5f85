//! Infrastructure layer - adapters for the application ports.
//!
//! - Clocks (system time, fixed time)
//! - Schedulers (manual virtual time, tokio)
//! - Environment (static user agent and location)

pub mod clock;
pub mod environment;
pub mod scheduler;
