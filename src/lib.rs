//! # base-common
//!
//! Everyday helpers for front-end style code, without the ambient globals.
//!
//! The crate covers three small engines plus a few glue helpers:
//!
//! - **Date formatting**: render an instant with a `{y}-{m}-{d} {h}:{i}:{s}`
//!   pattern language
//! - **Monetary numerals**: render an amount as traditional Chinese
//!   uppercase currency text (`壹仟零伍元叁角`)
//! - **Call gating**: wrap a callback with throttle (leading edge) or
//!   debounce (trailing edge) timing
//! - **Glue**: numeric sort, case transforms, browser detection and query
//!   string parsing
//!
//! ## Quick Start
//!
//! ```rust
//! use base_common::{format_time, to_text, TimeValue};
//!
//! // Ten-digit epochs are seconds
//! let text = format_time(Some(TimeValue::Epoch(1_700_000_000)), Some("{y}年{m}月{d}日"));
//! assert!(text.is_some());
//!
//! assert_eq!(to_text(1005.3), "壹仟零伍元叁角");
//! ```
//!
//! ## Date Formatting
//!
//! A pattern holds placeholders `{y}`, `{m}`, `{d}`, `{h}`, `{i}`, `{s}`
//! (zero-padded to two digits) and `{a}` (weekday glyph, `日` through `六`).
//! Everything else is literal. Time values may be an instant, an epoch
//! number (ten-character values are seconds, others milliseconds) or a
//! string:
//!
//! ```rust
//! use base_common::{DateFormatter, TimeValue};
//! use chrono::Utc;
//!
//! let formatter = DateFormatter::new();
//! let text = formatter.format_in(Some(TimeValue::from("2024-03-05 09:30:00")), Some("{m}/{d} {h}:{i} 周{a}"), &Utc);
//! assert_eq!(text.as_deref(), Some("03/05 09:30 周二"));
//! ```
//!
//! A missing or falsy time (`Epoch(0)`, empty text) yields `None`.
//!
//! ## Throttle and Debounce
//!
//! Wrappers defer the callback through a [`Scheduler`]. Use
//! [`TokioScheduler`] inside a tokio runtime, or [`ManualScheduler`] to
//! drive timers from your own loop:
//!
//! ```rust
//! use base_common::{debounce, ManualScheduler};
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let scheduler = ManualScheduler::new();
//! let last = Arc::new(AtomicU32::new(0));
//! let sink = Arc::clone(&last);
//!
//! let resize = debounce(
//!     move |(width, _height): (u32, u32)| sink.store(width, Ordering::SeqCst),
//!     Duration::from_millis(200),
//!     Arc::new(scheduler.clone()),
//! );
//!
//! resize.call((800, 600));
//! resize.call((1024, 768));
//! scheduler.advance(Duration::from_millis(200));
//! assert_eq!(last.load(Ordering::SeqCst), 1024);
//! assert_eq!(resize.metrics().superseded(), 1);
//! ```
//!
//! ## Ambient State
//!
//! Nothing reads a global clock, location or user agent implicitly. The
//! [`Clock`] and [`Environment`] ports supply them; see [`SystemClock`],
//! [`FixedClock`] and [`StaticEnvironment`].

// Domain layer - pure logic
pub mod domain;

// Application layer - services
pub mod application;

// Infrastructure layer - adapters
pub mod infrastructure;

pub use domain::{
    browser::BrowserKind,
    numerals::{to_text, try_to_text, AmountError},
    pattern::{Field, Pattern, DEFAULT_PATTERN},
    query::parse_query,
    sort::{sort_by_flag, sort_numbers, SortDirection, SortError},
    text_case::{change_case, CaseError, CaseMode},
    time_value::TimeValue,
};

pub use application::{
    environment::{current_browser, url_params},
    formatter::{format_time, BuildError, DateFormatter, DateFormatterBuilder},
    limiter::{debounce, throttle, Debounce, Throttle},
    metrics::{LimiterMetrics, MetricsSnapshot},
    ports::{Clock, Environment, Scheduler, Task, TimerHandle},
};

pub use infrastructure::{
    clock::{FixedClock, SystemClock},
    environment::StaticEnvironment,
    scheduler::{ManualScheduler, SchedulerError},
};

#[cfg(feature = "async")]
pub use infrastructure::scheduler::TokioScheduler;
