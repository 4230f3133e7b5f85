//! Date formatting service.
//!
//! Combines time value resolution with the pattern language and an
//! injected clock for "now".

use crate::application::ports::Clock;
use crate::domain::pattern::{Pattern, DEFAULT_PATTERN};
use crate::domain::time_value::TimeValue;
use crate::infrastructure::clock::SystemClock;
use chrono::{Local, TimeZone};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Error returned when formatter configuration validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Default pattern must not be empty
    EmptyDefaultPattern,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::EmptyDefaultPattern => {
                write!(f, "default pattern must not be empty")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Builder for constructing a `DateFormatter`.
#[derive(Debug)]
pub struct DateFormatterBuilder {
    default_pattern: String,
    clock: Option<Arc<dyn Clock>>,
}

impl DateFormatterBuilder {
    /// Pattern used when a call passes no pattern or an empty one.
    pub fn with_default_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.default_pattern = pattern.into();
        self
    }

    /// Clock consulted by [`DateFormatter::format_now`].
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the formatter.
    ///
    /// # Errors
    /// Returns `BuildError::EmptyDefaultPattern` if the default pattern is
    /// empty.
    pub fn build(self) -> Result<DateFormatter, BuildError> {
        if self.default_pattern.is_empty() {
            return Err(BuildError::EmptyDefaultPattern);
        }
        Ok(DateFormatter {
            default_pattern: Pattern::parse(&self.default_pattern),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock::new())),
        })
    }
}

/// Renders points in time with the `{y}-{m}-{d}` pattern language.
///
/// # Example
/// ```
/// use base_common::{DateFormatter, TimeValue};
/// use chrono::Utc;
///
/// let formatter = DateFormatter::new();
/// let text = formatter.format_in(Some(TimeValue::Epoch(1_700_000_000)), Some("{y}-{m}-{d}"), &Utc);
/// assert_eq!(text.as_deref(), Some("2023-11-14"));
///
/// // Absent and zero times produce nothing
/// assert_eq!(formatter.format(None, None), None);
/// assert_eq!(formatter.format(Some(TimeValue::Epoch(0)), None), None);
/// ```
#[derive(Debug, Clone)]
pub struct DateFormatter {
    default_pattern: Pattern,
    clock: Arc<dyn Clock>,
}

impl DateFormatter {
    /// Formatter with the default pattern and the system clock.
    pub fn new() -> Self {
        Self {
            default_pattern: Pattern::parse(DEFAULT_PATTERN),
            clock: Arc::new(SystemClock::new()),
        }
    }

    /// Create a builder.
    pub fn builder() -> DateFormatterBuilder {
        DateFormatterBuilder {
            default_pattern: DEFAULT_PATTERN.to_string(),
            clock: None,
        }
    }

    /// Render `time` in the local time zone.
    ///
    /// Returns `None` when `time` is absent or falsy (`Epoch(0)`, empty
    /// text). Unparseable input renders as an invalid date rather than
    /// failing.
    pub fn format(&self, time: Option<TimeValue>, pattern: Option<&str>) -> Option<String> {
        self.format_in(time, pattern, &Local)
    }

    /// Render `time` as seen in `tz`.
    pub fn format_in<Tz: TimeZone>(
        &self,
        time: Option<TimeValue>,
        pattern: Option<&str>,
        tz: &Tz,
    ) -> Option<String> {
        let time = time.filter(|time| !time.is_absent())?;

        let resolved = time.resolve(tz);
        if resolved.is_none() {
            debug!(?time, "time value does not resolve to a date, rendering invalid date");
        }

        let rendered = match pattern.filter(|p| !p.is_empty()) {
            Some(pattern) => Pattern::parse(pattern).render(resolved.as_ref()),
            None => self.default_pattern.render(resolved.as_ref()),
        };
        Some(rendered)
    }

    /// Render the clock's current time in the local time zone.
    pub fn format_now(&self, pattern: Option<&str>) -> String {
        self.format_now_in(pattern, &Local)
    }

    /// Render the clock's current time as seen in `tz`.
    pub fn format_now_in<Tz: TimeZone>(&self, pattern: Option<&str>, tz: &Tz) -> String {
        let now = TimeValue::Instant(self.clock.now());
        // An instant is never absent, so this always renders.
        self.format_in(Some(now), pattern, tz).unwrap_or_default()
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `time` with `pattern` (or the default pattern) in the local time
/// zone. Shorthand for [`DateFormatter::format`] on a default formatter.
pub fn format_time(time: Option<TimeValue>, pattern: Option<&str>) -> Option<String> {
    DateFormatter::new().format(time, pattern)
}
