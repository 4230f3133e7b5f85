//! Domain layer - pure logic with no runtime dependencies.
//!
//! - Date pattern parsing and rendering
//! - Time value resolution
//! - Monetary numeral rendering
//! - Sort, case, browser and query-string helpers
//!
//! Nothing here schedules work or reads ambient state.

pub mod browser;
pub mod numerals;
pub mod pattern;
pub mod query;
pub mod sort;
pub mod text_case;
pub mod time_value;
