//! Numeric sorting with an explicit direction.

use std::str::FromStr;

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first (`"up"`)
    Ascending,
    /// Largest first (`"down"`)
    Descending,
}

/// Error for an unrecognized direction flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// Flag was neither `"up"` nor `"down"`
    InvalidDirection(String),
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortError::InvalidDirection(flag) => {
                write!(f, "invalid sort direction {:?}, expected \"up\" or \"down\"", flag)
            }
        }
    }
}

impl std::error::Error for SortError {}

impl FromStr for SortDirection {
    type Err = SortError;

    fn from_str(flag: &str) -> Result<Self, Self::Err> {
        match flag {
            "up" => Ok(SortDirection::Ascending),
            "down" => Ok(SortDirection::Descending),
            other => Err(SortError::InvalidDirection(other.to_string())),
        }
    }
}

/// Sort `values` in the given direction.
///
/// Uses IEEE total ordering, so NaN sorts after every number when ascending.
pub fn sort_numbers(mut values: Vec<f64>, direction: SortDirection) -> Vec<f64> {
    match direction {
        SortDirection::Ascending => values.sort_by(|a, b| a.total_cmp(b)),
        SortDirection::Descending => values.sort_by(|a, b| b.total_cmp(a)),
    }
    values
}

/// Sort by a textual direction flag.
///
/// # Errors
/// Returns `SortError::InvalidDirection` without touching `values` when the
/// flag is not recognized.
///
/// ```
/// use base_common::sort_by_flag;
///
/// assert_eq!(sort_by_flag(vec![3.0, 1.0, 2.0], "down").unwrap(), vec![3.0, 2.0, 1.0]);
/// assert!(sort_by_flag(vec![3.0, 1.0], "sideways").is_err());
/// ```
pub fn sort_by_flag(values: Vec<f64>, flag: &str) -> Result<Vec<f64>, SortError> {
    let direction = flag.parse()?;
    Ok(sort_numbers(values, direction))
}
