//! String case transforms.

use std::str::FromStr;

/// Case transform to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseMode {
    /// Uppercase the first character (`firCaps`)
    FirstUpper,
    /// Lowercase the first character (`firLower`)
    FirstLower,
    /// Uppercase everything (`allCaps`)
    AllUpper,
    /// Lowercase everything (`allLower`)
    AllLower,
}

/// Errors from case transforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseError {
    /// Input string was empty
    EmptyInput,
    /// Mode flag was not recognized
    UnknownMode(String),
}

impl std::fmt::Display for CaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseError::EmptyInput => write!(f, "cannot change the case of an empty string"),
            CaseError::UnknownMode(flag) => write!(f, "unknown case mode {:?}", flag),
        }
    }
}

impl std::error::Error for CaseError {}

impl FromStr for CaseMode {
    type Err = CaseError;

    fn from_str(flag: &str) -> Result<Self, Self::Err> {
        match flag {
            "firCaps" => Ok(CaseMode::FirstUpper),
            "firLower" => Ok(CaseMode::FirstLower),
            "allCaps" => Ok(CaseMode::AllUpper),
            "allLower" => Ok(CaseMode::AllLower),
            other => Err(CaseError::UnknownMode(other.to_string())),
        }
    }
}

/// Apply `mode` to `text`.
///
/// # Errors
/// Returns `CaseError::EmptyInput` for an empty string.
pub fn change_case(text: &str, mode: CaseMode) -> Result<String, CaseError> {
    let mut chars = text.chars();
    let first = chars.next().ok_or(CaseError::EmptyInput)?;

    let changed = match mode {
        CaseMode::FirstUpper => first.to_uppercase().chain(chars).collect(),
        CaseMode::FirstLower => first.to_lowercase().chain(chars).collect(),
        CaseMode::AllUpper => text.to_uppercase(),
        CaseMode::AllLower => text.to_lowercase(),
    };
    Ok(changed)
}
