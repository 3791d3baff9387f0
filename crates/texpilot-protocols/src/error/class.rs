//! Error classification shared by every component.

use serde::{Deserialize, Serialize};

/// Coarse failure class used for logging and for mapping errors onto
/// user-facing outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Empty prompt, wrong site, empty result.
    Validation,
    /// Missing credential or unusable settings.
    Configuration,
    /// Backend unreachable or upstream non-success.
    Connectivity,
    /// Editor, cursor, tab or message receiver not found.
    NotFound,
    /// Anything else.
    Internal,
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorClass::Validation => "validation",
            ErrorClass::Configuration => "configuration",
            ErrorClass::Connectivity => "connectivity",
            ErrorClass::NotFound => "not_found",
            ErrorClass::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Errors that know their [`ErrorClass`].
pub trait Classify {
    fn class(&self) -> ErrorClass;
}
