//! # Errors
//!
//! Every calculator, table lookup, share-link parser and renderer in
//! calc_core fails with a [`CalcError`]. Front ends either show the message
//! or branch on [`CalcError::error_code`]; the CLI prints both with `--json`.
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn check_length(length_ft: f64) -> CalcResult<f64> {
//!     if length_ft <= 0.0 {
//!         return Err(CalcError::invalid_input("length", length_ft.to_string(), "must be > 0"));
//!     }
//!     Ok(length_ft)
//! }
//!
//! let err = check_length(-5.0).unwrap_err();
//! assert_eq!(err.error_code(), "INVALID_INPUT");
//! assert!(err.is_user_fixable());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type CalcResult<T> = Result<T, CalcError>;

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A form value is out of range or not parseable
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// An NEC table has no row for the requested key
    #[error("No entry in {table} for {key}")]
    TableLookup { table: String, key: String },

    /// Inputs were valid but no answer exists (nothing up to 1000 kcmil fits, etc.)
    #[error("{calculator}: {reason}")]
    NoSolution { calculator: String, reason: String },

    #[error("Invalid share link '{url}': {reason}")]
    InvalidShareUrl { url: String, reason: String },

    /// The settings file could not be read
    #[error("Cannot read settings '{path}': {reason}")]
    SettingsFile { path: String, reason: String },

    #[error("Malformed data: {reason}")]
    Malformed { reason: String },

    /// Typst compilation or PDF export failed
    #[error("{stage} failed: {message}")]
    Render { stage: String, message: String },
}

impl CalcError {
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField { field: field.into() }
    }

    pub fn table_lookup(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::TableLookup {
            table: table.into(),
            key: key.into(),
        }
    }

    pub fn no_solution(calculator: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::NoSolution {
            calculator: calculator.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_share_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidShareUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn settings_file(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::SettingsFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        CalcError::Malformed { reason: reason.into() }
    }

    pub fn render(stage: impl Into<String>, message: impl Into<String>) -> Self {
        CalcError::Render {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// True when editing a form value can clear the error.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::TableLookup { .. }
                | CalcError::NoSolution { .. }
        )
    }

    /// Stable code for scripts consuming `--json` output
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::TableLookup { .. } => "TABLE_LOOKUP",
            CalcError::NoSolution { .. } => "NO_SOLUTION",
            CalcError::InvalidShareUrl { .. } => "INVALID_SHARE_URL",
            CalcError::SettingsFile { .. } => "SETTINGS_FILE",
            CalcError::Malformed { .. } => "MALFORMED",
            CalcError::Render { .. } => "RENDER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let error = CalcError::invalid_input("length", "-5", "must be > 0");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        assert!(json.contains("\"field\":\"length\""));
        let back: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, back);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("conductors").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::table_lookup("NEC 310.16", "18 AWG").error_code(), "TABLE_LOOKUP");
        assert_eq!(CalcError::invalid_share_url("x", "bad").error_code(), "INVALID_SHARE_URL");
        assert_eq!(CalcError::render("PDF export", "x").error_code(), "RENDER");
    }

    #[test]
    fn test_user_fixable() {
        assert!(CalcError::invalid_input("a", "b", "c").is_user_fixable());
        assert!(CalcError::no_solution("Wire Size", "nothing fits").is_user_fixable());
        assert!(!CalcError::settings_file("voltwise.toml", "not found").is_user_fixable());
        assert!(!CalcError::render("Typst compilation", "x").is_user_fixable());
    }

    #[test]
    fn test_display() {
        let e = CalcError::table_lookup("NEC Table 314.16(B)", "4 AWG");
        assert_eq!(e.to_string(), "No entry in NEC Table 314.16(B) for 4 AWG");
        let e = CalcError::no_solution("Welder", "No conductor carries 900.0 A");
        assert_eq!(e.to_string(), "Welder: No conductor carries 900.0 A");
    }
}
