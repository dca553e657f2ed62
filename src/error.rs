//! Error types for the Benefit Consolidation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only structural failures are represented here. Data-quality issues
//! (unparseable dates, missing optional sources, unmapped lookups) are
//! handled with defaults and surfaced as log warnings or validation
//! findings, never as errors.

use thiserror::Error;

/// The main error type for the Benefit Consolidation Engine.
///
/// All fallible operations in the engine return this error type.
///
/// # Example
///
/// ```
/// use benefit_engine::error::EngineError;
///
/// let error = EngineError::MissingRequiredSource {
///     name: "active roster".to_string(),
/// };
/// assert_eq!(error.to_string(), "Required source table missing: active roster");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A mandatory source table was absent from the loaded table set.
    #[error("Required source table missing: {name}")]
    MissingRequiredSource {
        /// A human-readable name for the missing source.
        name: String,
    },

    /// The consolidated output would contain a duplicate registration id,
    /// which indicates an upstream join error.
    #[error("Duplicate registration id in consolidated output: {registration_id}")]
    DuplicateKey {
        /// The registration id that appeared more than once.
        registration_id: String,
    },

    /// The competency month was outside 1-12.
    #[error("Competency month must be between 1 and 12, got {month}")]
    InvalidCompetency {
        /// The rejected month value.
        month: u32,
    },

    /// Wrapper for I/O failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
