//! Error types for the einv-core library.

use thiserror::Error;

/// Errors surfaced while parsing QR payloads.
///
/// Every variant is recoverable by the caller; numeric and date sub-fields
/// never raise and instead degrade to their declared defaults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The payload is empty or blank.
    #[error("QR payload is empty")]
    InvalidInput,

    /// The payload does not look like a Taiwan e-invoice QR code.
    #[error("not a recognizable Taiwan e-invoice QR payload")]
    InvalidFormat,

    /// The header segment is missing required fields.
    #[error("invoice header has {found} of 5 required fields")]
    IncompleteHeader { found: usize },

    /// Both codes of a pair classified as header codes.
    #[error("both codes look like a header code; rescan the code carrying line items")]
    AmbiguousBothHeader,

    /// Both codes of a pair classified as detail codes.
    #[error("both codes look like a detail code; rescan the code carrying the invoice number")]
    AmbiguousBothDetail,
}

/// Result type for the einv-core library.
pub type Result<T> = std::result::Result<T, ParseError>;
