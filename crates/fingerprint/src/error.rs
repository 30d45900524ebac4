//! crates/fingerprint/src/error.rs
//!
//! Error type for PEM parsing and decoding failures.

use thiserror::Error;

/// Errors that arise when extracting key material from PEM input.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FingerprintError {
    /// The `-----BEGIN PUBLIC KEY-----` line was not found.
    #[error("PEM input has no `-----BEGIN PUBLIC KEY-----` line")]
    MissingHeader,
    /// No `-----END PUBLIC KEY-----` line follows the header.
    #[error("PEM input has no `-----END PUBLIC KEY-----` line after the header")]
    MissingFooter,
    /// The text between the boundary lines is not valid base64.
    #[error("PEM body is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}
