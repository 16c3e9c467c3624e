// error.rs
// Error taxonomy for the TOTP core. Messages never carry secrets or codes.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TotpError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TotpError {
    /// Malformed Base32 input.
    #[error("invalid base32 secret: {0}")]
    Encoding(String),

    /// Invalid parameters: zero period, digits out of range, unknown algorithm, short secret.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The OS random source could not produce bytes; enrollment must abort.
    #[error("secure random source unavailable: {0}")]
    EntropySource(String),

    #[error("invalid provisioning uri: {0}")]
    InvalidUri(String),

    #[error("qr rendering failed: {0}")]
    Qr(String),
}

impl TotpError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        TotpError::Config(msg.into())
    }
}
