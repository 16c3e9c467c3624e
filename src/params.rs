// params.rs
// TotpParameters: the tuple that must match between code generation and verification.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TotpError};
use crate::mac::Algorithm;

pub const DEFAULT_ISSUER: &str = "e-Patrol Log";
pub const DEFAULT_DIGITS: u32 = 6;
pub const DEFAULT_PERIOD: u64 = 30;
pub const MAX_DIGITS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotpParameters {
    pub algorithm: Algorithm,
    pub digits: u32,
    /// Step length in seconds.
    pub period: u64,
    pub issuer: String,
    pub account: String,
}

impl Default for TotpParameters {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sha1,
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            issuer: DEFAULT_ISSUER.to_string(),
            account: String::new(),
        }
    }
}

impl TotpParameters {
    pub fn new(algorithm: Algorithm, digits: u32, period: u64) -> Result<Self> {
        let params = Self {
            algorithm,
            digits,
            period,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    /// Digits must lie in 1..=10 (the truncated value is below 2^31) and the period must be
    /// non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.digits == 0 || self.digits > MAX_DIGITS {
            return Err(TotpError::config(format!(
                "digits must be between 1 and {MAX_DIGITS}, got {}",
                self.digits
            )));
        }
        if self.period == 0 {
            return Err(TotpError::config("period must be a positive number of seconds"));
        }
        Ok(())
    }
}
