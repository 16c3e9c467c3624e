// config.rs
// Settings from the environment (TOTP_*). Unset means default, set-but-invalid is an error.

use std::env;
use std::str::FromStr;

use crate::error::{Result, TotpError};
use crate::mac::Algorithm;
use crate::params::{DEFAULT_DIGITS, DEFAULT_ISSUER, DEFAULT_PERIOD, MAX_DIGITS, TotpParameters};
use crate::secret::{DEFAULT_SECRET_BYTES, MIN_SECRET_BYTES};

pub const DEFAULT_WINDOW: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub params: TotpParameters,
    /// Steps accepted on each side of the current one.
    pub window: u32,
    pub secret_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            params: TotpParameters::default(),
            window: DEFAULT_WINDOW,
            secret_bytes: DEFAULT_SECRET_BYTES,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let issuer = lookup("TOTP_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string());
        let algorithm: Algorithm = parse_var(&lookup, "TOTP_ALGORITHM", Algorithm::Sha1)?;
        let digits = parse_var(&lookup, "TOTP_DIGITS", DEFAULT_DIGITS)?;
        let period = parse_var(&lookup, "TOTP_PERIOD", DEFAULT_PERIOD)?;
        let window = parse_var(&lookup, "TOTP_WINDOW", DEFAULT_WINDOW)?;
        let secret_bytes = parse_var(&lookup, "TOTP_SECRET_BYTES", DEFAULT_SECRET_BYTES)?;

        if secret_bytes < MIN_SECRET_BYTES {
            return Err(TotpError::config(format!(
                "TOTP_SECRET_BYTES must be at least {MIN_SECRET_BYTES}"
            )));
        }
        if digits == 0 || digits > MAX_DIGITS {
            return Err(TotpError::config(format!(
                "TOTP_DIGITS must be between 1 and {MAX_DIGITS}"
            )));
        }
        if period == 0 {
            return Err(TotpError::config(
                "TOTP_PERIOD must be a positive number of seconds",
            ));
        }
        let params = TotpParameters::new(algorithm, digits, period)?.with_issuer(issuer);

        Ok(Self {
            params,
            window,
            secret_bytes,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| TotpError::config(format!("{key} has an invalid value"))),
    }
}
