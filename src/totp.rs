// totp.rs
// HOTP dynamic truncation (RFC 4226 §5.3) driven by a time-step counter (RFC 6238).

use tracing::debug;

use crate::clock;
use crate::error::{Result, TotpError};
use crate::mac::{self, Algorithm};
use crate::params::{MAX_DIGITS, TotpParameters};

/// Code for an explicit counter: HMAC over the big-endian counter, truncated to `digits` decimals.
pub fn code_for(secret: &[u8], counter: u64, digits: u32, algorithm: Algorithm) -> Result<String> {
    if digits == 0 || digits > MAX_DIGITS {
        return Err(TotpError::config(format!(
            "digits must be between 1 and {MAX_DIGITS}, got {digits}"
        )));
    }
    let digest = mac::hmac(secret, &counter.to_be_bytes(), algorithm)?;
    let value = truncate(&digest);
    let code = u64::from(value) % 10u64.pow(digits);
    Ok(format!("{code:0width$}", width = digits as usize))
}

/// 31-bit value picked from the digest at the offset named by its last nibble.
fn truncate(digest: &[u8]) -> u32 {
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ])
}

/// Code for the step containing `unix_seconds`.
pub fn generate(secret: &[u8], unix_seconds: u64, params: &TotpParameters) -> Result<String> {
    params.validate()?;
    let counter = clock::counter_for(unix_seconds, params.period)?;
    debug!(counter, algorithm = %params.algorithm, digits = params.digits, "totp code generated");
    code_for(secret, counter, params.digits, params.algorithm)
}
