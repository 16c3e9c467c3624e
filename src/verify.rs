// verify.rs
// Checks a submitted code against the steps around "now" to absorb client clock drift.

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::clock;
use crate::error::{Result, TotpError};
use crate::params::TotpParameters;
use crate::totp;

/// Outcome of a verification. `Rejected` is an expected result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// `counter` is the step that matched, `offset` its distance from the current step.
    /// Callers that block replays persist `counter` and refuse it next time.
    Accepted { counter: u64, offset: i64 },
    Rejected,
}

impl Verification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verification::Accepted { .. })
    }
}

/// Offsets 0, -1, +1, -2, +2, ... up to `window`.
fn offsets(window: u32) -> impl Iterator<Item = i64> {
    std::iter::once(0).chain((1..=i64::from(window)).flat_map(|d| [-d, d]))
}

/// Byte-wise constant-time equality; lengths are compared up front since they are public.
fn codes_match(candidate: &str, submitted: &str) -> bool {
    candidate.len() == submitted.len()
        && bool::from(candidate.as_bytes().ct_eq(submitted.as_bytes()))
}

/// Verify `submitted` against every step within `window` of the step containing `now`.
///
/// A submission that is not exactly `params.digits` ASCII digits is rejected before any HMAC
/// is computed. Steps that would fall below zero are skipped. An empty secret is an error.
pub fn verify_detailed(
    secret: &[u8],
    submitted: &str,
    now: u64,
    params: &TotpParameters,
    window: u32,
) -> Result<Verification> {
    params.validate()?;
    if secret.is_empty() {
        return Err(TotpError::Encoding("empty secret".into()));
    }
    let well_formed =
        submitted.len() == params.digits as usize && submitted.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        debug!(digits = params.digits, "totp submission has wrong shape");
        return Ok(Verification::Rejected);
    }

    let center = clock::counter_for(now, params.period)?;
    for offset in offsets(window) {
        let Some(counter) = center.checked_add_signed(offset) else {
            continue;
        };
        let candidate = totp::code_for(secret, counter, params.digits, params.algorithm)?;
        if codes_match(&candidate, submitted) {
            debug!(counter, offset, "totp code accepted");
            return Ok(Verification::Accepted { counter, offset });
        }
    }

    debug!(center, window, "totp code rejected");
    Ok(Verification::Rejected)
}

pub fn verify(
    secret: &[u8],
    submitted: &str,
    now: u64,
    params: &TotpParameters,
    window: u32,
) -> Result<bool> {
    verify_detailed(secret, submitted, now, params, window).map(|v| v.is_accepted())
}
