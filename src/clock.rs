// clock.rs
// Maps Unix time onto TOTP time steps.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, TotpError};

/// floor(unix_seconds / period). A zero period is a configuration error.
pub fn counter_for(unix_seconds: u64, period: u64) -> Result<u64> {
    if period == 0 {
        return Err(TotpError::config("period must be a positive number of seconds"));
    }
    Ok(unix_seconds / period)
}

/// Seconds until the step containing `unix_seconds` ends.
pub fn seconds_remaining(unix_seconds: u64, period: u64) -> Result<u64> {
    if period == 0 {
        return Err(TotpError::config("period must be a positive number of seconds"));
    }
    Ok(period - unix_seconds % period)
}

/// Current wall-clock time in whole seconds. A clock set before 1970 reads as 0.
pub fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_is_floor_division() {
        assert_eq!(counter_for(0, 30).unwrap(), 0);
        assert_eq!(counter_for(29, 30).unwrap(), 0);
        assert_eq!(counter_for(30, 30).unwrap(), 1);
        assert_eq!(counter_for(59, 30).unwrap(), 1);
        assert_eq!(counter_for(1_111_111_109, 30).unwrap(), 0x023523EC);
        assert_eq!(counter_for(u64::MAX, 1).unwrap(), u64::MAX);
    }

    #[test]
    fn zero_period_is_rejected() {
        assert!(matches!(counter_for(10, 0), Err(TotpError::Config(_))));
        assert!(matches!(seconds_remaining(10, 0), Err(TotpError::Config(_))));
    }

    #[test]
    fn remaining_counts_down_within_step() {
        assert_eq!(seconds_remaining(0, 30).unwrap(), 30);
        assert_eq!(seconds_remaining(29, 30).unwrap(), 1);
        assert_eq!(seconds_remaining(45, 30).unwrap(), 15);
    }

    #[test]
    fn now_is_after_2020() {
        assert!(now_unix() > 1_577_836_800);
    }
}
