#![allow(dead_code)]

use epatrol_totp::{Algorithm, TotpParameters, base32};

/// RFC 6238 appendix B seeds, one per hash function.
pub const SEED_SHA1: &[u8] = b"12345678901234567890";
pub const SEED_SHA256: &[u8] = b"12345678901234567890123456789012";
pub const SEED_SHA512: &[u8] =
    b"1234567890123456789012345678901234567890123456789012345678901234";

pub fn seed_for(algorithm: Algorithm) -> &'static [u8] {
    match algorithm {
        Algorithm::Sha1 => SEED_SHA1,
        Algorithm::Sha256 => SEED_SHA256,
        Algorithm::Sha512 => SEED_SHA512,
    }
}

pub fn seed_b32(algorithm: Algorithm) -> String {
    base32::encode(seed_for(algorithm))
}

pub fn params(algorithm: Algorithm, digits: u32) -> TotpParameters {
    TotpParameters::new(algorithm, digits, 30).expect("valid test parameters")
}

/// Independent implementation used as a cross-check.
pub fn reference_totp(secret: &[u8], params: &TotpParameters) -> totp_rs::TOTP {
    let algorithm = match params.algorithm {
        Algorithm::Sha1 => totp_rs::Algorithm::SHA1,
        Algorithm::Sha256 => totp_rs::Algorithm::SHA256,
        Algorithm::Sha512 => totp_rs::Algorithm::SHA512,
    };
    totp_rs::TOTP::new(
        algorithm,
        params.digits as usize,
        1,
        params.period,
        secret.to_vec(),
        Some("e-Patrol Log".to_string()),
        "guard@example.com".to_string(),
    )
    .expect("reference totp")
}
