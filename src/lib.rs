// lib.rs
// Two-factor TOTP core for e-Patrol Log: secret enrollment, code generation and drift-tolerant
// verification (RFC 4226 / RFC 6238). Persistence of secrets is left to the caller.

pub mod base32;
pub mod clock;
pub mod config;
pub mod error;
pub mod mac;
pub mod params;
pub mod qr;
pub mod secret;
pub mod totp;
pub mod uri;
pub mod verify;

pub use config::Settings;
pub use error::{Result, TotpError};
pub use mac::Algorithm;
pub use params::TotpParameters;
pub use secret::{EntropySource, Enrollment, OsEntropy, Secret, SecretManager};
pub use uri::{ProvisioningUri, provisioning_uri};
pub use verify::Verification;

/// New Base32 secret and provisioning URI for `account`, with default parameters.
pub fn generate_secret(account: &str, issuer: &str) -> Result<Enrollment> {
    generate_secret_with(account, issuer, &TotpParameters::default())
}

pub fn generate_secret_with(
    account: &str,
    issuer: &str,
    params: &TotpParameters,
) -> Result<Enrollment> {
    SecretManager::default().generate(account, issuer, params)
}

/// Code for the step containing `now`, with default parameters.
pub fn generate_code(secret_b32: &str, now: u64) -> Result<String> {
    generate_code_with(secret_b32, now, &TotpParameters::default())
}

pub fn generate_code_with(secret_b32: &str, now: u64, params: &TotpParameters) -> Result<String> {
    let secret = Secret::from_base32(secret_b32)?;
    totp::generate(secret.as_bytes(), now, params)
}

/// `Ok(false)` means no step within `window` matched; malformed secrets are `Err(Encoding)`.
pub fn verify_code(secret_b32: &str, submitted: &str, now: u64, window: u32) -> Result<bool> {
    verify_code_with(secret_b32, submitted, now, window, &TotpParameters::default())
}

pub fn verify_code_with(
    secret_b32: &str,
    submitted: &str,
    now: u64,
    window: u32,
    params: &TotpParameters,
) -> Result<bool> {
    let secret = Secret::from_base32(secret_b32)?;
    verify::verify(secret.as_bytes(), submitted, now, params, window)
}
