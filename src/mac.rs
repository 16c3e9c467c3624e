// mac.rs
// Keyed HMAC over SHA-1 / SHA-256 / SHA-512.

use std::{fmt, str::FromStr};

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::{Result, TotpError};

/// Hash function behind the HMAC. SHA-1 is what Google Authenticator and friends expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    /// Name used in the `algorithm=` parameter of otpauth URIs.
    pub fn uri_name(self) -> &'static str {
        match self {
            Algorithm::Sha1 => "SHA1",
            Algorithm::Sha256 => "SHA256",
            Algorithm::Sha512 => "SHA512",
        }
    }

    pub fn digest_len(self) -> usize {
        match self {
            Algorithm::Sha1 => 20,
            Algorithm::Sha256 => 32,
            Algorithm::Sha512 => 64,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri_name())
    }
}

impl FromStr for Algorithm {
    type Err = TotpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().replace('-', "").as_str() {
            "SHA1" => Ok(Algorithm::Sha1),
            "SHA256" => Ok(Algorithm::Sha256),
            "SHA512" => Ok(Algorithm::Sha512),
            other => Err(TotpError::config(format!(
                "unsupported algorithm {other:?}, expected SHA1, SHA256 or SHA512"
            ))),
        }
    }
}

/// HMAC(key, message). Deterministic, no state kept between calls.
pub fn hmac(key: &[u8], message: &[u8], algorithm: Algorithm) -> Result<Vec<u8>> {
    match algorithm {
        Algorithm::Sha1 => keyed::<Hmac<Sha1>>(key, message),
        Algorithm::Sha256 => keyed::<Hmac<Sha256>>(key, message),
        Algorithm::Sha512 => keyed::<Hmac<Sha512>>(key, message),
    }
}

fn keyed<M: Mac + hmac::digest::KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|_| TotpError::config("hmac rejected key length"))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}
