// secret.rs
// Shared secrets: generation from the OS CSPRNG, Base32 form, and enrollment bundles.

use std::fmt;

use rand::{TryRngCore, rngs::OsRng};
use serde::Serialize;
use tracing::{info, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::base32;
use crate::error::{Result, TotpError};
use crate::params::TotpParameters;
use crate::qr;
use crate::uri::provisioning_uri;

pub const MIN_SECRET_BYTES: usize = 16; // 128 bits (mandatory minimum)
pub const DEFAULT_SECRET_BYTES: usize = 20; // 160 bits (recommended)

/// Raw secret bytes. Wiped on drop; `Debug` never prints them.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    bytes: Vec<u8>,
}

impl Secret {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Blank text is refused: an empty key would make every code public.
    pub fn from_base32(text: &str) -> Result<Self> {
        let bytes = base32::decode(text)?;
        if bytes.is_empty() {
            return Err(TotpError::Encoding("empty secret".into()));
        }
        Ok(Self::from_bytes(bytes))
    }

    pub fn to_base32(&self) -> String {
        base32::encode(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(<{} bytes redacted>)", self.bytes.len())
    }
}

/// Source of secret bytes. Implementations must be cryptographically secure.
pub trait EntropySource {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// Operating-system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| TotpError::EntropySource(e.to_string()))
    }
}

/// What an enrollment hands back: the Base32 secret to persist and the URI to show as a QR code.
#[derive(Clone, Serialize)]
pub struct Enrollment {
    pub secret: String,
    pub provisioning_uri: String,
}

impl Enrollment {
    pub fn qr_png(&self, min_size: u32) -> Result<Vec<u8>> {
        qr::render_png(&self.provisioning_uri, min_size)
    }

    pub fn qr_terminal(&self) -> Result<String> {
        qr::render_terminal(&self.provisioning_uri)
    }
}

impl fmt::Debug for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Enrollment(<redacted>)")
    }
}

impl Drop for Enrollment {
    fn drop(&mut self) {
        self.secret.zeroize();
        self.provisioning_uri.zeroize();
    }
}

pub struct SecretManager<E = OsEntropy> {
    entropy: E,
    secret_bytes: usize,
}

impl SecretManager<OsEntropy> {
    pub fn new(secret_bytes: usize) -> Result<Self> {
        Self::with_entropy(OsEntropy, secret_bytes)
    }
}

impl Default for SecretManager<OsEntropy> {
    fn default() -> Self {
        Self {
            entropy: OsEntropy,
            secret_bytes: DEFAULT_SECRET_BYTES,
        }
    }
}

impl<E: EntropySource> SecretManager<E> {
    /// Secrets shorter than 128 bits are refused rather than padded up.
    pub fn with_entropy(entropy: E, secret_bytes: usize) -> Result<Self> {
        if secret_bytes < MIN_SECRET_BYTES {
            return Err(TotpError::config(format!(
                "secret too short: {secret_bytes} bytes, need >= {MIN_SECRET_BYTES} ({} bits)",
                MIN_SECRET_BYTES * 8
            )));
        }
        Ok(Self {
            entropy,
            secret_bytes,
        })
    }

    pub fn secret_bytes(&self) -> usize {
        self.secret_bytes
    }

    /// Fresh random secret. Entropy failure aborts; there is no fallback generator.
    pub fn new_secret(&mut self) -> Result<Secret> {
        let mut secret = Secret::from_bytes(vec![0u8; self.secret_bytes]);
        if let Err(e) = self.entropy.fill(&mut secret.bytes) {
            warn!(error = %e, "secure random source failed during secret generation");
            return Err(e);
        }
        Ok(secret)
    }

    /// Enroll `account` under `issuer`: new secret plus the otpauth URI built from it.
    pub fn generate(
        &mut self,
        account: &str,
        issuer: &str,
        params: &TotpParameters,
    ) -> Result<Enrollment> {
        params.validate()?;
        let secret = self.new_secret()?;
        let labelled = params.clone().with_issuer(issuer).with_account(account);
        let encoded = secret.to_base32();
        let uri = provisioning_uri(&encoded, &labelled)?;
        info!(
            account,
            issuer,
            algorithm = %labelled.algorithm,
            digits = labelled.digits,
            period = labelled.period,
            "totp secret enrolled"
        );
        Ok(Enrollment {
            secret: encoded,
            provisioning_uri: uri,
        })
    }
}
