// uri.rs
// otpauth:// provisioning URIs (Google Authenticator key-URI format).
//
// Format:
//   otpauth://totp/ISSUER:ACCOUNT?secret=BASE32&issuer=ISSUER&algorithm=SHA1&digits=6&period=30

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::Url;

use crate::base32;
use crate::error::{Result, TotpError};
use crate::mac::Algorithm;
use crate::params::{DEFAULT_DIGITS, DEFAULT_PERIOD, TotpParameters};
use crate::secret::Secret;

/// Unreserved characters (RFC 3986) pass through; everything else is percent-encoded.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Build the enrollment URI for a Base32 secret. Issuer and account come from `params`.
pub fn provisioning_uri(secret_b32: &str, params: &TotpParameters) -> Result<String> {
    params.validate()?;
    // Reject garbage early so a QR code never carries an unusable secret.
    let raw = Secret::from_base32(secret_b32)?;
    let secret = base32::encode_nopad(raw.as_bytes());

    let account = utf8_percent_encode(&params.account, COMPONENT);
    let mut uri = if params.issuer.is_empty() {
        format!("otpauth://totp/{account}?secret={secret}")
    } else {
        let issuer = utf8_percent_encode(&params.issuer, COMPONENT).to_string();
        format!("otpauth://totp/{issuer}:{account}?secret={secret}&issuer={issuer}")
    };
    uri.push_str(&format!(
        "&algorithm={}&digits={}&period={}",
        params.algorithm.uri_name(),
        params.digits,
        params.period
    ));
    Ok(uri)
}

/// A parsed provisioning URI.
#[derive(Debug, Clone)]
pub struct ProvisioningUri {
    pub secret: Secret,
    /// Carries issuer and account labels alongside algorithm, digits and period.
    pub params: TotpParameters,
}

impl ProvisioningUri {
    pub fn parse(uri: &str) -> Result<Self> {
        let url = Url::parse(uri).map_err(|e| TotpError::InvalidUri(e.to_string()))?;
        if url.scheme() != "otpauth" {
            return Err(TotpError::InvalidUri(format!(
                "expected scheme 'otpauth', got '{}'",
                url.scheme()
            )));
        }
        match url.host_str() {
            Some("totp") => {}
            other => {
                return Err(TotpError::InvalidUri(format!(
                    "unsupported otp type {other:?}, only totp is handled"
                )));
            }
        }

        let path = url.path().trim_start_matches('/');
        let (label_issuer, account) = match split_label(path) {
            Some((issuer, account)) => (Some(decode_label(issuer)?), decode_label(account)?),
            None => (None, decode_label(path)?),
        };

        let mut secret = None;
        let mut param_issuer = None;
        let mut algorithm = Algorithm::Sha1;
        let mut digits = DEFAULT_DIGITS;
        let mut period = DEFAULT_PERIOD;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "secret" => secret = Some(Secret::from_base32(&value)?),
                "issuer" => param_issuer = Some(value.to_string()),
                "algorithm" => algorithm = value.parse()?,
                "digits" => {
                    digits = value
                        .parse()
                        .map_err(|_| TotpError::config("digits is not a number"))?
                }
                "period" => {
                    period = value
                        .parse()
                        .map_err(|_| TotpError::config("period is not a number"))?
                }
                _ => {}
            }
        }

        let secret =
            secret.ok_or_else(|| TotpError::InvalidUri("missing 'secret' parameter".into()))?;
        let issuer = match (label_issuer, param_issuer) {
            (Some(l), Some(p)) if l != p => {
                return Err(TotpError::InvalidUri(
                    "issuer in label does not match issuer parameter".into(),
                ));
            }
            (_, Some(p)) => p,
            (Some(l), None) => l,
            (None, None) => String::new(),
        };

        let params = TotpParameters::new(algorithm, digits, period)?
            .with_issuer(issuer)
            .with_account(account);
        Ok(Self { secret, params })
    }
}

/// Splits `ISSUER:ACCOUNT`. The separator may be a literal ':' or "%3A"; when a literal one is
/// present, encoded colons before it belong to the issuer.
fn split_label(path: &str) -> Option<(&str, &str)> {
    if let Some(parts) = path.split_once(':') {
        return Some(parts);
    }
    let pos = path.to_ascii_uppercase().find("%3A")?;
    Some((&path[..pos], &path[pos + 3..]))
}

fn decode_label(raw: &str) -> Result<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|label| label.trim().to_string())
        .map_err(|_| TotpError::InvalidUri("label is not valid utf-8".into()))
}
