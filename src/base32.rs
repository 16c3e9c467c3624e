// base32.rs
// RFC 4648 Base32 text form of shared secrets (A-Z, 2-7, optional '=' padding).

use data_encoding::{BASE32, BASE32_NOPAD, Encoding};

use crate::error::{Result, TotpError};

/// Encode bytes as padded Base32 (output length is a multiple of 8).
pub fn encode(bytes: &[u8]) -> String {
    BASE32.encode(bytes)
}

/// Encode bytes as Base32 without trailing '='. This is the form authenticator apps expect in URIs.
pub fn encode_nopad(bytes: &[u8]) -> String {
    BASE32_NOPAD.encode(bytes)
}

/// Unpadded RFC 4648 alphabet that maps lowercase onto uppercase and drops leftover bits
/// in the last symbol, as authenticator apps do for hand-typed secrets.
fn lenient() -> Result<Encoding> {
    let mut spec = BASE32_NOPAD.specification();
    spec.check_trailing_bits = false;
    spec.translate.from.push_str("abcdefghijklmnopqrstuvwxyz");
    spec.translate.to.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    spec.encoding().map_err(|e| TotpError::Encoding(format!("base32 alphabet: {e}")))
}

/// Decode Base32 text. Lowercase is accepted and trailing padding is ignored.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim_end_matches('=');
    if let Some(pos) = trimmed.find(|c: char| !c.is_ascii_alphanumeric()) {
        return Err(TotpError::Encoding(format!(
            "unexpected character at position {pos}"
        )));
    }
    lenient()?
        .decode(trimmed.as_bytes())
        .map_err(|e| TotpError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_rfc4648_vectors() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "MY======");
        assert_eq!(encode(b"fo"), "MZXQ====");
        assert_eq!(encode(b"foo"), "MZXW6===");
        assert_eq!(encode(b"foob"), "MZXW6YQ=");
        assert_eq!(encode(b"fooba"), "MZXW6YTB");
        assert_eq!(encode(b"foobar"), "MZXW6YTBOI======");
        assert_eq!(encode_nopad(b"foobar"), "MZXW6YTBOI");
    }

    #[test]
    fn decodes_padded_unpadded_and_lowercase() {
        assert_eq!(decode("MZXW6YTBOI======").unwrap(), b"foobar");
        assert_eq!(decode("MZXW6YTBOI").unwrap(), b"foobar");
        assert_eq!(decode("mzxw6ytboi").unwrap(), b"foobar");
        assert_eq!(
            decode("CI2FM6E2XQ======").unwrap(),
            [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc]
        );
    }

    #[test]
    fn rejects_symbols_outside_alphabet() {
        assert!(matches!(decode("MZXW6YTB0I"), Err(TotpError::Encoding(_))));
        assert!(matches!(decode("MZXW1YTB"), Err(TotpError::Encoding(_))));
        assert!(matches!(decode("MZXW 6YTB"), Err(TotpError::Encoding(_))));
        assert!(matches!(decode("MZ=XW6YTB"), Err(TotpError::Encoding(_))));
    }

    #[test]
    fn ignores_leftover_bits_in_last_symbol() {
        // 'J' carries one more set bit than "foobar" needs.
        assert_eq!(decode("MZXW6YTBOJ").unwrap(), b"foobar");
        assert_eq!(decode("mzxw6ytboj").unwrap(), b"foobar");
        let typed = decode("JBSWY3DPEHPK3PXPJBSWY3DPEH").unwrap();
        assert_eq!(typed.len(), 16);
        assert_eq!(&typed[..10], &decode("JBSWY3DPEHPK3PXP").unwrap()[..]);
    }

    #[test]
    fn empty_text_decodes_to_nothing() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("========").unwrap().is_empty());
    }

    /// 1, 3 and 6 symbols past a full group cannot come from any byte count.
    #[test]
    fn rejects_impossible_lengths() {
        assert!(matches!(decode("M"), Err(TotpError::Encoding(_))));
        assert!(matches!(decode("MZX"), Err(TotpError::Encoding(_))));
    }

    #[test]
    fn error_message_does_not_echo_input() {
        let err = decode("SECRETS!").unwrap_err();
        assert!(!err.to_string().contains("SECRETS"));
    }
}
