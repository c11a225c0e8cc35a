//! URL path handling for GET-style OCSP requests (RFC 6960 Appendix A).
//!
//! A GET request carries `{prefix}{url-encoding of base64 encoding of DER}`.
//! The path arrives still percent-encoded, so escapes such as `%2B`, `%2F`
//! and `%3D` are resolved before base64 decoding.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::ocsp::error::{DecodeError, RelayError};

/// Standard alphabet, padding required, non-zero trailing bits tolerated.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Return the encoded payload that follows `prefix`.
pub fn strip_prefix<'a>(path: &'a str, prefix: &str) -> Result<&'a str, RelayError> {
    if path.len() < prefix.len() {
        return Err(RelayError::PathTooShort {
            len: path.len(),
            prefix_len: prefix.len(),
        });
    }

    path.strip_prefix(prefix).ok_or_else(|| RelayError::PrefixMismatch {
        prefix: prefix.to_string(),
    })
}

/// Decode a payload into raw OCSP request bytes.
///
/// Uses the standard alphabet with mandatory padding. Line breaks are
/// skipped and unused bits in the last symbol are ignored. Invalid input
/// never yields partial bytes.
pub fn decode_payload(encoded: &str, max_len: usize) -> Result<Vec<u8>, DecodeError> {
    if encoded.len() > max_len {
        return Err(DecodeError::TooLarge {
            len: encoded.len(),
            limit: max_len,
        });
    }

    let unescaped = urlencoding::decode_binary(encoded.as_bytes());
    let symbols: Vec<u8> = unescaped
        .iter()
        .copied()
        .filter(|b| *b != b'\r' && *b != b'\n')
        .collect();
    Ok(LENIENT_STANDARD.decode(symbols)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "/ocsp/";

    #[test]
    fn strips_prefix() {
        assert_eq!(strip_prefix("/ocsp/AAE=", PREFIX).unwrap(), "AAE=");
        assert_eq!(strip_prefix("/ocsp/", PREFIX).unwrap(), "");
    }

    #[test]
    fn short_path_is_too_small() {
        let err = strip_prefix("/oc", PREFIX).unwrap_err();
        assert!(matches!(err, RelayError::PathTooShort { len: 3, prefix_len: 6 }));
        assert!(err.to_string().contains("path too small"));
    }

    #[test]
    fn long_path_with_other_prefix_is_rejected() {
        let err = strip_prefix("/status/AAE=", PREFIX).unwrap_err();
        assert!(matches!(err, RelayError::PrefixMismatch { .. }));
    }

    #[test]
    fn decodes_standard_base64() {
        assert_eq!(decode_payload("AAE=", 64).unwrap(), vec![0x00, 0x01]);
        assert_eq!(decode_payload("", 64).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn resolves_percent_escapes_first() {
        // "//8=" carried as it appears in an nginx-issued GET.
        assert_eq!(decode_payload("%2F%2F8%3D", 64).unwrap(), vec![0xff, 0xff]);
        assert_eq!(decode_payload("%2b%2b8%3d", 64).unwrap(), vec![0xfb, 0xef]);
    }

    #[test]
    fn decodes_real_nginx_request() {
        let encoded = "MEIwQDA%2BMDwwOjAJBgUrDgMCGgUABBTWGNJuwZk80d%2BsZ67RB3EB%2Fzi4vQQUEj4XGxG%2B4Jpy2zF8qbpZkyMZ%2B3oCASs%3D";
        let der = decode_payload(encoded, 1024).unwrap();
        // OCSPRequest ::= SEQUENCE, definite short-form length
        assert_eq!(der[0], 0x30);
        assert_eq!(der[1] as usize, der.len() - 2);
    }

    #[test]
    fn tolerates_non_zero_trailing_bits() {
        assert_eq!(decode_payload("AAF=", 64).unwrap(), vec![0x00, 0x01]);
        assert_eq!(decode_payload("AB==", 64).unwrap(), vec![0x00]);
    }

    #[test]
    fn skips_line_breaks() {
        assert_eq!(decode_payload("AA%0D%0AE=", 64).unwrap(), vec![0x00, 0x01]);
        assert_eq!(decode_payload("AA\nE=", 64).unwrap(), vec![0x00, 0x01]);
    }

    #[test]
    fn padding_is_still_required() {
        assert!(decode_payload("AAE", 64).is_err());
        assert!(decode_payload("AB", 64).is_err());
    }

    #[test]
    fn url_safe_alphabet_is_rejected() {
        assert!(matches!(decode_payload("__8=", 64), Err(DecodeError::Base64(_))));
    }

    #[test]
    fn invalid_input_is_an_error() {
        assert!(decode_payload("!!!notbase64!!!", 64).is_err());
        assert!(decode_payload("AAE", 64).is_err());
    }

    #[test]
    fn oversized_payload_is_rejected_before_decoding() {
        let err = decode_payload("AAAAAAAA", 4).unwrap_err();
        assert!(matches!(err, DecodeError::TooLarge { len: 8, limit: 4 }));
    }

    #[test]
    fn inverts_standard_encoding() {
        let samples: [&[u8]; 4] = [b"", b"\x00", b"\x30\x03\x02\x01\x00", &[0xfb; 97]];
        for bytes in samples {
            let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
            assert_eq!(decode_payload(&encoded, 1024).unwrap(), bytes);
        }
    }
}
