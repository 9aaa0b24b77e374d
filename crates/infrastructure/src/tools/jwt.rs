//! JWT inspection without signature verification.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

/// Errors raised while decoding a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JwtError {
    /// The token does not have exactly three segments.
    #[error("Invalid JWT format: The token must have three parts separated by dots.")]
    InvalidFormat,

    /// A segment is not base64url.
    #[error("Decoding Error: {part} is not valid base64url: {message}")]
    Base64 {
        /// `header` or `payload`
        part: &'static str,
        /// Decoder message
        message: String,
    },

    /// A segment decodes to something other than JSON.
    #[error("Decoding Error: {part} is not valid JSON: {message}")]
    Json {
        /// `header` or `payload`
        part: &'static str,
        /// Parser message
        message: String,
    },
}

/// Header and payload of a token. The signature is kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedJwt {
    /// Decoded header
    pub header: Value,
    /// Decoded claims
    pub payload: Value,
    /// Third segment, undecoded
    pub signature: String,
}

impl DecodedJwt {
    /// Reads a string claim from the header.
    #[must_use]
    pub fn algorithm(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    /// Reads a numeric claim from the payload, e.g. `exp` or `iat`.
    #[must_use]
    pub fn timestamp_claim(&self, claim: &str) -> Option<i64> {
        self.payload.get(claim).and_then(Value::as_i64)
    }
}

/// Decodes the header and payload of `token`.
///
/// Surrounding whitespace is ignored and padded segments are accepted.
///
/// # Errors
///
/// Returns [`JwtError::InvalidFormat`] unless the token has three parts, and
/// a decoding error when the header or payload is not base64url JSON.
pub fn decode_jwt(token: &str) -> Result<DecodedJwt, JwtError> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    let [header, payload, signature] = parts.as_slice() else {
        return Err(JwtError::InvalidFormat);
    };

    Ok(DecodedJwt {
        header: decode_segment("header", header)?,
        payload: decode_segment("payload", payload)?,
        signature: (*signature).to_string(),
    })
}

fn decode_segment(part: &'static str, segment: &str) -> Result<Value, JwtError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| JwtError::Base64 {
            part,
            message: e.to_string(),
        })?;
    serde_json::from_slice(&bytes).map_err(|e| JwtError::Json {
        part,
        message: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn encode(value: &Value) -> String {
        URL_SAFE_NO_PAD.encode(value.to_string())
    }

    fn token(header: &Value, payload: &Value) -> String {
        format!("{}.{}.sig", encode(header), encode(payload))
    }

    #[test]
    fn test_decodes_header_and_payload() {
        let header = json!({"alg": "HS256", "typ": "JWT"});
        let payload = json!({"sub": "42", "name": "Ada Lövelace", "exp": 1_700_000_000});
        let decoded = decode_jwt(&format!("  {}\n", token(&header, &payload))).unwrap();

        assert_eq!(decoded.header, header);
        assert_eq!(decoded.payload, payload);
        assert_eq!(decoded.signature, "sig");
        assert_eq!(decoded.algorithm(), Some("HS256"));
        assert_eq!(decoded.timestamp_claim("exp"), Some(1_700_000_000));
    }

    #[test]
    fn test_requires_three_parts() {
        for bad in ["", "a.b", "a.b.c.d"] {
            assert_eq!(decode_jwt(bad).unwrap_err(), JwtError::InvalidFormat);
        }
        assert_eq!(
            JwtError::InvalidFormat.to_string(),
            "Invalid JWT format: The token must have three parts separated by dots."
        );
    }

    #[test]
    fn test_padded_segments_are_accepted() {
        let header = base64::engine::general_purpose::URL_SAFE.encode(r#"{"alg":"none"}"#);
        let payload = base64::engine::general_purpose::URL_SAFE.encode("{}");
        let decoded = decode_jwt(&format!("{header}.{payload}.")).unwrap();
        assert_eq!(decoded.algorithm(), Some("none"));
    }

    #[test]
    fn test_bad_segments() {
        assert!(matches!(
            decode_jwt("***.e30.x"),
            Err(JwtError::Base64 { part: "header", .. })
        ));
        let not_json = URL_SAFE_NO_PAD.encode("hello");
        assert!(matches!(
            decode_jwt(&format!("e30.{not_json}.x")),
            Err(JwtError::Json { part: "payload", .. })
        ));
    }
}
