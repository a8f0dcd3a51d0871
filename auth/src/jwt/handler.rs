use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::Identity;
use super::errors::JwtError;

/// Default access token lifetime, in seconds.
pub const TOKEN_LIFETIME_SECONDS: i64 = 60 * 60;

/// JWT token handler for issuing and verifying access tokens.
///
/// Uses HS256 (HMAC with SHA-256). Issuing and verifying are pure functions
/// of the token, the secret and the supplied clock reading.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key and the default lifetime.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self::with_lifetime(secret, Duration::seconds(TOKEN_LIFETIME_SECONDS))
    }

    /// Create a new JWT handler issuing tokens valid for `lifetime`.
    pub fn with_lifetime(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime,
        }
    }

    /// Lifetime of tokens issued by this handler.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for `subject`, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if the current time were `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::new(subject, now, self.lifetime);
        self.encode(&claims)
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// See [`JwtHandler::verify_at`].
    pub fn verify(&self, token: &str) -> Result<Identity, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// The signature is checked before the claims are trusted; expiry is
    /// checked last, without leeway.
    ///
    /// # Errors
    /// * `Malformed` - Wrong segment count, bad encoding, unexpected algorithm or claims
    /// * `BadSignature` - Signature does not match the secret
    /// * `Expired` - `now` is at or past the `exp` claim
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, JwtError> {
        let claims = self.decode(token)?;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims.into())
    }

    /// Decode a token and check its signature, without looking at expiry.
    fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against an explicit clock in `verify_at`
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => JwtError::BadSignature,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::TimeZone;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn one_hour() -> Duration {
        Duration::hours(1)
    }

    #[test]
    fn test_issue_and_verify() {
        let handler = JwtHandler::new(SECRET);

        let token = handler.issue("alice").expect("Failed to issue token");
        let identity = handler.verify(&token).expect("Failed to verify token");

        assert_eq!(identity.subject, "alice");
    }

    #[test]
    fn test_token_has_three_base64url_segments() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.issue_at("alice", t0()).unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        for segment in segments {
            assert!(URL_SAFE_NO_PAD.decode(segment).is_ok());
        }
    }

    #[test]
    fn test_payload_claims() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.issue_at("alice", t0()).unwrap();

        let payload = token.split('.').nth(1).unwrap();
        let claims: Claims =
            serde_json_from_segment(payload).expect("Payload is not a claims object");

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iat, t0().timestamp());
        assert_eq!(claims.exp, (t0() + one_hour()).timestamp());
    }

    #[test]
    fn test_issue_is_deterministic_for_fixed_clock() {
        let handler = JwtHandler::new(SECRET);

        assert_eq!(
            handler.issue_at("alice", t0()).unwrap(),
            handler.issue_at("alice", t0()).unwrap()
        );
    }

    #[test]
    fn test_valid_until_expiry() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.issue_at("alice", t0()).unwrap();

        let just_before = t0() + one_hour() - Duration::seconds(1);
        assert_eq!(handler.verify_at(&token, just_before).unwrap().subject, "alice");
    }

    #[test]
    fn test_expired_token() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.issue_at("alice", t0()).unwrap();

        let at_expiry = t0() + one_hour();
        let after_expiry = t0() + one_hour() + Duration::seconds(1);

        assert_eq!(handler.verify_at(&token, at_expiry), Err(JwtError::Expired));
        assert_eq!(handler.verify_at(&token, after_expiry), Err(JwtError::Expired));
    }

    #[test]
    fn test_custom_lifetime() {
        let handler = JwtHandler::with_lifetime(SECRET, Duration::minutes(5));
        let token = handler.issue_at("alice", t0()).unwrap();

        assert!(handler.verify_at(&token, t0() + Duration::minutes(4)).is_ok());
        assert_eq!(
            handler.verify_at(&token, t0() + Duration::minutes(5)),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_flipped_signature_bit_is_rejected() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.issue_at("alice", t0()).unwrap();

        let (signed, signature) = token.rsplit_once('.').unwrap();
        let signature = URL_SAFE_NO_PAD.decode(signature).unwrap();

        for byte in 0..signature.len() {
            for bit in 0..8 {
                let mut tampered = signature.clone();
                tampered[byte] ^= 1 << bit;
                let tampered_token =
                    format!("{}.{}", signed, URL_SAFE_NO_PAD.encode(&tampered));

                assert_eq!(
                    handler.verify_at(&tampered_token, t0()),
                    Err(JwtError::BadSignature),
                    "byte {} bit {}",
                    byte,
                    bit
                );
            }
        }
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.issue_at("alice", t0()).unwrap();
        let forged = handler.issue_at("mallory", t0()).unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        let forged_payload = forged.split('.').nth(1).unwrap();
        let spliced = format!("{}.{}.{}", segments[0], forged_payload, segments[2]);

        assert_eq!(handler.verify_at(&spliced, t0()), Err(JwtError::BadSignature));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1.issue_at("alice", t0()).unwrap();

        assert_eq!(handler2.verify_at(&token, t0()), Err(JwtError::BadSignature));
    }

    #[test]
    fn test_verify_malformed_token() {
        let handler = JwtHandler::new(SECRET);

        for token in ["", "invalid", "invalid.token", "invalid.token.here", "a.b.c.d"] {
            assert!(
                matches!(handler.verify_at(token, t0()), Err(JwtError::Malformed(_))),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_truncated_token_is_rejected() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.issue_at("alice", t0()).unwrap();

        let truncated = &token[..token.len() - 1];
        assert!(handler.verify_at(truncated, t0()).is_err());
    }

    #[test]
    fn test_unsigned_algorithm_is_rejected() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.issue_at("alice", t0()).unwrap();

        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let rest = token.split_once('.').unwrap().1;
        let (payload, _) = rest.split_once('.').unwrap();
        let unsigned = format!("{}.{}.", header, payload);

        assert!(matches!(
            handler.verify_at(&unsigned, t0()),
            Err(JwtError::Malformed(_))
        ));
    }

    fn serde_json_from_segment(segment: &str) -> Option<Claims> {
        let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}
