//! Identity token generation and verification.
//!
//! Tokens are HS256 JWTs carrying the subject, its role, a unique token id,
//! issuer and audience. They are stateless: nothing is stored server-side and
//! a token stops working when it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::debug;

use super::AuthError;
use crate::models::auth::TokenClaims;
use crate::uuid::uuidv7;

/// Token lifetime in minutes.
pub const TOKEN_TTL_MINUTES: i64 = 30;

/// Minimum signing key length in bytes (HS256 wants at least 256 bits).
pub const MIN_KEY_LEN: usize = 32;

/// Signing key, issuer and audience for identity tokens.
#[derive(Clone)]
pub struct TokenSettings {
    pub key: String,
    pub issuer: String,
    pub audience: String,
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl TokenSettings {
    /// Reads `JWT_KEY`, `JWT_ISSUER` and `JWT_AUDIENCE`. All three are required.
    pub fn from_env() -> Result<Self, AuthError> {
        let settings = Self {
            key: required_env("JWT_KEY")?,
            issuer: required_env("JWT_ISSUER")?,
            audience: required_env("JWT_AUDIENCE")?,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every field is present and the key is long enough.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.key.is_empty() {
            return Err(AuthError::Config("signing key is missing".into()));
        }
        if self.key.len() < MIN_KEY_LEN {
            return Err(AuthError::Config(format!(
                "signing key must be at least {MIN_KEY_LEN} bytes"
            )));
        }
        if self.issuer.trim().is_empty() {
            return Err(AuthError::Config("issuer is missing".into()));
        }
        if self.audience.trim().is_empty() {
            return Err(AuthError::Config("audience is missing".into()));
        }
        Ok(())
    }
}

fn required_env(name: &str) -> Result<String, AuthError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(AuthError::Config(format!("{name} is not set"))),
    }
}

/// Mints and verifies identity tokens with a fixed key, issuer and audience.
pub struct TokenService {
    issuer: String,
    audience: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Build a service from validated settings.
    pub fn new(settings: &TokenSettings) -> Result<Self, AuthError> {
        settings.validate()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_audience(&[settings.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.leeway = 0;

        Ok(Self {
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            encoding: EncodingKey::from_secret(settings.key.as_bytes()),
            decoding: DecodingKey::from_secret(settings.key.as_bytes()),
            validation,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Generate a signed token for `subject` acting as `role`, valid for 30 minutes.
    pub fn generate_token(&self, subject: &str, role: &str) -> Result<String, AuthError> {
        self.generate_token_at(subject, role, Utc::now())
    }

    /// Generate a token as if issued at `issued_at`.
    pub fn generate_token_at(
        &self,
        subject: &str,
        role: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        if subject.is_empty() {
            return Err(AuthError::ValidationError("subject must not be empty".into()));
        }
        if role.is_empty() {
            return Err(AuthError::ValidationError("role must not be empty".into()));
        }

        let claims = TokenClaims {
            sub: subject.to_string(),
            role: role.to_string(),
            jti: uuidv7().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::minutes(TOKEN_TTL_MINUTES)).timestamp(),
        };
        debug!(sub = %claims.sub, jti = %claims.jti, "issuing identity token");

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
    }

    /// Verify a token, returning its claims when the signature, issuer,
    /// audience and expiry all check out.
    pub fn verify(&self, token: &str) -> Option<TokenClaims> {
        match decode::<TokenClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(error = %e, "rejecting identity token");
                None
            }
        }
    }
}

/// Generate a random 64-character signing key.
pub fn generate_signing_key() -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TokenSettings {
        TokenSettings {
            key: "YourSecretKeyToTestTheAppHere1234567890".into(),
            issuer: "your_issuer".into(),
            audience: "your_audience".into(),
        }
    }

    fn service() -> TokenService {
        TokenService::new(&settings()).unwrap()
    }

    #[test]
    fn token_carries_subject_role_and_configured_parties() {
        let tokens = service();
        let token = tokens.generate_token("testuser", "testrole").unwrap();

        let claims = tokens.verify(&token).expect("token verifies");
        assert_eq!("testuser", claims.sub);
        assert_eq!("testrole", claims.role);
        assert!(!claims.jti.is_empty());
        assert_eq!("your_issuer", claims.iss);
        assert_eq!("your_audience", claims.aud);
        assert_eq!(TOKEN_TTL_MINUTES * 60, claims.exp - claims.iat);
    }

    #[test]
    fn tokens_for_same_inputs_differ() {
        let tokens = service();
        let a = tokens.generate_token("admin", "Admin").unwrap();
        let b = tokens.generate_token("admin", "Admin").unwrap();
        assert_ne!(a, b);

        let (ca, cb) = (tokens.verify(&a).unwrap(), tokens.verify(&b).unwrap());
        assert_ne!(ca.jti, cb.jti);
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = service();
        let issued = Utc::now() - Duration::minutes(TOKEN_TTL_MINUTES + 1);
        let token = tokens.generate_token_at("admin", "Admin", issued).unwrap();
        assert!(tokens.verify(&token).is_none());
    }

    #[test]
    fn token_from_other_audience_is_rejected() {
        let token = service().generate_token("admin", "Admin").unwrap();

        let other = TokenService::new(&TokenSettings {
            audience: "someone_else".into(),
            ..settings()
        })
        .unwrap();
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let token = service().generate_token("admin", "Admin").unwrap();

        let other = TokenService::new(&TokenSettings {
            key: generate_signing_key(),
            ..settings()
        })
        .unwrap();
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(service().verify("not.a.token").is_none());
        assert!(service().verify("").is_none());
    }

    #[test]
    fn empty_subject_or_role_is_rejected() {
        let tokens = service();
        assert!(matches!(
            tokens.generate_token("", "Admin"),
            Err(AuthError::ValidationError(_))
        ));
        assert!(matches!(
            tokens.generate_token("admin", ""),
            Err(AuthError::ValidationError(_))
        ));
    }

    #[test]
    fn missing_or_short_settings_are_configuration_errors() {
        let short_key = TokenSettings {
            key: "too-short".into(),
            ..settings()
        };
        assert!(matches!(
            TokenService::new(&short_key),
            Err(AuthError::Config(_))
        ));

        let no_issuer = TokenSettings {
            issuer: String::new(),
            ..settings()
        };
        assert!(matches!(
            TokenService::new(&no_issuer),
            Err(AuthError::Config(_))
        ));

        let no_audience = TokenSettings {
            audience: " ".into(),
            ..settings()
        };
        assert!(matches!(
            TokenService::new(&no_audience),
            Err(AuthError::Config(_))
        ));
    }

    #[test]
    fn debug_output_redacts_key() {
        let rendered = format!("{:?}", settings());
        assert!(!rendered.contains("YourSecretKey"));
        assert!(rendered.contains("your_issuer"));
    }

    #[test]
    fn signing_key_is_long_enough() {
        let key = generate_signing_key();
        assert_eq!(64, key.len());
        assert!(key.len() >= MIN_KEY_LEN);
    }
}
