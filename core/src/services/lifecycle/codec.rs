//! Signed token encoding and decoding

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use dc_shared::config::JwtConfig;

use crate::domain::entities::token::{Claims, TokenCategory, TokenPair};
use crate::errors::TokenError;

/// Encodes and decodes signed tokens
///
/// `decode` verifies signature and structure only. Expiry is judged by
/// [`TokenValidator`](super::TokenValidator) so an expired token can still be
/// told apart from a forged one.
pub trait TokenCodec: Send + Sync {
    /// Signs a token for `username` / `role` that expires `ttl` from now
    fn issue(
        &self,
        category: TokenCategory,
        username: &str,
        role: &str,
        ttl: Duration,
    ) -> Result<String, TokenError>;

    /// Verifies `token` and returns its claims
    fn decode(&self, token: &str) -> Result<Claims, TokenError>;

    /// Mints an access + refresh pair with the standard lifetimes
    fn issue_pair(&self, username: &str, role: &str) -> Result<TokenPair, TokenError> {
        let access = self.issue(TokenCategory::Access, username, role, TokenCategory::Access.ttl())?;
        let refresh = self.issue(TokenCategory::Refresh, username, role, TokenCategory::Refresh.ttl())?;
        Ok(TokenPair::new(access, refresh))
    }
}

/// HMAC-signed JWT codec
pub struct JwtTokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    /// Creates a codec from configuration
    ///
    /// # Returns
    ///
    /// A new `JwtTokenCodec`, or `TokenError::Signing` when the secret is empty
    /// or the algorithm is not an HMAC algorithm
    pub fn new(config: &JwtConfig) -> Result<Self, TokenError> {
        if config.secret.trim().is_empty() {
            return Err(TokenError::Signing {
                message: "signing secret is empty".to_string(),
            });
        }
        let algorithm = parse_algorithm(&config.algorithm)?;

        let mut validation = Validation::new(algorithm);
        // exp stays a required claim, but its value is compared by the validator
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// HS256 codec for `secret`
    pub fn from_secret(secret: &str) -> Result<Self, TokenError> {
        Self::new(&JwtConfig::new(secret))
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(
        &self,
        category: TokenCategory,
        username: &str,
        role: &str,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(category, username, role, Utc::now(), ttl)?;
        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            TokenError::Signing {
                message: e.to_string(),
            }
        })
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected by codec: {}", e);
                TokenError::Malformed
            })
    }
}

fn parse_algorithm(name: &str) -> Result<Algorithm, TokenError> {
    match name.to_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(TokenError::Signing {
            message: format!("unsupported signing algorithm: {}", other),
        }),
    }
}
