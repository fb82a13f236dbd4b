use anyhow::Result;
use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::UserId;

/// Session lifetime, matching the identity provider's 7 day sessions.
pub const SESSION_TTL_DAYS: i64 = 7;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: UserId,           // Subject: the only source of the user's id
    pub name: String,          // Display name at sign-in
    pub email: String,         // Email at sign-in
    #[serde(default)]
    pub image: Option<String>, // Avatar URL
    #[serde(default)]
    pub email_verified: bool,
    pub exp: i64,              // Expiration timestamp
    pub iat: i64,              // Issued at timestamp
    pub iss: String,           // Issuer
    pub jti: String,           // JWT ID (unique token identifier)
}

/// Who a session token says the caller is. Roles are never carried in the
/// token; they are read from the users table on each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub email_verified: bool,
}

impl From<Claims> for SessionIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            email: claims.email,
            image: claims.image,
            email_verified: claims.email_verified,
        }
    }
}

/// JWT Service - creates and verifies session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    /// Create new JWT service with secret and issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a session token for an identity.
    ///
    /// Production tokens come from the identity provider; this is used by the
    /// seed CLI and tests.
    pub fn create_token(&self, identity: &SessionIdentity) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + Duration::days(SESSION_TTL_DAYS);

        let claims = Claims {
            sub: identity.user_id,
            name: identity.name.clone(),
            email: identity.email.clone(),
            image: identity.image.clone(),
            email_verified: identity.email_verified,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a token
    ///
    /// Returns claims if token is valid and not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}
