//! Self-signed service account tokens
//!
//! Google APIs accept a JWT signed with the service account key directly as
//! a bearer token, so no OAuth token exchange is needed.

use crate::config::ServiceAccountKey;
use crate::error::{ConfigError, RemoteQueryError};
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

pub const DATA_API_AUDIENCE: &str = "https://analyticsdata.googleapis.com/";

/// Maximum lifetime Google accepts for a self-signed token
const TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs bearer tokens for one service account
pub struct TokenSigner {
    client_email: String,
    key_id: Option<String>,
    key: EncodingKey,
}

impl TokenSigner {
    pub fn new(credentials: &ServiceAccountKey) -> Result<Self, ConfigError> {
        let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
            .map_err(|e| ConfigError::InvalidCredentials(format!("private key: {e}")))?;

        Ok(Self {
            client_email: credentials.client_email.clone(),
            key_id: credentials.private_key_id.clone(),
            key,
        })
    }

    pub fn claims(&self, now: DateTime<Utc>) -> Claims {
        let iat = now.timestamp();
        Claims {
            iss: self.client_email.clone(),
            sub: self.client_email.clone(),
            aud: DATA_API_AUDIENCE.to_string(),
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        }
    }

    /// Mint a fresh token valid from `now`
    pub fn sign(&self, now: DateTime<Utc>) -> Result<String, RemoteQueryError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();

        encode(&header, &self.claims(now), &self.key)
            .map_err(|e| RemoteQueryError::Auth(format!("failed to sign token: {e}")))
    }
}
