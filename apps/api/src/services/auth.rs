//! Access token verification
//!
//! Tokens are issued by the hosted auth provider and signed with HS256 using
//! the project's JWT secret. This service only verifies them; sign-in,
//! refresh and session handling live with the provider.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Audience the provider stamps on tokens of signed-in users
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Claims carried by a provider access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    /// Provider role, `authenticated` for regular users
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry (seconds since the epoch)
    pub exp: i64,
}

/// The authenticated user a GraphQL request runs as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl From<Claims> for Viewer {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

/// Verifies provider-issued access tokens
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for tokens signed with `jwt_secret`
    pub fn new(jwt_secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);

        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify an access token and return its claims
    ///
    /// # Errors
    /// `ApiError::InvalidToken` when the signature, expiry or audience
    /// check fails
    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(error = %e, "Access token verification failed");
                ApiError::InvalidToken(e.to_string())
            })?;

        Ok(token_data.claims)
    }
}
