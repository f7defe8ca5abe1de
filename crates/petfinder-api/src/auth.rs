// ============================================================================
// PetFinder API - Authentication
// File: crates/petfinder-api/src/auth.rs
// ============================================================================
//! Bearer token verification and the authenticated session extractor

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use petfinder_core::Session;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Claims issued by the hosted auth backend.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Owner UUID
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Session, ApiError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))?;

        let owner_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| ApiError::Unauthorized("Token subject is not a user id".into()))?;

        Ok(match data.claims.email {
            Some(email) => Session::with_email(owner_id, email),
            None => Session::new(owner_id),
        })
    }
}

/// The signed-in owner of the current request.
pub struct AuthSession(pub Session);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Expected a Bearer token".into()))?;

        state.jwt.verify(token).map(AuthSession)
    }
}
