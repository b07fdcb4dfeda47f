//! Request extractor for [`AuthenticatedUser`].
//!
//! The token is taken from the session identity when one is present and from
//! an `Authorization: Bearer` header otherwise. Both carry an HS256 JWT signed
//! with the configured secret.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::envelope::ErrorEnvelope;
use crate::models::config::ServerConfig;

fn unauthorized(reason: &str) -> actix_web::Error {
    log::debug!("Rejecting request: {reason}");
    InternalError::from_response(
        reason.to_string(),
        HttpResponse::Unauthorized().json(ErrorEnvelope::new("Unauthorized")),
    )
    .into()
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

fn request_token(req: &HttpRequest) -> Option<String> {
    req.get_identity()
        .ok()
        .and_then(|identity| identity.id().ok())
        .or_else(|| bearer_token(req))
}

/// Verifies `token` and returns its claims.
pub fn decode_token(
    token: &str,
    secret: &str,
) -> Result<AuthenticatedUser, jsonwebtoken::errors::Error> {
    decode::<AuthenticatedUser>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

/// Signs `user` as an HS256 JWT.
pub fn encode_token(
    user: &AuthenticatedUser,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        user,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| unauthorized("server config is not registered"))?;
    let token = request_token(req).ok_or_else(|| unauthorized("missing token"))?;

    decode_token(&token, &config.secret).map_err(|err| unauthorized(&err.to_string()))
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(exp: usize) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "7".to_string(),
            email: "inspector@example.com".to_string(),
            name: "Inspector".to_string(),
            account_id: 1,
            roles: vec!["inspect".to_string()],
            exp,
        }
    }

    #[test]
    fn token_round_trips_with_the_same_secret() {
        let claims = user(4_102_444_800);
        let token = encode_token(&claims, "secret").unwrap();
        assert_eq!(decode_token(&token, "secret").unwrap(), claims);
        assert!(decode_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = encode_token(&user(1_000), "secret").unwrap();
        assert!(decode_token(&token, "secret").is_err());
    }
}
