use crate::domain::error::{AppError, Result};
use crate::domain::user::User;
use crate::interfaces::http::AppState;
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use sha2::{Digest, Sha256};
use std::future::Future;
use std::pin::Pin;

/// The resolved owner of the request. Extracted from the bearer token;
/// handlers scope every query by `user.id`.
pub struct AuthenticatedUser(pub User);

pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.trim().as_bytes()))
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    header
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::Internal("App state missing".to_string()))?;

            let token = bearer_token(&req)
                .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

            state
                .users
                .find_by_token_hash(&hash_token(&token))
                .await?
                .map(AuthenticatedUser)
                .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_and_trims() {
        assert_eq!(hash_token("secret"), hash_token("  secret  "));
        assert_ne!(hash_token("secret"), hash_token("other"));
        // SHA-256 hex digest length.
        assert_eq!(hash_token("secret").len(), 64);
    }
}
