use std::fmt;

use axum::{
    extract::{Request, State},
    http,
    middleware::Next,
    response::Response,
    Extension,
};
use chrono::Utc;
use entity::prelude::*;
use jsonwebtoken::{
    errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiError, ApiState};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn viewer(&self) -> Viewer {
        Viewer::Owner(self.sub)
    }
}

/// Viewer of a route that is served both publicly and behind [`auth`].
pub fn viewer(claims: Option<Extension<Claims>>) -> Viewer {
    claims.map_or(Viewer::Anonymous, |Extension(claims)| claims.viewer())
}

/// HS256 signing and verification keys derived from one secret.
#[derive(Clone)]
pub struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys").finish_non_exhaustive()
    }
}

impl Keys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, user_id: Uuid, exp_secs: u64) -> anyhow::Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + i64::try_from(exp_secs)?,
        };

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::new(Algorithm::HS256);

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    ApiError::AuthError("JWT token is expired".to_string())
                }
                _ => ApiError::AuthError("Invalid JWT token".to_string()),
            })
    }
}

/// Requires `Authorization: Bearer <token>` and hands the verified
/// [`Claims`] to handlers as an extension.
pub async fn auth(
    State(state): State<ApiState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let Some(auth_header) = auth_header else {
        return Err(ApiError::AuthError("JWT token required".to_string()));
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return Err(ApiError::AuthError("Invalid JWT token".to_string()));
    };

    let claims = state.keys.verify(token.trim())?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_issued_token_verifies() {
        let keys = Keys::new(b"secret");
        let user_id = Uuid::new_v4();

        let token = keys.issue(user_id, 60).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, 60);
        assert_eq!(claims.viewer(), Viewer::Owner(user_id));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Arrange
        let keys = Keys::new(b"secret");
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        // Act
        let result = keys.verify(&token);

        // Assert
        let Err(ApiError::AuthError(message)) = result else {
            panic!("expected an auth error");
        };
        assert_eq!(message, "JWT token is expired");
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let token = Keys::new(b"other").issue(Uuid::new_v4(), 60).unwrap();

        let result = Keys::new(b"secret").verify(&token);

        assert!(matches!(result, Err(ApiError::AuthError(_))));
    }
}
