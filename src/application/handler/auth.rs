use crate::application::config::models::AuthConfig;
use crate::application::service::model::UserId;
use crate::http::headers::{Headers, names as header_names};
use crate::http::cookie::cookie_value;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Session token claims. `user` is preferred; `sub` is accepted for tokens
/// minted by generic JWT tooling.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    exp: i64,
}

/// Resolves the calling user from a bearer token or session cookie.
///
/// Any problem with the token means "anonymous": whether that is acceptable
/// is up to the topic service.
pub struct AuthExtractor {
    key: DecodingKey,
    validation: Validation,
    cookie_name: String,
}

impl AuthExtractor {
    pub fn new(secret: &str, cookie_name: impl Into<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn from_config(auth: &AuthConfig) -> Self {
        Self::new(&auth.jwt_secret, auth.cookie_name.clone())
    }

    pub fn user_id(&self, headers: &Headers) -> Option<UserId> {
        let token = self.token(headers)?;

        match decode::<SessionClaims>(token, &self.key, &self.validation) {
            Ok(data) => data
                .claims
                .user
                .or(data.claims.sub)
                .filter(|user| !user.is_empty())
                .map(UserId::new),
            Err(e) => {
                debug!(error = %e, "ignoring invalid session token");
                None
            }
        }
    }

    fn token<'a>(&self, headers: &'a Headers) -> Option<&'a str> {
        if let Some(authorization) = headers.get(header_names::AUTHORIZATION) {
            if let Some((scheme, token)) = authorization.trim().split_once(' ') {
                if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
                    return Some(token.trim());
                }
            }
        }

        headers
            .get_all(header_names::COOKIE)
            .find_map(|header| cookie_value(header, &self.cookie_name))
            .filter(|token| !token.is_empty())
    }
}

/// Mint an HS256 session token for `user`, valid until `expires_at`
pub fn sign_session_token(
    secret: &str,
    user: &UserId,
    expires_at: DateTime<Utc>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = SessionClaims {
        user: Some(user.as_str().to_string()),
        sub: None,
        exp: expires_at.timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
