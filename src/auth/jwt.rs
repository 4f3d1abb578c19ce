use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::auth::claims::Claims;
use crate::state::AppState;

/// Holds the HMAC signing/verification keys and the token validity window.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub validity: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(
            &state.config.jwt.secret,
            Duration::from_millis(state.config.jwt.validity_ms),
        )
    }
}

impl JwtKeys {
    pub fn new(secret: &str, validity: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validity,
        }
    }

    /// Sign a token for an already-authenticated username.
    pub fn sign(&self, username: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::milliseconds(self.validity.as_millis() as i64);
        let claims = Claims {
            sub: username.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(%username, "jwt signed");
        Ok(token)
    }

    /// Verify signature and expiration, returning the claims on success.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        // no clock-skew allowance: a token past its exp is expired
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(username = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::new(secret, Duration::from_millis(300_000))
    }

    #[test]
    fn sign_and_verify_resolves_subject() {
        let keys = make_keys("dev-secret-dev-secret-dev-secret!");
        let token = keys.sign("alice").expect("sign");
        assert!(!token.is_empty());
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys("dev-secret-dev-secret-dev-secret!");
        // Correct signature, expiration just past; must still be rejected.
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        let claims = Claims {
            sub: "alice".into(),
            iat: now - 90,
            exp: now - 30,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode");
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let good = make_keys("dev-secret-dev-secret-dev-secret!");
        let other = make_keys("another-secret-another-secret-ab");
        let token = good.sign("alice").expect("sign");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_malformed_token() {
        let keys = make_keys("dev-secret-dev-secret-dev-secret!");
        assert!(keys.verify("not-a-jwt").is_err());
    }
}
