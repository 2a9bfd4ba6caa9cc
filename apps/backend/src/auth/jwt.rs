use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Claims included in our backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// External user identifier (users.sub)
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Token lifetime: 24 hours, gift exchanges are not high-security surfaces.
const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Mint a HS256 JWT access token.
pub fn mint_access_token(
    sub: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify JWT and return claims.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    // Default Validation already checks exp; pin algorithm to configured algorithm.
    let validation = Validation::new(security.algorithm);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::{mint_access_token, verify_access_token};
    use crate::error::AppError;
    use crate::state::security_config::SecurityConfig;

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let security = SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes());

        let sub = "test-sub-roundtrip-123";
        let token = mint_access_token(sub, SystemTime::now(), &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.sub, sub);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let security = SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes());

        // Mint a token issued far enough in the past that it is already expired.
        let past = SystemTime::now() - Duration::from_secs(48 * 60 * 60);
        let token = mint_access_token("expired-sub", past, &security).unwrap();

        let err = verify_access_token(&token, &security).unwrap_err();
        assert!(matches!(err, AppError::UnauthorizedExpiredJwt));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let security = SecurityConfig::new("secret_a_secret_a_secret_a_secret".as_bytes());
        let other = SecurityConfig::new("secret_b_secret_b_secret_b_secret".as_bytes());

        let token = mint_access_token("some-sub", SystemTime::now(), &security).unwrap();
        let err = verify_access_token(&token, &other).unwrap_err();
        assert!(matches!(err, AppError::UnauthorizedInvalidJwt));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let security = SecurityConfig::default();
        let err = verify_access_token("not-a-jwt", &security).unwrap_err();
        assert!(matches!(err, AppError::UnauthorizedInvalidJwt));
    }
}
