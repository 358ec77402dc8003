/// Shared JWT validation module for AirCanvas services
///
/// Access tokens are issued by the auth component and signed with a shared
/// HMAC secret. Services that only consume tokens call
/// [`initialize_jwt_secret`] once at startup and then use [`validate_token`].
///
/// ## Security Design
///
/// - **HMAC family only** (HS256/HS384/HS512): the validation key is the same
///   shared secret, so asymmetric algorithm names are rejected at startup.
/// - **Single algorithm per process**: tokens signed with any other algorithm
///   fail validation, which prevents algorithm confusion.
/// - **Thread-safe**: keys loaded once, immutable thereafter.
///
/// ## Usage
///
/// ```rust,no_run
/// use crypto_core::jwt;
///
/// let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET required");
/// jwt::initialize_jwt_secret(&secret, "HS256").expect("Failed to initialize JWT keys");
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

/// Lifetime of tokens minted by [`generate_access_token`] (one day).
const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 60 * 24;

// ============================================================================
// Data Structures
// ============================================================================

/// JWT claims shared with the token issuer.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp); older issuers omit it
    #[serde(default)]
    pub iat: i64,
    /// Admin hint set by the issuer. Services must not authorize on it.
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT keys not initialized. Call initialize_jwt_secret() during startup.")]
    NotInitialized,

    #[error("JWT keys already initialized")]
    AlreadyInitialized,

    #[error("JWT secret must not be empty")]
    EmptySecret,

    #[error("Unsupported JWT algorithm '{0}' (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Token validation failed: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid token subject")]
    InvalidSubject,
}

pub type Result<T> = std::result::Result<T, JwtError>;

struct JwtKeys {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

// ============================================================================
// Key Storage
// ============================================================================

static JWT_KEYS: OnceCell<JwtKeys> = OnceCell::new();

// ============================================================================
// Initialization
// ============================================================================

/// Parse an algorithm name, accepting only the HMAC family.
pub fn parse_algorithm(name: &str) -> Result<Algorithm> {
    let algorithm = Algorithm::from_str(name.trim())
        .map_err(|_| JwtError::UnsupportedAlgorithm(name.to_string()))?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        _ => Err(JwtError::UnsupportedAlgorithm(name.to_string())),
    }
}

/// Initialize the process-wide JWT keys from a shared secret.
///
/// Can only be called once; subsequent calls return
/// [`JwtError::AlreadyInitialized`].
pub fn initialize_jwt_secret(secret: &str, algorithm: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(JwtError::EmptySecret);
    }

    let algorithm = parse_algorithm(algorithm)?;
    let keys = JwtKeys {
        algorithm,
        encoding: EncodingKey::from_secret(secret.as_bytes()),
        decoding: DecodingKey::from_secret(secret.as_bytes()),
    };

    JWT_KEYS
        .set(keys)
        .map_err(|_| JwtError::AlreadyInitialized)
}

/// Whether [`initialize_jwt_secret`] has already run in this process.
pub fn is_initialized() -> bool {
    JWT_KEYS.get().is_some()
}

fn keys() -> Result<&'static JwtKeys> {
    JWT_KEYS.get().ok_or(JwtError::NotInitialized)
}

// ============================================================================
// Token Generation
// ============================================================================

/// Mint an access token for `user_id`.
///
/// Token issuance belongs to the auth component; this exists for tooling and
/// tests that need a token the service will accept.
pub fn generate_access_token(user_id: Uuid, is_admin: bool) -> Result<String> {
    generate_token_with_ttl(user_id, is_admin, Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES))
}

/// Mint a token with an explicit lifetime. A negative `ttl` yields a token
/// that is already expired.
pub fn generate_token_with_ttl(user_id: Uuid, is_admin: bool, ttl: Duration) -> Result<String> {
    let keys = keys()?;
    let now = Utc::now();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
        is_admin,
    };

    Ok(encode(&Header::new(keys.algorithm), &claims, &keys.encoding)?)
}

// ============================================================================
// Token Validation
// ============================================================================

/// Validate and decode a JWT token (without the "Bearer " prefix).
///
/// Verifies the signature with the configured algorithm and rejects expired
/// tokens. No leeway is granted on `exp`.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let keys = keys()?;

    let mut validation = Validation::new(keys.algorithm);
    validation.validate_exp = true;
    validation.leeway = 0;

    Ok(decode::<Claims>(token, &keys.decoding, &validation)?)
}

/// Extract the user ID from a validated token.
pub fn get_user_id_from_token(token: &str) -> Result<Uuid> {
    let token_data = validate_token(token)?;
    Uuid::parse_str(&token_data.claims.sub).map_err(|_| JwtError::InvalidSubject)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "crypto-core-test-secret";

    fn init_test_keys() {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            initialize_jwt_secret(TEST_SECRET, "HS256").expect("Failed to initialize test keys");
        });
    }

    #[test]
    fn test_generate_and_validate_token() {
        init_test_keys();

        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, false).expect("Failed to generate token");
        assert_eq!(token.matches('.').count(), 2);

        let data = validate_token(&token).expect("token should validate");
        assert_eq!(data.claims.sub, user_id.to_string());
        assert!(!data.claims.is_admin);
    }

    #[test]
    fn test_validate_invalid_token() {
        init_test_keys();
        assert!(validate_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_validate_tampered_token() {
        init_test_keys();

        let token = generate_access_token(Uuid::new_v4(), false).expect("Failed to generate token");
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[2] = parts[2].chars().rev().collect();
        let tampered = parts.join(".");

        assert!(validate_token(&tampered).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        init_test_keys();

        let token = generate_token_with_ttl(Uuid::new_v4(), false, Duration::minutes(-5))
            .expect("Failed to generate token");
        assert!(matches!(validate_token(&token), Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        init_test_keys();

        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: Utc::now().timestamp(),
            is_admin: true,
        };
        let forged = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"not-the-secret"),
        )
        .expect("encode");

        assert!(validate_token(&forged).is_err());
    }

    #[test]
    fn test_extract_user_id() {
        init_test_keys();

        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, true).expect("Failed to generate token");
        assert_eq!(get_user_id_from_token(&token).unwrap(), user_id);
    }

    #[test]
    fn test_double_initialization_rejected() {
        init_test_keys();
        assert!(matches!(
            initialize_jwt_secret("another", "HS256"),
            Err(JwtError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_parse_algorithm_accepts_hmac_only() {
        assert_eq!(parse_algorithm("HS256").unwrap(), Algorithm::HS256);
        assert_eq!(parse_algorithm(" HS512 ").unwrap(), Algorithm::HS512);
        assert!(parse_algorithm("RS256").is_err());
        assert!(parse_algorithm("none").is_err());
    }
}
