use crate::{config::AppConfig, database::MongoDB, models::User, utils::error::ServiceError};
use actix_web::HttpRequest;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
    pub aud: String,
    pub iss: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
}

// Generate JWT token
pub fn generate_token(user: &User, config: &AppConfig) -> Result<String, ServiceError> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(config.token_ttl_hours)).timestamp() as usize;

    let claims = Claims {
        sub: user.user_id.clone(),
        username: user.username.clone(),
        iat,
        exp,
        jti: Uuid::new_v4().to_string(),
        aud: config.jwt_audience.clone(),
        iss: config.jwt_issuer.clone(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
    .map_err(|e| ServiceError::Internal(format!("failed to sign token: {}", e)))
}

// Verify JWT token
pub fn verify_token(token: &str, config: &AppConfig) -> Result<Claims, ServiceError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.jwt_audience.clone()]);

    let mut issuers = HashSet::new();
    issuers.insert(config.jwt_issuer.clone());
    validation.iss = Some(issuers);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| ServiceError::Unauthorized(format!("invalid token: {}", e)))
}

/// Resolve the caller identity from the raw `token` header.
pub fn authenticate(req: &HttpRequest, config: &AppConfig) -> Result<Claims, ServiceError> {
    let header = req
        .headers()
        .get("token")
        .ok_or_else(|| ServiceError::Unauthorized("missing token header".to_string()))?;

    let token = header
        .to_str()
        .map_err(|_| ServiceError::Unauthorized("malformed token header".to_string()))?;

    verify_token(token, config)
}

// User registration
pub async fn register(db: &MongoDB, request: &RegisterRequest) -> Result<(), ServiceError> {
    let collection = db.collection::<User>("users");

    let existing = collection
        .find_one(doc! { "username": &request.username })
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?;

    if existing.is_some() {
        return Err(ServiceError::DuplicateUser);
    }

    let hashed_password = hash(&request.password, DEFAULT_COST)
        .map_err(|e| ServiceError::Internal(format!("failed to hash password: {}", e)))?;

    let new_user = User {
        _id: None,
        user_id: ObjectId::new().to_hex(),
        username: request.username.clone(),
        password: hashed_password,
        created_at: Some(BsonDateTime::now()),
        last_login: None,
    };

    collection.insert_one(&new_user).await.map_err(|e| {
        // the unique index on username catches the find-then-insert race
        if is_duplicate_key(&e) {
            ServiceError::DuplicateUser
        } else {
            ServiceError::Database(e.to_string())
        }
    })?;

    log::info!("✅ User registered: {}", request.username);

    Ok(())
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        *e.kind,
        mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(ref we))
            if we.code == 11000
    )
}

// User login
pub async fn login(
    db: &MongoDB,
    config: &AppConfig,
    request: &LoginRequest,
) -> Result<AuthResponse, ServiceError> {
    let collection = db.collection::<User>("users");

    let user = collection
        .find_one(doc! { "username": &request.username })
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?
        .ok_or(ServiceError::InvalidCredentials)?;

    let valid = verify(&request.password, &user.password)
        .map_err(|e| ServiceError::Internal(format!("password verification error: {}", e)))?;

    if !valid {
        return Err(ServiceError::InvalidCredentials);
    }

    collection
        .update_one(
            doc! { "user_id": &user.user_id },
            doc! { "$set": { "last_login": BsonDateTime::now() } },
        )
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?;

    let token = generate_token(&user, config)?;

    Ok(AuthResponse {
        success: true,
        token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: "5000".to_string(),
            database_url: String::new(),
            jwt_secret: "test-secret".to_string(),
            jwt_issuer: "bookstore-service".to_string(),
            jwt_audience: "bookstore-api".to_string(),
            token_ttl_hours: 24,
        }
    }

    fn test_user() -> User {
        User {
            _id: None,
            user_id: "u1".to_string(),
            username: "alice".to_string(),
            password: String::new(),
            created_at: None,
            last_login: None,
        }
    }

    #[test]
    fn token_roundtrip_preserves_identity() {
        let config = test_config();

        let token = generate_token(&test_user(), &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = test_config();

        assert!(verify_token("not-a-jwt", &config).is_err());
        assert!(verify_token("", &config).is_err());
        assert!(verify_token("aaa.bbb.ccc", &config).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = test_config();
        let mut other = test_config();
        other.jwt_secret = "another-secret".to_string();

        let token = generate_token(&test_user(), &other).unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let mut issued_in_the_past = test_config();
        issued_in_the_past.token_ttl_hours = -2;

        let token = generate_token(&test_user(), &issued_in_the_past).unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn token_for_other_audience_is_rejected() {
        let config = test_config();
        let mut other = test_config();
        other.jwt_audience = "other-api".to_string();

        let token = generate_token(&test_user(), &other).unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn password_hash_roundtrip() {
        let hashed = hash("hunter2", DEFAULT_COST).unwrap();

        assert!(verify("hunter2", &hashed).unwrap());
        assert!(!verify("wrong-password", &hashed).unwrap());
    }
}
