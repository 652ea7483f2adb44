use crate::services::auth_service::{self, LoginRequest, RegisterRequest};
use crate::{config::AppConfig, database::MongoDB};
use actix_web::{web, HttpResponse};

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn register(
    db: web::Data<MongoDB>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    log::info!("📝 POST /register - username: {}", request.username);

    match auth_service::register(&db, &request).await {
        Ok(()) => {
            log::info!("✅ Registration successful: {}", request.username);
            HttpResponse::Created().json(serde_json::json!({
                "success": true,
                "message": "User registered successfully"
            }))
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", request.username, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = auth_service::AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    db: web::Data<MongoDB>,
    config: web::Data<AppConfig>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    log::info!("🔐 POST /login - username: {}", request.username);

    match auth_service::login(&db, &config, &request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", request.username);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", request.username, e);
            e.to_response()
        }
    }
}
