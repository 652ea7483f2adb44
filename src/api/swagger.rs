use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore Service API",
        version = "1.0.0",
        description = "Catalog of books with per-user reviews. \n\n**Authentication:** review mutations require a signed token passed in the raw `token` header, obtained from `/login`.",
    ),
    paths(
        // Catalog
        crate::api::books::get_books,
        crate::api::books::get_book_by_isbn,
        crate::api::books::get_books_by_author,
        crate::api::books::get_books_by_title,

        // Reviews
        crate::api::books::get_reviews,
        crate::api::books::upsert_review,
        crate::api::books::delete_review,

        // Auth
        crate::api::auth::register,
        crate::api::auth::login,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::Review,
            crate::api::books::ReviewRequest,
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::AuthResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Books", description = "Read-only catalog lookups by ISBN, author, and title."),
        (name = "Reviews", description = "Per-user book reviews. One review per user per book; submitting again replaces the text."),
        (name = "Auth", description = "Registration and login. Login returns the token expected by the review endpoints."),
        (name = "Health", description = "Health check endpoint for monitoring service status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token_auth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("token"))),
            );
        }
    }
}
