use crate::{
    config::AppConfig,
    database::MongoDB,
    services::{auth_service, catalog_service, review_service},
};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ReviewRequest {
    pub review: String,
}

#[utoipa::path(
    get,
    path = "/books",
    tag = "Books",
    responses(
        (status = 200, description = "List of all books in the shop"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_books(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📚 GET /books");

    match catalog_service::list_all(&db).await {
        Ok(books) => {
            log::info!("✅ Books retrieved: {}", books.len());
            HttpResponse::Ok().json(books)
        }
        Err(e) => {
            log::error!("❌ Failed to list books: {}", e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "Books",
    params(
        ("isbn" = String, Path, description = "ISBN of the book")
    ),
    responses(
        (status = 200, description = "Book found"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book_by_isbn(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let isbn = path.into_inner();
    log::info!("📖 GET /books/{}", isbn);

    match catalog_service::find_by_isbn(&db, &isbn).await {
        Ok(book) => HttpResponse::Ok().json(book),
        Err(e) => {
            log::warn!("⚠️ Book {} lookup failed: {}", isbn, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/books/author/{author}",
    tag = "Books",
    params(
        ("author" = String, Path, description = "Author name, exact match")
    ),
    responses(
        (status = 200, description = "Books by the author"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_books_by_author(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let author = path.into_inner();
    log::info!("📚 GET /books/author/{}", author);

    match catalog_service::find_by_author(&db, &author).await {
        Ok(books) => {
            log::info!("✅ Found {} books by '{}'", books.len(), author);
            HttpResponse::Ok().json(books)
        }
        Err(e) => {
            log::error!("❌ Author lookup failed for '{}': {}", author, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/books/title/{title}",
    tag = "Books",
    params(
        ("title" = String, Path, description = "Book title, exact match")
    ),
    responses(
        (status = 200, description = "Books with the title"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_books_by_title(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let title = path.into_inner();
    log::info!("📚 GET /books/title/{}", title);

    match catalog_service::find_by_title(&db, &title).await {
        Ok(books) => {
            log::info!("✅ Found {} books titled '{}'", books.len(), title);
            HttpResponse::Ok().json(books)
        }
        Err(e) => {
            log::error!("❌ Title lookup failed for '{}': {}", title, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/books/{isbn}/review",
    tag = "Reviews",
    params(
        ("isbn" = String, Path, description = "ISBN of the book")
    ),
    responses(
        (status = 200, description = "Reviews of the book", body = Vec<crate::models::Review>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_reviews(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let isbn = path.into_inner();
    log::info!("💬 GET /books/{}/review", isbn);

    match catalog_service::get_reviews(&db, &isbn).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(e) => {
            log::warn!("⚠️ Review lookup failed for book {}: {}", isbn, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/books/{isbn}/review",
    tag = "Reviews",
    params(
        ("isbn" = String, Path, description = "ISBN of the book")
    ),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review added or modified"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Book not found")
    ),
    security(
        ("token_auth" = [])
    )
)]
pub async fn upsert_review(
    db: web::Data<MongoDB>,
    config: web::Data<AppConfig>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<ReviewRequest>,
) -> HttpResponse {
    let isbn = path.into_inner();
    log::info!("📝 POST /books/{}/review", isbn);

    // identity gate first; nothing is touched without a valid token
    let claims = match auth_service::authenticate(&req, &config) {
        Ok(claims) => claims,
        Err(e) => {
            log::warn!("❌ Rejected review on book {}: {}", isbn, e);
            return e.to_response();
        }
    };

    match review_service::upsert_review(&db, &isbn, &claims.sub, &body.review).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Review added/modified successfully"
        })),
        Err(e) => {
            log::warn!(
                "❌ Review upsert failed on book {} for user {}: {}",
                isbn,
                claims.sub,
                e
            );
            e.to_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/books/{isbn}/review",
    tag = "Reviews",
    params(
        ("isbn" = String, Path, description = "ISBN of the book")
    ),
    responses(
        (status = 200, description = "Review deleted (no-op if the caller had none)"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Book not found")
    ),
    security(
        ("token_auth" = [])
    )
)]
pub async fn delete_review(
    db: web::Data<MongoDB>,
    config: web::Data<AppConfig>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let isbn = path.into_inner();
    log::info!("🗑️ DELETE /books/{}/review", isbn);

    let claims = match auth_service::authenticate(&req, &config) {
        Ok(claims) => claims,
        Err(e) => {
            log::warn!("❌ Rejected review delete on book {}: {}", isbn, e);
            return e.to_response();
        }
    };

    match review_service::delete_review(&db, &isbn, &claims.sub).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Review deleted successfully"
        })),
        Err(e) => {
            log::warn!(
                "❌ Review delete failed on book {} for user {}: {}",
                isbn,
                claims.sub,
                e
            );
            e.to_response()
        }
    }
}
