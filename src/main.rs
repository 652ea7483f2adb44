mod api;
mod config;
mod database;
mod models;
mod seeds;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Configuration is read once here and shared through app data
    let app_config = config::AppConfig::from_env();

    log::info!("🚀 Starting Bookstore Service...");
    log::info!("📊 Database: {}", app_config.database_url);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&app_config.database_url)
        .await
        .expect("Failed to connect to MongoDB");

    log::info!("✅ MongoDB connected successfully");

    // 🌱 Seed the default catalog (books are created out-of-band)
    seeds::books_seed::seed_default_books(&db).await;

    let bind_addr = app_config.bind_addr();
    let db_data = web::Data::new(db);
    let config_data = web::Data::new(app_config);

    log::info!("🌐 Server starting on {}", bind_addr);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_addr);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind_addr);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .allowed_header("token")
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(config_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Auth endpoints
            .route("/register", web::post().to(api::auth::register))
            .route("/login", web::post().to(api::auth::login))
            // Catalog endpoints
            .route("/books", web::get().to(api::books::get_books))
            .route(
                "/books/author/{author}",
                web::get().to(api::books::get_books_by_author),
            )
            .route(
                "/books/title/{title}",
                web::get().to(api::books::get_books_by_title),
            )
            // Reviews: reads are public, mutations check the token header
            .service(
                web::resource("/books/{isbn}/review")
                    .route(web::get().to(api::books::get_reviews))
                    .route(web::post().to(api::books::upsert_review))
                    .route(web::delete().to(api::books::delete_review)),
            )
            // MUST STAY LAST (catch-all on the isbn segment)
            .route("/books/{isbn}", web::get().to(api::books::get_book_by_isbn))
    })
    .bind(bind_addr)?
    .run()
    .await
}
