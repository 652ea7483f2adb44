use crate::{
    database::MongoDB,
    models::{Book, Review},
    utils::error::ServiceError,
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, Document};

async fn find_matching(db: &MongoDB, filter: Document) -> Result<Vec<Book>, ServiceError> {
    let collection = db.collection::<Book>("books");

    let mut cursor = collection
        .find(filter)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?;

    let mut books = Vec::new();

    while let Some(result) = cursor.next().await {
        match result {
            Ok(book) => books.push(book),
            Err(e) => log::error!("Error reading book: {}", e),
        }
    }

    Ok(books)
}

pub async fn list_all(db: &MongoDB) -> Result<Vec<Book>, ServiceError> {
    find_matching(db, doc! {}).await
}

pub async fn find_by_isbn(db: &MongoDB, isbn: &str) -> Result<Book, ServiceError> {
    db.collection::<Book>("books")
        .find_one(doc! { "isbn": isbn })
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound(format!("book {}", isbn)))
}

// Exact-match lookups, like the shop's original catalog behaved
pub async fn find_by_author(db: &MongoDB, author: &str) -> Result<Vec<Book>, ServiceError> {
    find_matching(db, doc! { "author": author }).await
}

pub async fn find_by_title(db: &MongoDB, title: &str) -> Result<Vec<Book>, ServiceError> {
    find_matching(db, doc! { "title": title }).await
}

pub async fn get_reviews(db: &MongoDB, isbn: &str) -> Result<Vec<Review>, ServiceError> {
    let book = find_by_isbn(db, isbn).await?;
    Ok(book.reviews)
}
