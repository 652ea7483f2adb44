use crate::database::MongoDB;
use crate::models::Book;
use mongodb::bson::doc;

/// Books are created out-of-band — there is no creation endpoint — so an
/// empty catalog gets a small default shelf on first boot.
pub async fn seed_default_books(db: &MongoDB) {
    let collection = db.collection::<Book>("books");

    let count = collection.count_documents(doc! {}).await.unwrap_or(0);

    if count > 0 {
        log::info!("📚 Catalog: {} books already in DB — skipping seed", count);
        return;
    }

    log::info!("📚 Catalog: seeding default books...");

    let books = default_books();

    match collection.insert_many(&books).await {
        Ok(result) => {
            log::info!(
                "   ✅ Inserted {} books into books collection",
                result.inserted_ids.len()
            );
        }
        Err(e) => {
            log::error!("   ❌ Failed to seed books: {}", e);
        }
    }
}

fn default_books() -> Vec<Book> {
    vec![
        book("9780132350884", "Clean Code", "Robert C. Martin"),
        book("9780134685991", "Effective Java", "Joshua Bloch"),
        book("9781491927281", "Programming Rust", "Jim Blandy"),
        book("9780596517748", "JavaScript: The Good Parts", "Douglas Crockford"),
        book("9780201616224", "The Pragmatic Programmer", "Andrew Hunt"),
    ]
}

fn book(isbn: &str, title: &str, author: &str) -> Book {
    Book {
        _id: None,
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        reviews: Vec::new(),
        version: 0,
    }
}
