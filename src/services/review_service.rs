use crate::{
    database::MongoDB,
    models::{Book, ReviewOutcome},
    utils::error::ServiceError,
};
use mongodb::bson::{doc, to_bson};

/// Attempts before giving up on a contended book.
const MAX_CAS_RETRIES: usize = 3;

/// Insert-or-replace the caller's review. The state transition runs on a
/// loaded snapshot; the write only lands if no other writer advanced the
/// book's version in between, otherwise the snapshot is reloaded and the
/// transition replayed.
pub async fn upsert_review(
    db: &MongoDB,
    isbn: &str,
    user_id: &str,
    text: &str,
) -> Result<ReviewOutcome, ServiceError> {
    let collection = db.collection::<Book>("books");

    for attempt in 0..MAX_CAS_RETRIES {
        let mut book = collection
            .find_one(doc! { "isbn": isbn })
            .await
            .map_err(|e| ServiceError::Database(e.to_string()))?
            .ok_or_else(|| ServiceError::NotFound(format!("book {}", isbn)))?;

        let snapshot_version = book.version;
        let outcome = book.upsert_review(user_id, text);

        let reviews = to_bson(&book.reviews)
            .map_err(|e| ServiceError::Internal(format!("failed to encode reviews: {}", e)))?;

        let result = collection
            .update_one(
                doc! { "isbn": isbn, "version": snapshot_version },
                doc! { "$set": { "reviews": reviews }, "$inc": { "version": 1 } },
            )
            .await
            .map_err(|e| ServiceError::Database(e.to_string()))?;

        if result.matched_count == 1 {
            log::info!(
                "📝 Review {:?} on book {} by user {}",
                outcome,
                isbn,
                user_id
            );
            return Ok(outcome);
        }

        // another writer advanced the version; replay on a fresh snapshot
        log::warn!(
            "⚠️ Review upsert contention on book {} (attempt {}/{})",
            isbn,
            attempt + 1,
            MAX_CAS_RETRIES
        );
    }

    Err(ServiceError::Internal(format!(
        "review upsert on book {} kept losing the version race",
        isbn
    )))
}

/// Remove the caller's review with a single atomic `$pull`. Removing a
/// review that does not exist is a successful no-op.
pub async fn delete_review(db: &MongoDB, isbn: &str, user_id: &str) -> Result<bool, ServiceError> {
    let collection = db.collection::<Book>("books");

    // the pre-image tells us whether there was anything to remove
    let previous = collection
        .find_one_and_update(
            doc! { "isbn": isbn },
            doc! { "$pull": { "reviews": { "user": user_id } }, "$inc": { "version": 1 } },
        )
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound(format!("book {}", isbn)))?;

    let removed = previous.reviews.iter().any(|r| r.user == user_id);

    if removed {
        log::info!("🗑️ Review removed from book {} by user {}", isbn, user_id);
    } else {
        log::info!(
            "🗑️ Review delete no-op on book {} (user {} had no review)",
            isbn,
            user_id
        );
    }

    Ok(removed)
}
