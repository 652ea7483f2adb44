use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A single reader's review of a book. Within a book there is at most one
/// entry per distinct `user`; `Book::upsert_review` maintains that.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, utoipa::ToSchema)]
pub struct Review {
    pub user: String,
    pub review: String,
}

/// What an upsert did, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Added,
    Updated,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Book {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Bumped on every review mutation; the conditional update in the
    /// review service matches on it.
    #[serde(default)]
    pub version: i64,
}

impl Book {
    /// Replace the caller's existing review text in place, or append a new
    /// entry. Reviewer order is insertion order and survives updates.
    pub fn upsert_review(&mut self, user_id: &str, text: &str) -> ReviewOutcome {
        if let Some(existing) = self.reviews.iter_mut().find(|r| r.user == user_id) {
            existing.review = text.to_string();
            ReviewOutcome::Updated
        } else {
            self.reviews.push(Review {
                user: user_id.to_string(),
                review: text.to_string(),
            });
            ReviewOutcome::Added
        }
    }

    /// Remove the caller's review if present. Removing a review that does
    /// not exist is a no-op.
    pub fn remove_review(&mut self, user_id: &str) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.user != user_id);
        self.reviews.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book {
            _id: None,
            isbn: "123".to_string(),
            title: "The Pragmatic Programmer".to_string(),
            author: "Andrew Hunt".to_string(),
            reviews: Vec::new(),
            version: 0,
        }
    }

    #[test]
    fn first_review_is_appended() {
        let mut book = sample_book();

        let outcome = book.upsert_review("u1", "Great book");

        assert_eq!(outcome, ReviewOutcome::Added);
        assert_eq!(
            book.reviews,
            vec![Review {
                user: "u1".to_string(),
                review: "Great book".to_string()
            }]
        );
    }

    #[test]
    fn resubmission_replaces_in_place() {
        let mut book = sample_book();
        book.upsert_review("u1", "Great book");

        let outcome = book.upsert_review("u1", "Even better");

        assert_eq!(outcome, ReviewOutcome::Updated);
        assert_eq!(book.reviews.len(), 1);
        assert_eq!(book.reviews[0].review, "Even better");
    }

    #[test]
    fn same_text_twice_keeps_single_entry() {
        let mut book = sample_book();
        book.upsert_review("u1", "Great book");
        book.upsert_review("u1", "Great book");

        assert_eq!(book.reviews.len(), 1);
        assert_eq!(book.reviews[0].review, "Great book");
    }

    #[test]
    fn distinct_users_coexist_in_submission_order() {
        let mut book = sample_book();
        book.upsert_review("u1", "Great book");
        book.upsert_review("u2", "Meh");

        assert_eq!(book.reviews.len(), 2);
        assert_eq!(book.reviews[0].user, "u1");
        assert_eq!(book.reviews[1].user, "u2");

        // an update must not reorder the reviewers
        book.upsert_review("u1", "Even better");
        assert_eq!(book.reviews[0].user, "u1");
        assert_eq!(book.reviews[0].review, "Even better");
        assert_eq!(book.reviews[1].user, "u2");
    }

    #[test]
    fn remove_only_touches_the_callers_review() {
        let mut book = sample_book();
        book.upsert_review("u1", "Great book");
        book.upsert_review("u2", "Meh");

        assert!(book.remove_review("u1"));

        assert_eq!(book.reviews.len(), 1);
        assert_eq!(book.reviews[0].user, "u2");
        assert_eq!(book.reviews[0].review, "Meh");
    }

    #[test]
    fn remove_without_review_is_a_noop() {
        let mut book = sample_book();
        book.upsert_review("u2", "Meh");

        assert!(!book.remove_review("u1"));
        assert_eq!(book.reviews.len(), 1);
    }

    #[test]
    fn review_lifecycle_for_one_book() {
        let mut book = sample_book();

        book.upsert_review("u1", "Great book");
        assert_eq!(book.reviews.len(), 1);
        assert_eq!(book.reviews[0].review, "Great book");

        book.upsert_review("u1", "Even better");
        assert_eq!(book.reviews.len(), 1);
        assert_eq!(book.reviews[0].review, "Even better");

        book.upsert_review("u2", "Meh");
        assert_eq!(book.reviews.len(), 2);
        assert_eq!(book.reviews[0].user, "u1");
        assert_eq!(book.reviews[1].user, "u2");

        book.remove_review("u1");
        assert_eq!(book.reviews.len(), 1);
        assert_eq!(book.reviews[0].user, "u2");
    }
}
