use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// A registered reader. `user_id` is the primary identifier carried in
/// token claims and review entries; `_id` is Mongo's own key.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub user_id: String,
    pub username: String,
    pub password: String,
    pub created_at: Option<BsonDateTime>,
    pub last_login: Option<BsonDateTime>,
}
