//! Public types for the guest book API
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GuestBookEntry {
    pub id: i64,
    pub wedding_id: i64,
    pub guest_name: String,
    pub message: String,
    pub created_at: String,
}

#[derive(Deserialize)]
pub struct CreateEntryRequest {
    pub guest_name: String,
    pub message: String,
}
