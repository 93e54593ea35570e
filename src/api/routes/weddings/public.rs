//! Public types for the weddings API
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::CountdownResult;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Wedding {
    pub id: i64,
    pub user_id: i64,
    pub unique_url: String,
    pub bride: String,
    pub groom: String,
    pub wedding_date: String,
    pub wedding_time: String,
    pub timezone: String,
    pub venue: String,
    pub is_public: bool,
}

#[derive(Deserialize)]
pub struct CreateWeddingRequest {
    pub bride: String,
    pub groom: String,
    pub wedding_date: String,
    pub wedding_time: Option<String>,
    pub timezone: Option<String>,
    pub venue: String,
    pub is_public: Option<bool>,
}

/// Fields left out are not changed
#[derive(Deserialize, Default)]
pub struct UpdateWeddingRequest {
    pub bride: Option<String>,
    pub groom: Option<String>,
    pub wedding_date: Option<String>,
    pub wedding_time: Option<String>,
    pub timezone: Option<String>,
    pub venue: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Deserialize)]
pub struct CountdownQuery {
    /// Evaluate at this instant instead of now
    pub at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CountdownResponse {
    #[serde(flatten)]
    pub remaining: CountdownResult,
    pub target: String, // RFC 3339 in UTC
    pub timezone: String,
    pub refresh_interval_ms: u64,
}
