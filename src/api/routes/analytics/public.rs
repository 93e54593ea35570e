//! Public types for the analytics API
use serde::{Deserialize, Serialize};

/// Head counts for a wedding
#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct WeddingAnalytics {
    pub total_guests: i64,
    pub confirmed: i64,
    pub declined: i64,
    pub maybe: i64,
    pub pending: i64,
    /// Confirmed guests with their plus ones and additional guests
    pub expected_attendance: i64,
    pub guest_book_entries: i64,
    pub photos: i64,
}
