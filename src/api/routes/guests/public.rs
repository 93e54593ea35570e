//! Public types for the guests API
use std::str::FromStr;

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
    Maybe,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Confirmed => "confirmed",
            RsvpStatus::Declined => "declined",
            RsvpStatus::Maybe => "maybe",
        }
    }
}

impl FromStr for RsvpStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RsvpStatus::Pending),
            "confirmed" => Ok(RsvpStatus::Confirmed),
            "declined" => Ok(RsvpStatus::Declined),
            "maybe" => Ok(RsvpStatus::Maybe),
            other => Err(anyhow::anyhow!("Unknown RSVP status {:?}", other)),
        }
    }
}

impl ToSql for RsvpStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for RsvpStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: anyhow::Error| FromSqlError::Other(e.into()))
    }
}

/// The answers a guest can give. A guest can't go back to pending.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RsvpAnswer {
    Confirmed,
    Declined,
    Maybe,
}

impl From<RsvpAnswer> for RsvpStatus {
    fn from(answer: RsvpAnswer) -> Self {
        match answer {
            RsvpAnswer::Confirmed => RsvpStatus::Confirmed,
            RsvpAnswer::Declined => RsvpStatus::Declined,
            RsvpAnswer::Maybe => RsvpStatus::Maybe,
        }
    }
}

/// Which side of the couple invited the guest
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GuestSide {
    Bride,
    Groom,
    #[default]
    Both,
}

impl GuestSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestSide::Bride => "bride",
            GuestSide::Groom => "groom",
            GuestSide::Both => "both",
        }
    }
}

impl FromStr for GuestSide {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bride" => Ok(GuestSide::Bride),
            "groom" => Ok(GuestSide::Groom),
            "both" => Ok(GuestSide::Both),
            other => Err(anyhow::anyhow!("Unknown guest side {:?}", other)),
        }
    }
}

impl ToSql for GuestSide {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for GuestSide {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: anyhow::Error| FromSqlError::Other(e.into()))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Guest {
    pub id: i64,
    pub wedding_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: RsvpStatus,
    pub plus_one: bool,
    pub plus_one_name: Option<String>,
    pub additional_guests: u32,
    pub message: Option<String>,
    pub side: GuestSide,
    pub category: String,
    pub dietary_restrictions: Option<String>,
    pub created_at: String,
    pub responded_at: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateGuestRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: Option<RsvpStatus>,
    pub plus_one: Option<bool>,
    pub plus_one_name: Option<String>,
    pub additional_guests: Option<u32>,
    pub side: Option<GuestSide>,
    pub category: Option<String>,
    pub dietary_restrictions: Option<String>,
}

/// Fields left out are kept as they are
#[derive(Deserialize, Default)]
pub struct UpdateGuestRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: Option<RsvpStatus>,
    pub plus_one: Option<bool>,
    pub plus_one_name: Option<String>,
    pub additional_guests: Option<u32>,
    pub side: Option<GuestSide>,
    pub category: Option<String>,
    pub dietary_restrictions: Option<String>,
}

/// An answer sent from the invitation page
#[derive(Deserialize)]
pub struct RsvpRequest {
    pub name: String,
    pub email: Option<String>,
    pub rsvp_status: RsvpAnswer,
    pub plus_one: Option<bool>,
    pub plus_one_name: Option<String>,
    pub additional_guests: Option<u32>,
    pub message: Option<String>,
    pub dietary_restrictions: Option<String>,
}

/// What a guest sees back after answering. Contact details stay with
/// the couple.
#[derive(Serialize, Deserialize, Debug)]
pub struct RsvpResponse {
    pub name: String,
    pub rsvp_status: RsvpStatus,
    pub responded_at: Option<String>,
}

impl From<&Guest> for RsvpResponse {
    fn from(guest: &Guest) -> Self {
        Self {
            name: guest.name.clone(),
            rsvp_status: guest.rsvp_status,
            responded_at: guest.responded_at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_round_trips_status_through_sqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let status: RsvpStatus = conn
            .query_row("SELECT ?1", [RsvpStatus::Maybe], |row| row.get(0))
            .unwrap();
        assert_eq!(status, RsvpStatus::Maybe);

        let bad = conn.query_row("SELECT 'attending'", [], |row| row.get::<_, RsvpStatus>(0));
        assert!(bad.is_err());
    }

    #[test]
    fn guests_cannot_answer_pending() {
        assert!(serde_json::from_str::<RsvpAnswer>(r#""pending""#).is_err());
        let answer: RsvpAnswer = serde_json::from_str(r#""declined""#).unwrap();
        assert_eq!(RsvpStatus::from(answer), RsvpStatus::Declined);
    }
}
