//! Public types for the photos API. Only metadata lives here, the image
//! itself is hosted wherever `url` points.
use std::str::FromStr;

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PhotoType {
    Couple,
    #[default]
    Memory,
    Hero,
}

impl PhotoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoType::Couple => "couple",
            PhotoType::Memory => "memory",
            PhotoType::Hero => "hero",
        }
    }
}

impl FromStr for PhotoType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "couple" => Ok(PhotoType::Couple),
            "memory" => Ok(PhotoType::Memory),
            "hero" => Ok(PhotoType::Hero),
            other => Err(anyhow::anyhow!("Unknown photo type {:?}", other)),
        }
    }
}

impl ToSql for PhotoType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for PhotoType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: anyhow::Error| FromSqlError::Other(e.into()))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: i64,
    pub wedding_id: i64,
    pub url: String,
    pub caption: Option<String>,
    pub photo_type: PhotoType,
    pub uploaded_at: String,
}

#[derive(Deserialize)]
pub struct CreatePhotoRequest {
    pub url: String,
    pub caption: Option<String>,
    pub photo_type: Option<PhotoType>,
}
