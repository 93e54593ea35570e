//! Database queries for the access API
use anyhow::{Error, Result};
use tokio_rusqlite::Connection;

use crate::access::{AccessGrant, CapabilitySet, Role, RoleKind};
use crate::api::routes::weddings::public::Wedding;

struct StoredGrant {
    user_id: i64,
    wedding_id: i64,
    access_level: String,
    permissions: String,
}

impl StoredGrant {
    /// Rows that can't be understood grant nothing.
    fn into_grant(self) -> Option<AccessGrant> {
        let kind = match self.access_level.parse::<RoleKind>() {
            Ok(kind) => kind,
            Err(e) => {
                tracing::warn!(
                    "Ignoring grant for user {} on wedding {}: {}",
                    self.user_id,
                    self.wedding_id,
                    e
                );
                return None;
            }
        };
        let capabilities = serde_json::from_str::<CapabilitySet>(&self.permissions)
            .unwrap_or_else(|e| {
                tracing::warn!(
                    "Malformed permissions for user {} on wedding {}: {}",
                    self.user_id,
                    self.wedding_id,
                    e
                );
                CapabilitySet::default()
            });
        Some(AccessGrant::new(
            self.user_id,
            self.wedding_id,
            Role::from_stored(kind, capabilities),
        ))
    }
}

/// Grants stored in `wedding_access` in the order they were created
pub async fn find_stored_grants(db: &Connection, wedding_id: i64) -> Result<Vec<AccessGrant>, Error> {
    let rows = db
        .call(move |conn| {
            let mut stmt = conn.prepare(
                r"
                SELECT user_id, wedding_id, access_level, permissions
                FROM wedding_access
                WHERE wedding_id = ?1
                ORDER BY id
                ",
            )?;
            let rows = stmt
                .query_map([wedding_id], |i| {
                    Ok(StoredGrant {
                        user_id: i.get(0)?,
                        wedding_id: i.get(1)?,
                        access_level: i.get(2)?,
                        permissions: i.get(3)?,
                    })
                })?
                .collect::<Result<Vec<StoredGrant>, _>>()?;
            Ok(rows)
        })
        .await?;

    Ok(rows.into_iter().filter_map(StoredGrant::into_grant).collect())
}

/// Every grant that applies to the wedding. The user that created the
/// wedding is always an owner even without a `wedding_access` row.
pub async fn load_grants(db: &Connection, wedding: &Wedding) -> Result<Vec<AccessGrant>, Error> {
    let mut grants = vec![AccessGrant::new(wedding.user_id, wedding.id, Role::Owner)];
    grants.extend(find_stored_grants(db, wedding.id).await?);
    Ok(grants)
}

pub async fn insert_grant(
    db: &Connection,
    wedding_id: i64,
    user_id: i64,
    role: &Role,
) -> Result<(), Error> {
    let access_level = role.kind().as_str();
    let permissions = serde_json::to_string(&role.stored_capabilities())?;
    db.call(move |conn| {
        conn.execute(
            "INSERT INTO wedding_access (user_id, wedding_id, access_level, permissions) VALUES (?1, ?2, ?3, ?4)",
            tokio_rusqlite::params![user_id, wedding_id, access_level, &permissions],
        )?;
        Ok(())
    })
    .await?;
    Ok(())
}

/// Returns the number of grants changed
pub async fn update_grant(
    db: &Connection,
    wedding_id: i64,
    user_id: i64,
    role: &Role,
) -> Result<usize, Error> {
    let access_level = role.kind().as_str();
    let permissions = serde_json::to_string(&role.stored_capabilities())?;
    let changed = db
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE wedding_access SET access_level = ?3, permissions = ?4 WHERE wedding_id = ?1 AND user_id = ?2",
                tokio_rusqlite::params![wedding_id, user_id, access_level, &permissions],
            )?;
            Ok(changed)
        })
        .await?;
    Ok(changed)
}

/// Returns the number of grants removed
pub async fn delete_grant(db: &Connection, wedding_id: i64, user_id: i64) -> Result<usize, Error> {
    let removed = db
        .call(move |conn| {
            let removed = conn.execute(
                "DELETE FROM wedding_access WHERE wedding_id = ?1 AND user_id = ?2",
                [wedding_id, user_id],
            )?;
            Ok(removed)
        })
        .await?;
    Ok(removed)
}
