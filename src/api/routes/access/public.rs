//! Public types for the access API
use serde::{Deserialize, Serialize};

use crate::access::{AccessGrant, CapabilitySet, RoleKind};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GrantResponse {
    pub user_id: i64,
    pub wedding_id: i64,
    pub role: RoleKind,
    pub permissions: CapabilitySet,
}

impl From<&AccessGrant> for GrantResponse {
    fn from(grant: &AccessGrant) -> Self {
        Self {
            user_id: grant.subject_id,
            wedding_id: grant.resource_id,
            role: grant.role.kind(),
            permissions: grant.role.stored_capabilities(),
        }
    }
}

/// Share a wedding with another user
#[derive(Deserialize)]
pub struct ShareRequest {
    pub user_id: i64,
    pub role: RoleKind,
    pub permissions: Option<CapabilitySet>,
}

#[derive(Deserialize)]
pub struct UpdateGrantRequest {
    pub role: RoleKind,
    pub permissions: Option<CapabilitySet>,
}

#[derive(Deserialize)]
pub struct CheckRequest {
    pub capability: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CheckResponse {
    pub allowed: bool,
}
