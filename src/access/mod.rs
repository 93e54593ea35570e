//! Permission checks for shared wedding management.
//!
//! Grants are passed in by the caller, nothing here touches the
//! database. Owners can do everything, everyone else gets exactly the
//! capabilities stored on their grant.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Unknown capability: {0:?}")]
    UnknownCapability(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    EditDetails,
    ManageGuests,
    ViewAnalytics,
    ManagePhotos,
    EditGuestBook,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::EditDetails,
        Capability::ManageGuests,
        Capability::ViewAnalytics,
        Capability::ManagePhotos,
        Capability::EditGuestBook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::EditDetails => "editDetails",
            Capability::ManageGuests => "manageGuests",
            Capability::ViewAnalytics => "viewAnalytics",
            Capability::ManagePhotos => "managePhotos",
            Capability::EditGuestBook => "editGuestBook",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AccessError::UnknownCapability(s.to_string()))
    }
}

/// The per-grant capability flags as stored in `wedding_access.permissions`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CapabilitySet {
    pub can_edit_details: bool,
    pub can_manage_guests: bool,
    pub can_view_analytics: bool,
    pub can_manage_photos: bool,
    pub can_edit_guest_book: bool,
}

impl CapabilitySet {
    pub fn all() -> Self {
        Self {
            can_edit_details: true,
            can_manage_guests: true,
            can_view_analytics: true,
            can_manage_photos: true,
            can_edit_guest_book: true,
        }
    }

    pub fn contains(&self, capability: Capability) -> bool {
        match capability {
            Capability::EditDetails => self.can_edit_details,
            Capability::ManageGuests => self.can_manage_guests,
            Capability::ViewAnalytics => self.can_view_analytics,
            Capability::ManagePhotos => self.can_manage_photos,
            Capability::EditGuestBook => self.can_edit_guest_book,
        }
    }
}

/// Stored value of `wedding_access.access_level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    Owner,
    GuestManager,
    Viewer,
}

impl RoleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::Owner => "owner",
            RoleKind::GuestManager => "guest_manager",
            RoleKind::Viewer => "viewer",
        }
    }
}

impl FromStr for RoleKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(RoleKind::Owner),
            "guest_manager" => Ok(RoleKind::GuestManager),
            "viewer" => Ok(RoleKind::Viewer),
            other => Err(anyhow::anyhow!("Unknown access level {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Owner,
    GuestManager(CapabilitySet),
    Viewer(CapabilitySet),
}

impl Role {
    /// Owners never carry flags so whatever was stored for them is dropped.
    pub fn from_stored(kind: RoleKind, capabilities: CapabilitySet) -> Self {
        match kind {
            RoleKind::Owner => Role::Owner,
            RoleKind::GuestManager => Role::GuestManager(capabilities),
            RoleKind::Viewer => Role::Viewer(capabilities),
        }
    }

    pub fn kind(&self) -> RoleKind {
        match self {
            Role::Owner => RoleKind::Owner,
            Role::GuestManager(_) => RoleKind::GuestManager,
            Role::Viewer(_) => RoleKind::Viewer,
        }
    }

    /// Flags as they should be persisted. Owners store an all-false set.
    pub fn stored_capabilities(&self) -> CapabilitySet {
        match self {
            Role::Owner => CapabilitySet::default(),
            Role::GuestManager(caps) | Role::Viewer(caps) => *caps,
        }
    }

    // NOTE: A viewer with every flag set is allowed everything. The
    // stored flags are trusted as-is for non-owners.
    pub fn allows(&self, capability: Capability) -> bool {
        match self {
            Role::Owner => true,
            Role::GuestManager(caps) | Role::Viewer(caps) => caps.contains(capability),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    pub subject_id: i64,
    pub resource_id: i64,
    pub role: Role,
}

impl AccessGrant {
    pub fn new(subject_id: i64, resource_id: i64, role: Role) -> Self {
        Self {
            subject_id,
            resource_id,
            role,
        }
    }

    fn matches(&self, subject_id: i64, resource_id: i64) -> bool {
        self.subject_id == subject_id && self.resource_id == resource_id
    }
}

/// Whether the subject has any grant at all on the resource
pub fn has_grant(grants: &[AccessGrant], subject_id: i64, resource_id: i64) -> bool {
    grants.iter().any(|g| g.matches(subject_id, resource_id))
}

pub fn is_owner(grants: &[AccessGrant], subject_id: i64, resource_id: i64) -> bool {
    grants
        .iter()
        .any(|g| g.matches(subject_id, resource_id) && g.role == Role::Owner)
}

/// Typed form of [`can_perform`].
///
/// Only one grant per (subject, resource) is expected. When there are
/// duplicates an owner grant still wins, otherwise the first match
/// decides and the rest are ignored.
pub fn allows(
    grants: &[AccessGrant],
    subject_id: i64,
    resource_id: i64,
    capability: Capability,
) -> bool {
    if is_owner(grants, subject_id, resource_id) {
        return true;
    }

    grants
        .iter()
        .find(|g| g.matches(subject_id, resource_id))
        .is_some_and(|g| g.role.allows(capability))
}

/// Check whether `subject_id` may use the named capability on
/// `resource_id`. `Ok(false)` is a normal denial, an unknown capability
/// name is an error.
pub fn can_perform(
    grants: &[AccessGrant],
    subject_id: i64,
    resource_id: i64,
    capability: &str,
) -> Result<bool, AccessError> {
    let capability = capability.parse::<Capability>()?;
    Ok(allows(grants, subject_id, resource_id, capability))
}
