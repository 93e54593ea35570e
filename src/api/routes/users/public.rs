//! Public types for the users API
use serde::{Deserialize, Serialize};

/// Self registration. There is no admin flag here, admins are made with
/// the `user` CLI command or by another admin.
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct SetAdminRequest {
    pub is_admin: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
}
