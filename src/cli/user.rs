use anyhow::{Result, anyhow};

use crate::api::routes::users::db as users_db;
use crate::core::db::async_db;

/// Create a user directly in the db. This is the only way to make the
/// first admin since the API never grants admin on sign up.
pub async fn run(email: String, name: String, admin: bool, db_path: &str) -> Result<()> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || name.trim().is_empty() {
        return Err(anyhow!("Email and name are required"));
    }

    let db = async_db(db_path).await?;
    if users_db::email_exists(&db, email.clone()).await? {
        return Err(anyhow!("User {} already exists", email));
    }
    let user = users_db::insert_user(&db, email, name.trim().to_string(), admin).await?;
    println!(
        "Created user {} ({}){}",
        user.id,
        user.email,
        if user.is_admin { " as admin" } else { "" }
    );

    Ok(())
}
