use crate::core::db::{async_db, initialize_db};
use anyhow::{Result, anyhow};
use std::fs;
use std::path::Path;

pub async fn run(db: bool, storage_path: &str, db_path: &str) -> Result<()> {
    if !db {
        return Err(anyhow!("Missing value for init \"--db\""));
    }

    println!("Initializing db...");
    fs::create_dir_all(storage_path)
        .unwrap_or_else(|err| println!("Ignoring storage directory create failed: {}", err));
    if let Some(parent) = Path::new(db_path).parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|err| println!("Ignoring db directory create failed: {}", err));
    }

    let db = async_db(db_path).await?;
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await?;
    println!("Finished initializing db at {}", db_path);

    Ok(())
}
