use crate::core::db::{async_db, migrate_db};
use anyhow::{Result, anyhow};

pub async fn run(db: bool, db_path: &str) -> Result<()> {
    if !db {
        return Err(anyhow!("Missing value for migrate \"--db\""));
    }

    println!("Migrating db...");
    let db = async_db(db_path).await?;
    let applied = db
        .call(|conn| {
            let applied = migrate_db(conn)?;
            Ok(applied)
        })
        .await?;
    println!("Finished migrating db, applied {} migration(s)", applied);

    Ok(())
}
