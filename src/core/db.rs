//! SQLite storage for users, weddings, access grants and the guest
//! facing content of each wedding
use anyhow::Result;
use rusqlite::Connection;

/// Schema changes applied in order. The index of each entry + 1 is
/// the `user_version` the database is at once it has been applied.
const MIGRATIONS: [&str; 3] = [
    r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        is_admin INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS weddings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        unique_url TEXT NOT NULL UNIQUE,
        bride TEXT NOT NULL,
        groom TEXT NOT NULL,
        wedding_date TEXT NOT NULL,
        wedding_time TEXT NOT NULL DEFAULT '4:00 PM',
        timezone TEXT NOT NULL DEFAULT 'Asia/Tashkent',
        venue TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS wedding_access (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        wedding_id INTEGER NOT NULL REFERENCES weddings(id),
        access_level TEXT NOT NULL DEFAULT 'viewer',
        permissions TEXT NOT NULL DEFAULT '{}',
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    ",
    r"
    ALTER TABLE weddings ADD COLUMN is_public INTEGER NOT NULL DEFAULT 1;
    CREATE INDEX IF NOT EXISTS wedding_access_wedding_id ON wedding_access(wedding_id);
    ",
    r"
    CREATE TABLE IF NOT EXISTS guests (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        wedding_id INTEGER NOT NULL REFERENCES weddings(id),
        name TEXT NOT NULL,
        email TEXT,
        phone TEXT,
        rsvp_status TEXT NOT NULL DEFAULT 'pending',
        plus_one INTEGER NOT NULL DEFAULT 0,
        plus_one_name TEXT,
        additional_guests INTEGER NOT NULL DEFAULT 0,
        message TEXT,
        side TEXT NOT NULL DEFAULT 'both',
        category TEXT NOT NULL DEFAULT 'family',
        dietary_restrictions TEXT,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        responded_at TEXT
    );
    CREATE INDEX IF NOT EXISTS guests_wedding_id ON guests(wedding_id);

    CREATE TABLE IF NOT EXISTS guest_book_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        wedding_id INTEGER NOT NULL REFERENCES weddings(id),
        guest_name TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    CREATE INDEX IF NOT EXISTS guest_book_entries_wedding_id ON guest_book_entries(wedding_id);

    CREATE TABLE IF NOT EXISTS photos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        wedding_id INTEGER NOT NULL REFERENCES weddings(id),
        url TEXT NOT NULL,
        caption TEXT,
        photo_type TEXT NOT NULL DEFAULT 'memory',
        uploaded_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    CREATE INDEX IF NOT EXISTS photos_wedding_id ON photos(wedding_id);
    ",
];

pub async fn async_db(db_path: &str) -> Result<tokio_rusqlite::Connection> {
    let db = tokio_rusqlite::Connection::open(db_path).await?;
    db.call(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    })
    .await?;
    Ok(db)
}

fn schema_version(conn: &Connection) -> Result<usize, rusqlite::Error> {
    conn.query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .map(|v| v as usize)
}

/// Apply any migrations the database hasn't seen yet
pub fn migrate_db(conn: &mut Connection) -> Result<usize, rusqlite::Error> {
    let current = schema_version(conn)?;
    let mut applied = 0;

    for (idx, sql) in MIGRATIONS.iter().enumerate().skip(current) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", (idx + 1) as i64)?;
        tx.commit()?;
        applied += 1;
    }

    Ok(applied)
}

/// Create the schema from scratch on a new database
pub fn initialize_db(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    migrate_db(conn)?;
    Ok(())
}
