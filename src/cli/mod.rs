use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::core::AppConfig;

pub mod countdown;
pub mod init;
pub mod migrate;
pub mod serve;
pub mod user;

#[derive(Subcommand)]
enum Command {
    /// Initialize the database
    Init {
        #[arg(long, action, default_value = "false")]
        db: bool,
    },
    /// Migrate the db schema
    Migrate {
        #[arg(long, action, default_value = "false")]
        db: bool,
    },
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Create a user, optionally as an admin
    User {
        #[arg(long)]
        email: String,

        #[arg(long)]
        name: String,

        /// Allow the user to manage sharing on every wedding
        #[arg(long, action, default_value = "false")]
        admin: bool,
    },
    /// Print the time left until a wedding starts
    Countdown {
        /// Wedding date as YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Ceremony time such as "16:00" or "4:00 PM"
        #[arg(long)]
        time: Option<String>,

        /// IANA timezone of the venue such as "Asia/Tashkent"
        #[arg(long)]
        timezone: Option<String>,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Resolved once and handed to whatever needs it
    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Init { db }) => {
            init::run(db, &config.storage_path, &config.db_path).await?;
        }
        Some(Command::Migrate { db }) => {
            migrate::run(db, &config.db_path).await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        Some(Command::User { email, name, admin }) => {
            user::run(email, name, admin, &config.db_path).await?;
        }
        Some(Command::Countdown {
            date,
            time,
            timezone,
        }) => {
            countdown::run(date, time, timezone, &config)?;
        }
        None => {}
    }

    Ok(())
}
