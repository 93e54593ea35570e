use tokio_rusqlite::Connection;

use crate::core::AppConfig;
use crate::countdown::CountdownCalculator;

pub struct AppState {
    pub db: Connection,
    pub config: AppConfig,
    // Resolved once from the configured fallbacks
    pub calculator: CountdownCalculator,
}

impl AppState {
    pub fn new(db: Connection, config: AppConfig) -> Self {
        let calculator = config.calculator();
        Self {
            db,
            config,
            calculator,
        }
    }
}
