use anyhow::Result;
use chrono::Utc;

use crate::core::AppConfig;

/// Print the time left until a ceremony, using the configured defaults
/// for any part that is left out.
pub fn run(
    date: String,
    time: Option<String>,
    timezone: Option<String>,
    config: &AppConfig,
) -> Result<()> {
    let calculator = config.calculator();
    let time = time.unwrap_or_else(|| config.default_wedding_time.clone());
    let timezone = timezone.unwrap_or_else(|| config.default_timezone.clone());

    let target = calculator.target_instant(&date, &time, &timezone)?;
    let remaining = calculator.compute(&date, &time, &timezone, Utc::now())?;

    println!("Ceremony starts at {}", target.to_rfc3339());
    if remaining.is_over() {
        println!("The wedding has started!");
    } else {
        println!(
            "{} days, {} hours, {} minutes, {} seconds to go",
            remaining.days, remaining.hours, remaining.minutes, remaining.seconds
        );
    }

    Ok(())
}
