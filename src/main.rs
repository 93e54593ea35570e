use anyhow::Result;
use wedsite::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
