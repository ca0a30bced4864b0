use anyhow::Result;
use easytrack::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
