use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    autofiller_cli::cli::app::run().await
}
