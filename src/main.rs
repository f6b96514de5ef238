use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    giftwise_cli::run_cli().await
}
