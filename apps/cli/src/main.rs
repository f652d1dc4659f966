#[tokio::main]
async fn main() -> anyhow::Result<()> {
    microlearn_cli::run().await
}
