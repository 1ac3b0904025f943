#[tokio::main]
async fn main() -> anyhow::Result<()> {
    papr_lens::run().await
}
