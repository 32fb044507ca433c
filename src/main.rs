#[tokio::main]
async fn main() {
    if let Err(e) = tiktok_bot_lib::run().await {
        tracing::error!(error = %e, "TikBot stopped");
        std::process::exit(1);
    }
}
