use tracing_subscriber::EnvFilter;

use medrisk_lambda::config::Config;
use medrisk_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env();
    tracing::info!(bucket = %config.bucket, model_dir = %config.model_dir.display(), "starting");

    let s3 = medrisk_storage::client::build_client().await;
    let state = AppState::from_config(s3, &config)?;

    lambda_http::run(medrisk_lambda::app(state))
        .await
        .map_err(|e| eyre::eyre!(e))
}
