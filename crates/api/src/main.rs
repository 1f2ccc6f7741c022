use anyhow::Context;

use stockroom_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();
    stockroom_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(?config, "starting stockroom-api");

    let app = stockroom_api::app::build_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
