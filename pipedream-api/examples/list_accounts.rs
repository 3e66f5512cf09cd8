use pipedream_api::{Client, PipedreamError, Request, Settings};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
pub async fn main() -> Result<(), PipedreamError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let settings = Settings::new().map_err(|e| PipedreamError::Configuration(e.to_string()))?;
    let external_user_id = std::env::args().nth(1).unwrap_or_else(|| "demo-user".to_string());

    let client = Client::new(settings)?;
    let req = Request::accounts().for_user(&external_user_id).list();

    let res = client.send(req).await?;
    for account in res.data {
        let app = account.app.and_then(|app| app.name_slug).unwrap_or_default();
        tracing::info!(
            id = %account.id,
            app = %app,
            healthy = account.healthy,
            "Connected account"
        );
    }
    Ok(())
}
