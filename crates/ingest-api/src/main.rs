use ingest_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (backends, services, routes)
    let (_state, router) = ingest_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    ingest_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
