use tienda_server::{Config, LogFormat, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let default_level = if config.is_development() {
        "debug"
    } else {
        "info"
    };
    init_logger_with_file(
        Some(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| default_level.to_string())
                .as_str(),
        ),
        config.log_dir.as_deref(),
        LogFormat::for_environment(&config.environment),
    );

    tracing::info!("Tienda back-office server starting...");

    // 2. Initialize server state (database, schema, admin gate)
    let state = ServerState::initialize(&config).await?;

    // 3. Run the HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
