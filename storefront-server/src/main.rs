use storefront_server::core::{Config, Server};
use storefront_server::utils::init_logger_with_file;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let log_dir = format!("{}/logs", config.work_dir);
    std::fs::create_dir_all(&log_dir).ok();
    init_logger_with_file(Some("info"), Some(&log_dir));

    tracing::info!(
        port = config.http_port,
        environment = %config.environment,
        "Starting storefront server"
    );

    let server = Server::new(config);
    server.run().await?;
    Ok(())
}
