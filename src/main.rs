use dotenv::dotenv;
use log::info;

use shinpaku_server::config::Config;
use shinpaku_server::{create_router, logger, AppState, Library};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::from_env();
    logger::init(config.log_level).map_err(anyhow::Error::msg)?;

    // A failed load leaves the server up; filter requests then report the
    // dataset as unavailable.
    let library = Library::load(&config.dataset_path);
    let state = AppState::new(library, config.dataset_path.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Listening on http://{}", config.bind_address());
    axum::serve(listener, app).await?;

    Ok(())
}
