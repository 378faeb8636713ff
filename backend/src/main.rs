use std::error::Error;
use strips_backend::{
    build_rocket,
    config::Config,
    routes::AppState,
    store::VoteStore,
    Catalog,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn load_catalog(config: &Config) -> Result<Catalog, Box<dyn Error>> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            info!("📋 Loading catalog from {}", path.display());
            Catalog::load(path)?
        }
        None => {
            info!("📋 No CATALOG_PATH set, serving comics 1-{}", config.latest_comic);
            Catalog::sequential(config.latest_comic)
        }
    };
    if catalog.is_empty() {
        warn!("Catalog has no published comics");
    }
    Ok(catalog)
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚀 Starting comic strip server");

    let config = Config::from_env()?;
    let catalog = load_catalog(&config)?;

    let store = VoteStore::load(config.database_path.clone()).map_err(|e| {
        error!("Refusing to start: {}", e);
        e
    })?;
    info!("🗳️ Votes identified by {:?}", config.identity_source);

    let state = AppState::new(store, catalog, &config);
    build_rocket(state, config.identity_source)
        .launch()
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
