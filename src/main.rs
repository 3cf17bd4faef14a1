use dioxus::prelude::*;
use photo_organizer::config::Config;
use photo_organizer::ui::{make_config, App, AppContext};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    // Use RUST_LOG env var if set, otherwise log this crate at info level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("photo_organizer=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting photo organizer against {}", config.api_base_url);
    let context = AppContext::new(config);

    LaunchBuilder::desktop()
        .with_cfg(make_config())
        .with_context(context)
        .launch(App);
}
