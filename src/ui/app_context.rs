use crate::api::PhotoClient;
use crate::config;
use dioxus::prelude::*;

/// Shared by every screen. Stores are not shared: each screen builds its own
/// from this client when it mounts.
#[derive(Clone)]
pub struct AppContext {
    pub client: PhotoClient,
    pub config: config::Config,
}

impl AppContext {
    pub fn new(config: config::Config) -> Self {
        Self {
            client: PhotoClient::new(config.api_base_url.clone()),
            config,
        }
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>()
}
