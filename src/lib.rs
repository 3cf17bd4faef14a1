// Library exports for integration tests and the desktop binary

pub mod api;
pub mod config;
pub mod models;
pub mod store;
pub mod upload;

// Desktop UI (requires the `desktop` feature)
#[cfg(feature = "desktop")]
pub mod ui;

pub use api::{PhotoApi, PhotoApiError, PhotoClient};
pub use config::Config;
