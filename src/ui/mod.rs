pub mod app;
pub mod app_context;
pub mod components;
pub mod hooks;

pub use app::*;
pub use app_context::AppContext;
pub use components::App;
