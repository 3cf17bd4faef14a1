use crate::ui::Route;
use dioxus::prelude::*;
use tracing::debug;

const STYLE: &str = include_str!("../../../assets/main.css");

#[component]
pub fn App() -> Element {
    debug!("Rendering app component");

    rsx! {
        document::Style { {STYLE} }
        Router::<Route> {}
    }
}
