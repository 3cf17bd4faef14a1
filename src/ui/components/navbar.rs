use crate::ui::Route;
use dioxus::prelude::*;

/// Layout shared by both screens
#[component]
pub fn Navbar() -> Element {
    rsx! {
        div { class: "navbar",
            Link { to: Route::Albums {}, class: "navbar-title", "Photo Organizer" }
        }
        Outlet::<Route> {}
    }
}
