use crate::upload::UploadState;
use dioxus::prelude::*;

/// The screen's single error slot
#[component]
pub fn ErrorBanner(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            div { class: "banner banner-error", "{message}" }
        }
    }
}

/// Upload summary and client-side selection notice. The two are separate
/// reports and are rendered separately.
#[component]
pub fn UploadBanner(state: UploadState) -> Element {
    rsx! {
        if let Some(notice) = state.notice {
            div { class: "banner banner-notice", "{notice.message()}" }
        }
        if let Some(progress) = state.progress {
            div { class: "banner banner-success", "{progress.message()}" }
        }
    }
}
