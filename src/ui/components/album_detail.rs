use crate::models::{AlbumFields, AlbumId, Photo};
use crate::store::{AlbumView, FormSubmission};
use crate::ui::hooks::use_album_detail_store;
use crate::ui::Route;
use crate::upload::UploadFile;
use dioxus::prelude::*;
use tracing::debug;

use super::{AlbumForm, ConfirmDialog, ErrorBanner, PhotoGrid, PhotoUpload, UploadBanner};

/// Album detail route. Keyed on the id so a different album gets a fresh store.
#[component]
pub fn AlbumDetail(album_id: i64) -> Element {
    rsx! {
        AlbumDetailScreen { key: "{album_id}", album_id }
    }
}

#[component]
fn AlbumDetailScreen(album_id: i64) -> Element {
    let handles = use_album_detail_store(AlbumId(album_id));
    let store = handles.store.clone();
    let snapshot = (handles.state)();
    let uploads = (handles.uploads)();

    let on_back = move |_| {
        navigator().push(Route::Albums {});
    };
    let on_edit = {
        let store = store.clone();
        move |_| store.open_edit()
    };
    let on_files = {
        let store = store.clone();
        move |selection: Vec<UploadFile>| {
            let store = store.clone();
            spawn(async move {
                if store.select_files(selection).await.is_none() {
                    debug!("Ignoring file selection while uploading");
                }
            });
        }
    };
    let on_delete_photo = {
        let store = store.clone();
        move |photo: Photo| store.request_photo_delete(&photo)
    };
    let on_submit = {
        let store = store.clone();
        move |fields: AlbumFields| {
            let store = store.clone();
            spawn(async move {
                if let FormSubmission::Invalid(e) = store.submit_form(fields).await {
                    debug!("Album form not submitted: {}", e);
                }
            });
        }
    };
    let on_close = {
        let store = store.clone();
        move |_| {
            store.close_modal();
        }
    };
    let on_confirm_delete = {
        let store = store.clone();
        move |_| {
            let store = store.clone();
            spawn(async move {
                store.confirm_delete().await;
            });
        }
    };
    let on_cancel_delete = {
        let store = store.clone();
        move |_| store.cancel_delete()
    };

    let detail = match snapshot.view() {
        AlbumView::Loading => {
            return rsx! {
                div { class: "container",
                    div { class: "loading",
                        div { class: "spinner" }
                        "Loading album..."
                    }
                }
            };
        }
        AlbumView::NotFound => {
            return rsx! {
                div { class: "container",
                    div { class: "empty-state",
                        h3 { class: "empty-state-title", "Album not found" }
                        p { class: "empty-state-text",
                            "The album you're looking for doesn't exist or has been deleted."
                        }
                        button { class: "btn btn-primary", onclick: on_back, "Back to Albums" }
                    }
                }
            };
        }
        AlbumView::Unavailable => {
            let store = store.clone();
            return rsx! {
                div { class: "container",
                    ErrorBanner { message: snapshot.error.clone() }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| {
                            let store = store.clone();
                            spawn(async move { store.load().await });
                        },
                        "Retry"
                    }
                }
            };
        }
        AlbumView::Ready(detail) => detail.clone(),
    };

    let photo_count = detail.photos.len();
    let count_label = if photo_count == 1 { "photo" } else { "photos" };

    rsx! {
        div { class: "container",
            header { class: "header",
                button { class: "btn btn-secondary", onclick: on_back, "← Back" }
                div {
                    h1 { "{detail.album.name}" }
                    if let Some(description) = detail.album.description.as_ref().filter(|d| !d.is_empty()) {
                        p { class: "album-description", "{description}" }
                    }
                }
                button { class: "btn btn-primary", onclick: on_edit, "Edit" }
            }

            ErrorBanner { message: snapshot.error.clone() }
            UploadBanner { state: uploads.clone() }

            PhotoUpload { uploading: uploads.is_uploading(), on_files }

            div { class: "photo-count", "Showing {photo_count} {count_label}" }

            PhotoGrid {
                photos: detail.photos.clone(),
                client: store.client().clone(),
                on_delete: on_delete_photo,
            }

            if snapshot.editing {
                AlbumForm {
                    title: "Edit Album".to_string(),
                    initial: AlbumFields::from_album(&detail.album),
                    is_edit: true,
                    submitting: snapshot.submitting,
                    error: snapshot.error.clone(),
                    on_submit,
                    on_cancel: on_close,
                }
            }

            if let Some(pending) = snapshot.pending_delete.clone() {
                ConfirmDialog {
                    title: "Delete Photo?".to_string(),
                    message: pending.prompt,
                    on_confirm: on_confirm_delete,
                    on_cancel: on_cancel_delete,
                }
            }
        }
    }
}
