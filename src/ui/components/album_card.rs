use crate::models::Album;
use crate::ui::app_context::use_app_context;
use dioxus::prelude::*;

/// Individual album card
#[component]
pub fn AlbumCard(
    album: Album,
    on_view: EventHandler<Album>,
    on_edit: EventHandler<Album>,
    on_delete: EventHandler<Album>,
) -> Element {
    let ctx = use_app_context();
    let cover_url = album.cover_photo.map(|id| ctx.client.view_url(id));
    let count_label = if album.photo_count == 1 { "photo" } else { "photos" };

    let album_for_view = album.clone();
    let album_for_edit = album.clone();
    let album_for_delete = album.clone();

    rsx! {
        div {
            class: "card album-card",
            onclick: move |_| on_view.call(album_for_view.clone()),
            div { class: "album-cover",
                if let Some(url) = cover_url {
                    img { src: "{url}", alt: "{album.name}" }
                } else {
                    div { "📷" }
                }
            }
            div { class: "album-info",
                h3 { class: "album-name", "{album.name}" }
                if let Some(description) = album.description.as_ref().filter(|d| !d.is_empty()) {
                    p { class: "album-description", "{description}" }
                }
                div { class: "album-stats", "{album.photo_count} {count_label}" }
            }
            div {
                class: "album-actions",
                onclick: move |evt| evt.stop_propagation(),
                button {
                    class: "btn btn-sm btn-secondary",
                    title: "Edit album",
                    onclick: move |_| on_edit.call(album_for_edit.clone()),
                    "Edit"
                }
                button {
                    class: "btn btn-sm btn-danger",
                    title: "Delete album",
                    onclick: move |_| on_delete.call(album_for_delete.clone()),
                    "Delete"
                }
            }
        }
    }
}
