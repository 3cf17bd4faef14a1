use crate::api::PhotoClient;
use crate::models::Photo;
use dioxus::prelude::*;
use rfd::AsyncFileDialog;
use tracing::{error, info};

#[component]
pub fn PhotoGrid(photos: Vec<Photo>, client: PhotoClient, on_delete: EventHandler<Photo>) -> Element {
    if photos.is_empty() {
        return rsx! {
            div { class: "empty-state",
                h3 { class: "empty-state-title", "No photos yet" }
                p { class: "empty-state-text", "Upload your first photo to get started" }
            }
        };
    }

    rsx! {
        div { class: "photo-grid",
            for photo in photos {
                PhotoItem {
                    key: "{photo.id}",
                    photo,
                    client: client.clone(),
                    on_delete,
                }
            }
        }
    }
}

#[component]
fn PhotoItem(photo: Photo, client: PhotoClient, on_delete: EventHandler<Photo>) -> Element {
    let view_url = client.view_url(photo.id);
    let photo_for_delete = photo.clone();
    let photo_for_download = photo.clone();

    rsx! {
        div { class: "photo-item",
            img {
                src: "{view_url}",
                alt: "{photo.original_filename}",
                loading: "lazy",
            }
            div { class: "photo-overlay",
                button {
                    class: "btn btn-sm btn-secondary",
                    title: "Download original",
                    onclick: move |_| {
                        let client = client.clone();
                        let photo = photo_for_download.clone();
                        spawn(async move { save_original(client, photo).await });
                    },
                    "Download"
                }
                button {
                    class: "btn btn-sm btn-danger",
                    title: "Delete photo",
                    onclick: move |_| on_delete.call(photo_for_delete.clone()),
                    "Delete"
                }
            }
        }
    }
}

/// Fetch the original and write it where the user chooses
async fn save_original(client: PhotoClient, photo: Photo) {
    let Some(target) = AsyncFileDialog::new()
        .set_title("Save Photo")
        .set_file_name(photo.original_filename.as_str())
        .save_file()
        .await
    else {
        return;
    };

    match client.download_photo(photo.id).await {
        Ok(content) => match tokio::fs::write(target.path(), &content.bytes).await {
            Ok(()) => info!("Saved photo {} to {}", photo.id, target.path().display()),
            Err(e) => error!("Failed to write photo {}: {}", photo.id, e),
        },
        Err(e) => error!("Failed to download photo {}: {}", photo.id, e),
    }
}
