use crate::upload::{media_type_for_path, UploadFile};
use dioxus::prelude::*;
use futures::future::join_all;
use rfd::AsyncFileDialog;
use std::path::Path;
use tracing::warn;

const PICKER_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "heic", "heif"];

/// Drop zone and file picker. Both paths hand the raw selection to
/// `on_files`; filtering happens in the upload pipeline.
#[component]
pub fn PhotoUpload(uploading: bool, on_files: EventHandler<Vec<UploadFile>>) -> Element {
    let mut drag_over = use_signal(|| false);

    let area_class = if drag_over() {
        "upload-area dragover"
    } else {
        "upload-area"
    };

    rsx! {
        div {
            class: "{area_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                drag_over.set(true);
            },
            ondragleave: move |evt| {
                evt.prevent_default();
                drag_over.set(false);
            },
            ondrop: move |evt| {
                evt.prevent_default();
                drag_over.set(false);
                if uploading {
                    return;
                }
                let files = evt.files();
                spawn(async move {
                    let mut selection = Vec::new();
                    for file in files {
                        let name = file.name();
                        let media_type = file
                            .content_type()
                            .unwrap_or_else(|| media_type_for_path(Path::new(&name)));
                        match file.read_bytes().await {
                            Ok(bytes) => selection.push(UploadFile::new(name, media_type, bytes.to_vec())),
                            Err(e) => warn!("Could not read dropped file {}: {}", name, e),
                        }
                    }
                    if !selection.is_empty() {
                        on_files.call(selection);
                    }
                });
            },
            onclick: move |_| {
                if uploading {
                    return;
                }
                spawn(async move {
                    if let Some(selection) = pick_files().await {
                        on_files.call(selection);
                    }
                });
            },
            div { class: "upload-text",
                if uploading {
                    "Uploading photos..."
                } else {
                    "Drop photos here or click to select"
                }
            }
            div { class: "upload-hint", "Supports JPEG, PNG, and HEIC formats" }
        }
    }
}

async fn pick_files() -> Option<Vec<UploadFile>> {
    let handles = AsyncFileDialog::new()
        .set_title("Select Photos")
        .add_filter("Images", &PICKER_EXTENSIONS)
        .pick_files()
        .await?;

    let reads = handles.into_iter().map(|handle| async move {
        let media_type = media_type_for_path(handle.path());
        let data = handle.read().await;
        UploadFile::new(handle.file_name(), media_type, data)
    });
    Some(join_all(reads).await)
}
