//! Per-screen store hooks. A store lives exactly as long as the component
//! that created it; its state is mirrored into a signal for rendering.

use crate::models::AlbumId;
use crate::store::{AlbumDetailState, AlbumDetailStore, AlbumsState, AlbumsStore};
use crate::upload::UploadState;
use dioxus::prelude::*;
use tokio::sync::watch;
use tracing::debug;

use super::app_context::use_app_context;

/// Copy every published value into `signal` until the sender goes away or the
/// owning component unmounts.
fn mirror<T: Clone + 'static>(mut rx: watch::Receiver<T>, mut signal: Signal<T>) {
    spawn(async move {
        while rx.changed().await.is_ok() {
            let value = rx.borrow_and_update().clone();
            signal.set(value);
        }
    });
}

pub fn use_albums_store() -> (AlbumsStore, Signal<AlbumsState>) {
    let ctx = use_app_context();
    let store = use_hook(|| AlbumsStore::new(ctx.client.clone()));
    let state = use_signal(|| store.snapshot());

    use_hook({
        let store = store.clone();
        move || {
            debug!("Mounting albums screen");
            mirror(store.subscribe(), state);
            spawn(async move { store.load().await });
        }
    });

    (store, state)
}

pub struct AlbumDetailHandles {
    pub store: AlbumDetailStore,
    pub state: Signal<AlbumDetailState>,
    pub uploads: Signal<UploadState>,
}

pub fn use_album_detail_store(album_id: AlbumId) -> AlbumDetailHandles {
    let ctx = use_app_context();
    let store = use_hook(|| {
        AlbumDetailStore::new(
            ctx.client.clone(),
            album_id,
            ctx.config.upload_notice_delay,
        )
    });
    let state = use_signal(|| store.snapshot());
    let uploads = use_signal(|| store.upload_state());

    use_hook({
        let store = store.clone();
        move || {
            debug!("Mounting album {} screen", album_id);
            mirror(store.subscribe(), state);
            mirror(store.subscribe_uploads(), uploads);
            spawn(async move { store.load().await });
        }
    });

    AlbumDetailHandles {
        store,
        state,
        uploads,
    }
}
