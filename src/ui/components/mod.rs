mod album_card;
mod album_detail;
mod album_form;
mod albums;
mod app;
mod banners;
mod dialog;
mod navbar;
mod photo_grid;
mod photo_upload;

pub use album_card::AlbumCard;
pub use album_detail::AlbumDetail;
pub use album_form::AlbumForm;
pub use albums::Albums;
pub use app::App;
pub use banners::{ErrorBanner, UploadBanner};
pub use dialog::ConfirmDialog;
pub use navbar::Navbar;
pub use photo_grid::PhotoGrid;
pub use photo_upload::PhotoUpload;
