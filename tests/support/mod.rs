#![allow(dead_code)]

pub mod fake_server;
pub mod mock_photo_api;

pub use fake_server::FakeServer;
pub use mock_photo_api::MockPhotoApi;

use photo_organizer::upload::UploadFile;

/// Initialize tracing for tests with proper test output handling
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn jpeg(name: &str) -> UploadFile {
    UploadFile::new(name, "image/jpeg", vec![0xff, 0xd8, 0xff, 0xe0])
}

pub fn png(name: &str) -> UploadFile {
    UploadFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

/// An accepted media type whose bytes the server cannot decode
pub fn corrupt_jpeg(name: &str) -> UploadFile {
    UploadFile::new(name, "image/jpeg", b"corrupt".to_vec())
}

pub fn text(name: &str) -> UploadFile {
    UploadFile::new(name, "text/plain", b"hello".to_vec())
}
