mod pipeline;
mod validator;

pub use pipeline::{
    UploadOutcome, UploadPhase, UploadPipeline, UploadProgress, UploadState, UPLOAD_FAILED_MESSAGE,
};
pub use validator::{
    media_type_for_path, validate_selection, SelectionNotice, ValidationReport,
    ACCEPTED_MEDIA_TYPES,
};

/// A file picked or dropped by the user, with its declared media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }
}
