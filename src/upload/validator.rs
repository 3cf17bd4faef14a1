use super::UploadFile;
use crate::models::ValidationError;
use std::path::Path;

/// Declared media types the service can store
pub const ACCEPTED_MEDIA_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/heic",
    "image/heif",
];

/// Client-side filtering result for one selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Accepted files, in selection order
    pub accepted: Vec<UploadFile>,
    pub rejected_count: usize,
}

/// What the user is told about client-side filtering. Reported separately
/// from the server's upload counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionNotice {
    NoValidImages { selected: usize },
    PartiallyRejected { accepted: usize, selected: usize },
}

impl SelectionNotice {
    pub fn message(&self) -> String {
        match self {
            SelectionNotice::NoValidImages { .. } => {
                "Please select valid image files (JPEG, PNG, HEIC)".to_string()
            }
            SelectionNotice::PartiallyRejected { accepted, selected } => {
                format!("Selected {accepted} valid images out of {selected} files")
            }
        }
    }
}

impl ValidationReport {
    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected_count
    }

    pub fn notice(&self) -> Option<SelectionNotice> {
        if self.accepted.is_empty() {
            Some(SelectionNotice::NoValidImages {
                selected: self.total(),
            })
        } else if self.rejected_count > 0 {
            Some(SelectionNotice::PartiallyRejected {
                accepted: self.accepted.len(),
                selected: self.total(),
            })
        } else {
            None
        }
    }

    /// Fails with `NoValidImages` when nothing can be submitted
    pub fn require_accepted(&self) -> Result<&[UploadFile], ValidationError> {
        if self.accepted.is_empty() {
            Err(ValidationError::NoValidImages {
                selected: self.total(),
            })
        } else {
            Ok(&self.accepted)
        }
    }
}

pub fn is_accepted_media_type(media_type: &str) -> bool {
    ACCEPTED_MEDIA_TYPES.contains(&media_type)
}

/// Keep the files whose declared media type is accepted
pub fn validate_selection(selection: Vec<UploadFile>) -> ValidationReport {
    let total = selection.len();
    let accepted: Vec<UploadFile> = selection
        .into_iter()
        .filter(|f| is_accepted_media_type(&f.media_type))
        .collect();

    ValidationReport {
        rejected_count: total - accepted.len(),
        accepted,
    }
}

/// Declared media type for a file picked from disk, based on its extension
pub fn media_type_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
    .to_string()
}
