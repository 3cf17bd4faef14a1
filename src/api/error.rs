use reqwest::Error as ReqwestError;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] ReqwestError),
    #[error("{0}")]
    Remote(RemoteError),
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Classification of a non-2xx status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    BadRequest,
    NotFound,
    Conflict,
    PayloadTooLarge,
    Server,
    Other,
}

impl RemoteErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => RemoteErrorKind::BadRequest,
            404 => RemoteErrorKind::NotFound,
            409 => RemoteErrorKind::Conflict,
            413 => RemoteErrorKind::PayloadTooLarge,
            500..=599 => RemoteErrorKind::Server,
            _ => RemoteErrorKind::Other,
        }
    }
}

/// A non-2xx response from the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub status: u16,
    pub kind: RemoteErrorKind,
    /// Human-readable message from the body's `error` field, if any
    pub message: Option<String>,
}

impl RemoteError {
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self {
            status,
            kind: RemoteErrorKind::from_status(status),
            message,
        }
    }

    /// Build from a raw failure body. Bodies that are not JSON or carry no
    /// `error` string leave the message empty.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            error: Option<String>,
        }

        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty());
        Self::new(status, message)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "Server returned {}: {}", self.status, message),
            None => write!(f, "Server returned {}", self.status),
        }
    }
}

impl PhotoApiError {
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        PhotoApiError::Remote(RemoteError::new(status, Some(message.into())))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PhotoApiError::Remote(e) if e.kind == RemoteErrorKind::NotFound)
    }

    /// Message supplied by the server, if the failure carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            PhotoApiError::Remote(e) => e.message.as_deref(),
            _ => None,
        }
    }

    /// Message to show in a screen's error banner
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}
