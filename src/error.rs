//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, HTTP, JSON and image-decoding errors, and provides
//! semantic variants for malformed input, service refusals and illegal state
//! transitions.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read image file {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not an image file: {name}")]
    NotAnImage { name: String },

    #[error("Invalid base64 image data format: {reason}")]
    MalformedDataUri { reason: &'static str },

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Request to the enhancement service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Enhancement service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("No image data found in the API response{}", detail_suffix(.detail))]
    NoImageData { detail: Option<String> },

    #[error("API key is not set. Export API_KEY (or GEMINI_API_KEY) before enhancing")]
    MissingApiKey,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("An enhancement is already in progress")]
    EnhancementInFlight,

    #[error("Unknown resolution: {0}")]
    InvalidResolution(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_image_data_message_includes_detail() {
        let bare = Error::NoImageData { detail: None };
        assert_eq!(bare.to_string(), "No image data found in the API response");

        let detailed = Error::NoImageData {
            detail: Some("finish reason: IMAGE_SAFETY".to_string()),
        };
        assert_eq!(
            detailed.to_string(),
            "No image data found in the API response (finish reason: IMAGE_SAFETY)"
        );
    }

    #[test]
    fn not_an_image_names_the_file() {
        let err = Error::NotAnImage {
            name: "notes.txt".to_string(),
        };
        assert_eq!(err.to_string(), "Not an image file: notes.txt");
    }
}
