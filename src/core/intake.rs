//! Upload intake: turn a picked or dropped file into an [`UploadedImage`].
use std::fs;
use std::path::Path;

use image::ImageFormat;
use tracing::{debug, trace};

use super::datauri::DataUri;
use crate::error::{Error, Result};

/// User-facing text for any intake failure. The underlying cause is logged.
pub const UPLOAD_ERROR_MESSAGE: &str = "Failed to read the image file. Please try another one.";

const FALLBACK_MIME: &str = "application/octet-stream";

/// A photo picked by the user, held encoded in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Name as the user saw it (e.g. "cat.jpg"), used to derive the download name.
    pub file_name: String,
    pub data_uri: DataUri,
}

impl UploadedImage {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| Error::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let mime_type = mime_for(path, &bytes);
        debug!(
            "Read {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            mime_type
        );
        Ok(Self::from_bytes(file_name, mime_type, &bytes))
    }

    /// Build from bytes that arrived without a path, e.g. a drag-drop payload.
    pub fn from_bytes(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            file_name: file_name.into(),
            data_uri: DataUri::encode(mime_type, bytes),
        }
    }

    pub fn mime_type(&self) -> &str {
        self.data_uri.mime_type()
    }
}

/// MIME type for a file: the declared type (extension) wins, then the content.
pub fn mime_for(path: &Path, bytes: &[u8]) -> String {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type().to_string();
    }
    trace!("No known image extension on {}, sniffing content", path.display());
    match image::guess_format(bytes) {
        Ok(format) => format.to_mime_type().to_string(),
        Err(_) => FALLBACK_MIME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn declared_extension_sets_mime_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let cases = [
            ("cat.jpg", "image/jpeg"),
            ("cat.JPEG", "image/jpeg"),
            ("cat.png", "image/png"),
            ("cat.webp", "image/webp"),
            ("cat.gif", "image/gif"),
        ];
        for (name, mime) in cases {
            let path = write_file(&dir, name, b"not really pixels");
            let upload = UploadedImage::from_path(&path).unwrap();
            assert_eq!(upload.file_name, name);
            assert!(
                upload.data_uri.to_string().starts_with(&format!("data:{mime};base64,")),
                "{name}"
            );
        }
    }

    #[test]
    fn sniffs_content_when_extension_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "photo.upload", &PNG_SIGNATURE);
        let upload = UploadedImage::from_path(&path).unwrap();
        assert_eq!(upload.mime_type(), "image/png");

        let path = write_file(&dir, "notes.upload", b"plain text");
        assert_eq!(UploadedImage::from_path(&path).unwrap().mime_type(), FALLBACK_MIME);
    }

    #[test]
    fn payload_round_trips_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "tiny.png", &PNG_SIGNATURE);
        let upload = UploadedImage::from_path(&path).unwrap();
        assert_eq!(upload.data_uri.decode().unwrap(), PNG_SIGNATURE);
    }

    #[test]
    fn missing_file_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = UploadedImage::from_path(&dir.path().join("gone.jpg")).unwrap_err();
        assert!(matches!(err, Error::ReadFailed { .. }));
    }
}
