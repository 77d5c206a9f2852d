//! `data:` URI codec. Images travel through the app as
//! `data:<mime>;base64,<payload>` so they can be handed to the service and
//! decoded for display without touching disk.
use base64::{Engine as _, engine::general_purpose};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime_type: String,
    data: String,
}

impl DataUri {
    /// Encode raw bytes under the given MIME type.
    pub fn encode(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Wrap an already base64-encoded payload, e.g. one returned by the service.
    pub fn from_base64(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Parse the textual form.
    ///
    /// The header is everything before the first comma and must contain the
    /// MIME type between `:` and `;`. Both halves must be non-empty.
    pub fn parse(uri: &str) -> Result<Self> {
        let (header, data) = uri.split_once(',').ok_or(Error::MalformedDataUri {
            reason: "missing comma separator",
        })?;
        if header.is_empty() || data.is_empty() {
            return Err(Error::MalformedDataUri {
                reason: "empty header or payload",
            });
        }

        let mime_type = header
            .split_once(':')
            .and_then(|(_, rest)| rest.split_once(';'))
            .map(|(mime, _)| mime)
            .filter(|mime| !mime.is_empty())
            .ok_or(Error::MalformedDataUri {
                reason: "could not extract MIME type",
            })?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload, without the header.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(general_purpose::STANDARD.decode(self.data.as_bytes())?)
    }

    /// Approximate decoded size in bytes, without decoding.
    pub fn payload_len(&self) -> usize {
        self.data.len() / 4 * 3
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

impl std::str::FromStr for DataUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
