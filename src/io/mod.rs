//! I/O layer: the enhancement service client and the writer that saves
//! enhanced images to disk.
use crate::core::datauri::DataUri;
use crate::error::Result;
use crate::types::Resolution;

pub mod gemini;
pub use gemini::GeminiClient;

pub mod writers;

/// Something that turns an image into an enhanced one at a resolution tier.
///
/// Implementations block until the single attempt resolves; callers run them
/// off the UI thread.
pub trait Enhancer: Send + Sync {
    fn enhance(&self, image: &DataUri, resolution: Resolution) -> Result<DataUri>;
}
