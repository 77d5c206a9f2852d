//! High-level, ergonomic library API: load a photo, enhance it through any
//! [`Enhancer`], and save the result under its derived download name. The GUI
//! and CLI are thin layers over these entrypoints.
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::intake::UploadedImage;
use crate::core::params::EnhanceConfig;
use crate::core::state::EnhancementResult;
use crate::error::Result;
use crate::io::writers::write_data_uri;
use crate::io::{Enhancer, GeminiClient};
use crate::types::Resolution;

/// Read a photo from disk into memory.
pub fn load_image(path: &Path) -> Result<UploadedImage> {
    UploadedImage::from_path(path)
}

/// Build the Gemini-backed enhancer from configuration.
pub fn gemini_enhancer(config: EnhanceConfig) -> Result<GeminiClient> {
    GeminiClient::new(config)
}

/// One enhancement attempt for an uploaded image.
pub fn enhance_image(
    enhancer: &dyn Enhancer,
    image: &UploadedImage,
    resolution: Resolution,
) -> Result<EnhancementResult> {
    debug!("Enhancing {} at {}", image.file_name, resolution);
    let enhanced = enhancer.enhance(&image.data_uri, resolution)?;
    Ok(EnhancementResult::new(image, enhanced, resolution))
}

/// Write an enhanced image to an explicit path.
pub fn save_enhanced(result: &EnhancementResult, output: &Path) -> Result<PathBuf> {
    write_data_uri(output, &result.image)?;
    Ok(output.to_path_buf())
}

/// Write an enhanced image into a directory under its download name.
pub fn save_enhanced_in(result: &EnhancementResult, output_dir: &Path) -> Result<PathBuf> {
    save_enhanced(result, &output_dir.join(&result.download_name))
}

/// Where a file-to-file run should write its result.
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Exact file path
    File(PathBuf),
    /// Directory; the file is named `{base}-enhanced-{label}.{ext}`
    Directory(PathBuf),
}

/// Load, enhance and save in one go. Returns the written path.
pub fn enhance_file_to_path(
    enhancer: &dyn Enhancer,
    input: &Path,
    resolution: Resolution,
    target: &OutputTarget,
) -> Result<PathBuf> {
    let image = load_image(input)?;
    let result = enhance_image(enhancer, &image, resolution)?;
    let written = match target {
        OutputTarget::File(path) => save_enhanced(&result, path)?,
        OutputTarget::Directory(dir) => save_enhanced_in(&result, dir)?,
    };
    info!("{} -> {}", input.display(), written.display());
    Ok(written)
}
