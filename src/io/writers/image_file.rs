use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::core::datauri::DataUri;
use crate::error::Result;

/// Decode a data URI and write its bytes to `output`, creating parent
/// directories as needed. Returns the number of bytes written.
pub fn write_data_uri(output: &Path, image: &DataUri) -> Result<usize> {
    let bytes = image.decode()?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;
    info!(
        "Saved {} ({} bytes, {})",
        output.display(),
        bytes.len(),
        image.mime_type()
    );
    Ok(bytes.len())
}
