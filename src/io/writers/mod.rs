//! Writers for enhancement outputs.
pub mod image_file;

pub use image_file::write_data_uri;
