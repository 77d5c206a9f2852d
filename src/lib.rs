#![doc = r#"
PIXELENHANCE: turn low-quality photos into crisp, higher-resolution images
with a generative image model, then compare before and after.

This crate provides the typed pieces behind the PIXELENHANCE desktop app and
CLI: an in-memory data-URI image model, a single-attempt client for the
Gemini image model, an explicit workflow state machine, and the pointer model
of the before/after comparison slider. It can be embedded in your own Rust
applications.

Requirements
------------
- An API key for the Gemini API, exported as `API_KEY` (or `GEMINI_API_KEY`).
- Rust 2024 edition toolchain.

Add dependency
--------------
```toml
[dependencies]
pixelenhance = { version = "0.1", default-features = false }
```

Quick start: enhance a file
---------------------------
```rust,no_run
use std::path::Path;
use pixelenhance::{api, EnhanceConfig, OutputTarget, Resolution};

fn main() -> pixelenhance::Result<()> {
    let client = api::gemini_enhancer(EnhanceConfig::from_env())?;
    let written = api::enhance_file_to_path(
        &client,
        Path::new("photos/cat.jpg"),
        Resolution::P1080,
        &OutputTarget::Directory("out".into()),
    )?;
    // out/cat-enhanced-1080p.jpg
    println!("{}", written.display());
    Ok(())
}
```

Driving the workflow yourself
-----------------------------
```rust,no_run
use std::path::Path;
use pixelenhance::{api, EnhanceConfig, Enhancer, Resolution, UploadedImage, Workflow};

fn main() -> pixelenhance::Result<()> {
    let client = api::gemini_enhancer(EnhanceConfig::from_env())?;
    let mut workflow = Workflow::new();

    workflow.accept_upload(UploadedImage::from_path(Path::new("cat.jpg"))?)?;
    let request = workflow.begin_enhancement(Resolution::P720)?;
    let outcome = client.enhance(&request.image, request.resolution);
    workflow.complete_enhancement(request.ticket, outcome);

    if let Some(result) = workflow.result() {
        api::save_enhanced_in(result, Path::new("."))?;
    } else if let Some(message) = workflow.error() {
        eprintln!("{message}");
    }
    Ok(())
}
```

Error handling
--------------
All public functions return `pixelenhance::Result<T>`; match on
`pixelenhance::Error` to tell malformed input from service refusals.

```rust,no_run
use pixelenhance::{api, EnhanceConfig, Error};

fn main() {
    match api::gemini_enhancer(EnhanceConfig::from_env()) {
        Ok(_) => {}
        Err(Error::MissingApiKey) => eprintln!("export API_KEY first"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Feature flags
-------------
- `gui`: builds the egui desktop front end (`pixelenhanceUI`).
- `full`: everything.

Useful modules
--------------
- [`api`]: high-level entry points.
- [`core`]: data URIs, intake, naming, workflow state, comparator model, config.
- [`io`]: the `Enhancer` trait, the Gemini client and file writers.
- [`types`]: the `Resolution` tier enum.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// GUI module (only available with gui feature)
#[cfg(feature = "gui")]
pub mod gui;

// Curated public API surface
pub use api::{
    OutputTarget, enhance_file_to_path, enhance_image, gemini_enhancer, load_image,
    save_enhanced, save_enhanced_in,
};
pub use crate::core::comparator::{ComparatorSlider, Span};
pub use crate::core::datauri::DataUri;
pub use crate::core::intake::{UPLOAD_ERROR_MESSAGE, UploadedImage};
pub use crate::core::naming::download_file_name;
pub use crate::core::params::EnhanceConfig;
pub use crate::core::state::{EnhancementRequest, EnhancementResult, Ticket, UiState, Workflow};
pub use error::{Error, Result};
pub use io::{Enhancer, GeminiClient};
pub use types::Resolution;
