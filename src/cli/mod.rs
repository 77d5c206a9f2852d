//! Command Line Interface (CLI) layer for PIXELENHANCE.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for a single upload → enhance →
//! save pass. It wires user-provided options to the library functionality
//! exposed via `pixelenhance::api`.
//!
//! If you are embedding PIXELENHANCE into another application, prefer using
//! the high-level `pixelenhance::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
