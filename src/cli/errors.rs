use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Input is not a file: {path}")]
    NotAFile { path: String },

    #[error(transparent)]
    Enhance(#[from] pixelenhance::Error),
}
