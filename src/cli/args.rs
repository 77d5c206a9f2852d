use clap::Parser;
use std::path::PathBuf;

use pixelenhance::Resolution;

#[derive(Parser, Debug)]
#[command(name = "pixelenhance", version, about = "PIXELENHANCE CLI")]
pub struct CliArgs {
    /// Input photo (PNG, JPG, WEBP, ...)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Target resolution tier
    #[arg(short, long, value_enum, default_value_t = Resolution::P1080)]
    pub resolution: Resolution,

    /// Output file. Defaults to `{name}-enhanced-{resolution}.{ext}` next to the input
    #[arg(short, long, conflicts_with = "output_dir")]
    pub output: Option<PathBuf>,

    /// Output directory; the file keeps its derived download name
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON preset with endpoint/model/timeout (the API key always comes from the environment)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the model name
    #[arg(long)]
    pub model: Option<String>,

    /// Override the API endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (default: wait for the service)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// List the available resolution tiers and exit
    #[arg(long, default_value_t = false)]
    pub list_resolutions: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
