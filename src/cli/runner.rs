use std::path::Path;

use tracing::{debug, info};

use pixelenhance::{EnhanceConfig, OutputTarget, Resolution, api};

use super::args::CliArgs;
use super::errors::AppError;

fn build_config(args: &CliArgs) -> Result<EnhanceConfig, AppError> {
    let mut config = EnhanceConfig::from_env();
    if let Some(path) = &args.config {
        debug!("Loading preset {:?}", path);
        config = config.merge_file(path)?;
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if args.timeout.is_some() {
        config.timeout_secs = args.timeout;
    }
    Ok(config)
}

fn output_target(args: &CliArgs, input: &Path) -> OutputTarget {
    match (&args.output, &args.output_dir) {
        (Some(file), _) => OutputTarget::File(file.clone()),
        (None, Some(dir)) => OutputTarget::Directory(dir.clone()),
        (None, None) => OutputTarget::Directory(
            input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        ),
    }
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    if args.list_resolutions {
        for tier in Resolution::ALL {
            println!("{tier}");
        }
        return Ok(());
    }

    let input = args.input.clone().ok_or(AppError::MissingArgument {
        arg: "--input".to_string(),
    })?;
    if !input.is_file() {
        return Err(AppError::NotAFile {
            path: input.display().to_string(),
        }
        .into());
    }

    let config = build_config(&args)?;
    let enhancer = api::gemini_enhancer(config).map_err(AppError::from)?;
    let target = output_target(&args, &input);

    info!("Enhancing {:?} at {}", input, args.resolution);
    let written = api::enhance_file_to_path(&enhancer, &input, args.resolution, &target)
        .map_err(AppError::from)?;

    println!("{}", written.display());
    info!("Successfully enhanced: {:?} -> {:?}", input, written);
    Ok(())
}
