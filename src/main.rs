//! vid2captions command-line entry point

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use vid2captions::cli::{Args, Commands, ConfigAction};
use vid2captions::config::Config;
use vid2captions::editor::{BlankRequest, MaskRequest, VideoEditor};
use vid2captions::logging::setup_logging;
use vid2captions::tools::Toolchain;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let cwd = std::env::current_dir()?;
    let config = Config::discover(args.config.as_deref(), &cwd)?;

    setup_logging(args.verbose, config.logging.log_dir.as_deref())?;

    // Config commands work without ffmpeg installed, so binaries are located lazily
    let resolve_toolchain = || {
        Toolchain::resolve(
            args.ffmpeg.as_deref(),
            args.ffprobe.as_deref(),
            &config.tools,
            args.verbose,
        )
    };

    match args.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                print!("{}", config.to_toml()?);
            }
            ConfigAction::Init { path, force } => {
                if path.exists() && !force {
                    bail!("{} already exists (use --force to overwrite)", path.display());
                }
                Config::default().save_to_file(&path)?;
                println!("Wrote {}", path.display());
            }
        },
        Commands::Tools { json } => {
            let toolchain = resolve_toolchain()?;
            let report = VideoEditor::new(&toolchain).tool_report().await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for tool in &report {
                    let status = match (&tool.version, &tool.error) {
                        (Some(version), _) => version.clone(),
                        (None, Some(error)) => format!("unavailable: {}", error),
                        (None, None) => "unavailable".to_string(),
                    };
                    println!("{:<8} {}\n         {}", tool.name, tool.path.display(), status);
                }
            }

            if report.iter().any(|tool| tool.error.is_some()) {
                bail!("one or more tools are not runnable");
            }
        }
        Commands::Blank { input, color, width, height, output } => {
            let toolchain = resolve_toolchain()?;
            let editor = VideoEditor::new(&toolchain);

            let mut request = BlankRequest::new(input)
                .color(color.unwrap_or(config.blank.color))
                .size(width.unwrap_or(config.blank.width), height.unwrap_or(config.blank.height));
            request.output_path = output;

            let output_path = editor.blank(&request).await?;
            println!("{}", output_path.display());
        }
        Commands::Mask { input, color, tolerance, fps, output } => {
            let toolchain = resolve_toolchain()?;
            let editor = VideoEditor::new(&toolchain);

            let mut request = MaskRequest::new(input)
                .color(color.unwrap_or(config.mask.color))
                .tolerance(tolerance.unwrap_or(config.mask.tolerance));
            request.fps = fps;
            request.output_path = output;

            let output_path = editor.mask(&request).await?;
            println!("{}", output_path.display());
        }
    }

    info!("Done");
    Ok(())
}
