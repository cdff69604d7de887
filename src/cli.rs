use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging (also raises ffmpeg/ffprobe verbosity)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the ffmpeg binary
    #[arg(long, global = true)]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the ffprobe binary
    #[arg(long, global = true)]
    pub ffprobe: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace the picture with a solid color canvas, keeping the original audio
    Blank {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Canvas color as hex RGB [default: 000000]
        #[arg(long)]
        color: Option<String>,

        /// Canvas width in pixels [default: 2160]
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels [default: 720]
        #[arg(long)]
        height: Option<u32>,

        /// Output video file [default: <input>-blank.mp4]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Key out a color into an alpha channel (ProRes 4444 .mov)
    Mask {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Key color as hex RGB [default: 000000]
        #[arg(long)]
        color: Option<String>,

        /// Color similarity, 0 < tolerance <= 1 [default: 0.01]
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Convert the output to this frame rate
        #[arg(long)]
        fps: Option<u32>,

        /// Output video file [default: <input>-alpha.mov]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show which ffmpeg/ffprobe binaries are used and their versions
    Tools {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration to a file
    Init {
        /// Destination file
        #[arg(short, long, default_value = "vid2captions.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_mask() {
        let args = Args::parse_from([
            "vid2captions", "-v", "mask", "-i", "clip.mp4", "--color", "00FF00", "-t", "0.05", "--fps", "24",
        ]);
        assert!(args.verbose);
        match args.command {
            Commands::Mask { input, color, tolerance, fps, output } => {
                assert_eq!(input, PathBuf::from("clip.mp4"));
                assert_eq!(color.as_deref(), Some("00FF00"));
                assert_eq!(tolerance, Some(0.05));
                assert_eq!(fps, Some(24));
                assert!(output.is_none());
            }
            _ => panic!("expected mask"),
        }
    }

    #[test]
    fn test_parse_blank_with_global_flags_after_subcommand() {
        let args = Args::parse_from([
            "vid2captions", "blank", "-i", "clip.mp4", "--width", "1080", "--ffprobe", "/opt/ffprobe",
        ]);
        assert_eq!(args.ffprobe, Some(PathBuf::from("/opt/ffprobe")));
        match args.command {
            Commands::Blank { width, height, .. } => {
                assert_eq!(width, Some(1080));
                assert!(height.is_none());
            }
            _ => panic!("expected blank"),
        }
    }
}
