//! Blank-canvas and chroma-key operations on top of ffmpeg/ffprobe.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{Result, Vid2CaptionsError};
use crate::media::{
    format_float, parse_duration, parse_frame_rate, CommandRunner, MediaCommand,
    MediaCommandBuilder, ProbedMetadata, ProcessRunner,
};
use crate::paths::prep_paths;
use crate::tools::Toolchain;

pub const BLANK_SUFFIX: &str = "-blank.mp4";
pub const ALPHA_SUFFIX: &str = "-alpha.mov";

/// Fixed edge blend of the colorkey filter
const KEY_BLEND: f64 = 0.1;

/// Hex RGB or RGBA color, without `#`/`0x` prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexColor {
    type Err = Vid2CaptionsError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if !matches!(digits.len(), 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Vid2CaptionsError::InvalidArguments(format!(
                "color must be 6 or 8 hex digits, got '{}'",
                s
            )));
        }

        Ok(Self(digits.to_string()))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct BlankRequest {
    pub input_path: PathBuf,
    pub color: String,
    pub width: u32,
    pub height: u32,
    pub output_path: Option<PathBuf>,
}

impl BlankRequest {
    pub fn new<P: Into<PathBuf>>(input_path: P) -> Self {
        Self {
            input_path: input_path.into(),
            color: "000000".to_string(),
            width: 2160,
            height: 720,
            output_path: None,
        }
    }

    pub fn color<S: Into<String>>(mut self, color: S) -> Self {
        self.color = color.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn output<P: Into<PathBuf>>(mut self, output_path: P) -> Self {
        self.output_path = Some(output_path.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct MaskRequest {
    pub input_path: PathBuf,
    pub color: String,
    pub tolerance: f64,
    pub fps: Option<u32>,
    pub output_path: Option<PathBuf>,
}

impl MaskRequest {
    pub fn new<P: Into<PathBuf>>(input_path: P) -> Self {
        Self {
            input_path: input_path.into(),
            color: "000000".to_string(),
            tolerance: 0.01,
            fps: None,
            output_path: None,
        }
    }

    pub fn color<S: Into<String>>(mut self, color: S) -> Self {
        self.color = color.into();
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = Some(fps);
        self
    }

    pub fn output<P: Into<PathBuf>>(mut self, output_path: P) -> Self {
        self.output_path = Some(output_path.into());
        self
    }
}

/// lavfi source for a solid canvas matching the probed clip
pub fn canvas_source(color: &HexColor, width: u32, height: u32, metadata: &ProbedMetadata) -> String {
    format!(
        "color=c={}:s={}x{}:r={}:d={}",
        color,
        width,
        height,
        format_float(metadata.fps()),
        format_float(metadata.duration)
    )
}

/// colorkey filter keying out `color` within `tolerance`
pub fn color_key_filter(color: &HexColor, tolerance: f64) -> String {
    format!(
        "colorkey=0x{}:{}:{}",
        color,
        format_float(tolerance),
        format_float(KEY_BLEND)
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub path: PathBuf,
    pub version: Option<String>,
    pub error: Option<String>,
}

/// Runs blank and mask operations, one external invocation at a time
pub struct VideoEditor {
    ffmpeg: MediaCommandBuilder,
    ffprobe: MediaCommandBuilder,
    runner: Box<dyn CommandRunner>,
}

impl VideoEditor {
    pub fn new(toolchain: &Toolchain) -> Self {
        Self::with_runner(toolchain, Box::new(ProcessRunner::new()))
    }

    pub fn with_runner(toolchain: &Toolchain, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            ffmpeg: toolchain.ffmpeg_commands(),
            ffprobe: toolchain.ffprobe_commands(),
            runner,
        }
    }

    /// Replace the picture with a solid canvas, keeping the original audio.
    /// Returns the output path.
    pub async fn blank(&self, request: &BlankRequest) -> Result<PathBuf> {
        let color: HexColor = request.color.parse()?;
        if request.width == 0 || request.height == 0 {
            return Err(Vid2CaptionsError::InvalidArguments(format!(
                "canvas size must be nonzero, got {}x{}",
                request.width, request.height
            )));
        }

        let (input_path, output_path) =
            prep_paths(&request.input_path, request.output_path.as_deref(), Some(BLANK_SUFFIX))?;
        info!("Creating blank video with original audio from: {}", input_path.display());

        let metadata = self.probe(&input_path).await?;
        debug!("Probed duration {}s at {} fps", metadata.duration, metadata.fps());

        let source = canvas_source(&color, request.width, request.height, &metadata);
        let command = self.ffmpeg.blank_video(&source, input_path.as_path(), output_path.as_path());
        self.run(&command).await?;

        info!("Video saved: {}", output_path.display());
        Ok(output_path)
    }

    /// Key out `color` into an alpha channel, dropping audio.
    /// Returns the output path.
    pub async fn mask(&self, request: &MaskRequest) -> Result<PathBuf> {
        let color: HexColor = request.color.parse()?;
        if !(request.tolerance > 0.0 && request.tolerance <= 1.0) {
            return Err(Vid2CaptionsError::InvalidArguments(format!(
                "tolerance must be within (0, 1], got {}",
                request.tolerance
            )));
        }
        if request.fps == Some(0) {
            return Err(Vid2CaptionsError::InvalidArguments("fps must be nonzero".to_string()));
        }

        let (input_path, output_path) =
            prep_paths(&request.input_path, request.output_path.as_deref(), Some(ALPHA_SUFFIX))?;
        if request.output_path.is_some() && !has_extension(&output_path, "mov") {
            warn!(
                "Output {} is not a .mov file; the container may not keep the alpha channel",
                output_path.display()
            );
        }
        info!("Applying color key 0x{} to: {}", color, input_path.display());

        let filter = color_key_filter(&color, request.tolerance);
        let command = self
            .ffmpeg
            .color_key(input_path.as_path(), &filter, request.fps, output_path.as_path());
        self.run(&command).await?;

        info!("Video saved: {}", output_path.display());
        Ok(output_path)
    }

    /// Duration and frame rate of `input_path`; both probes must succeed
    pub async fn probe(&self, input_path: &Path) -> Result<ProbedMetadata> {
        let duration = self.run(&self.ffprobe.probe_duration(input_path)).await?;
        let duration = parse_duration(&duration)?;

        let frame_rate = self.run(&self.ffprobe.probe_frame_rate(input_path)).await?;
        let frame_rate = parse_frame_rate(&frame_rate)?;

        Ok(ProbedMetadata { duration, frame_rate })
    }

    /// Resolved path and version line of both binaries
    pub async fn tool_report(&self) -> Vec<ToolInfo> {
        let mut report = Vec::new();
        for (name, builder) in [("ffmpeg", &self.ffmpeg), ("ffprobe", &self.ffprobe)] {
            let (version, error) = match self.run(&builder.version_check()).await {
                Ok(stdout) => (
                    Some(stdout.lines().next().unwrap_or("Unknown version").to_string()),
                    None,
                ),
                Err(e) => (None, Some(e.to_string())),
            };
            report.push(ToolInfo {
                name: name.to_string(),
                path: builder.binary_path().to_path_buf(),
                version,
                error,
            });
        }
        report
    }

    async fn run(&self, command: &MediaCommand) -> Result<String> {
        debug!("{}: {}", command.description, command);
        let output = self.runner.execute(command).await?.into_success(command)?;
        Ok(output.stdout)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}
