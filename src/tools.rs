use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::ToolsConfig;
use crate::error::{Result, Vid2CaptionsError};
use crate::media::MediaCommandBuilder;

pub const FFMPEG: &str = "ffmpeg";
pub const FFPROBE: &str = "ffprobe";

/// Log level handed to the external binaries through `-v`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolLogLevel {
    Info,
    Warning,
}

impl ToolLogLevel {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose { Self::Info } else { Self::Warning }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// Resolved external binaries plus the options every invocation carries
#[derive(Debug, Clone, PartialEq)]
pub struct Toolchain {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub log_level: ToolLogLevel,
}

impl Toolchain {
    /// Locate both binaries. Explicit paths are made absolute and used as-is;
    /// otherwise the binary is looked up in `config.search_dir`, next to the
    /// running executable, then on PATH.
    pub fn resolve(
        ffmpeg_path: Option<&Path>,
        ffprobe_path: Option<&Path>,
        config: &ToolsConfig,
        verbose: bool,
    ) -> Result<Self> {
        let bundle_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let search_dirs: Vec<PathBuf> = config
            .search_dir
            .iter()
            .cloned()
            .chain(bundle_dir)
            .collect();

        let ffmpeg = locate_binary(
            FFMPEG,
            ffmpeg_path.or(config.ffmpeg_path.as_deref()),
            &search_dirs,
        )?;
        let ffprobe = locate_binary(
            FFPROBE,
            ffprobe_path.or(config.ffprobe_path.as_deref()),
            &search_dirs,
        )?;

        Ok(Self::new(ffmpeg, ffprobe, verbose))
    }

    pub fn new<P1: Into<PathBuf>, P2: Into<PathBuf>>(ffmpeg: P1, ffprobe: P2, verbose: bool) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
            log_level: ToolLogLevel::from_verbose(verbose),
        }
    }

    /// ffmpeg invocations never read stdin, never print progress and overwrite outputs
    pub fn ffmpeg_commands(&self) -> MediaCommandBuilder {
        MediaCommandBuilder::new(&self.ffmpeg).with_global_options([
            "-nostdin",
            "-nostats",
            "-v",
            self.log_level.as_str(),
            "-y",
        ])
    }

    pub fn ffprobe_commands(&self) -> MediaCommandBuilder {
        MediaCommandBuilder::new(&self.ffprobe).with_global_options(["-v", self.log_level.as_str()])
    }
}

/// Find a runnable binary named `name`
pub fn locate_binary(name: &str, explicit: Option<&Path>, search_dirs: &[PathBuf]) -> Result<PathBuf> {
    if let Some(path) = explicit {
        let path = std::path::absolute(path)?;
        debug!("Using configured {}: {}", name, path.display());
        return Ok(path);
    }

    let file_name = format!("{}{}", name, std::env::consts::EXE_SUFFIX);
    for dir in search_dirs {
        let candidate = dir.join(&file_name);
        if candidate.is_file() {
            debug!("Found bundled {}: {}", name, candidate.display());
            return Ok(candidate);
        }
    }

    which::which(name)
        .inspect(|path| debug!("Found {} on PATH: {}", name, path.display()))
        .map_err(|e| {
            Vid2CaptionsError::ToolNotFound(format!(
                "{} ({}). Install ffmpeg or pass --{} <path>",
                name, e, name
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    #[test]
    fn test_log_level_from_verbose() {
        assert_eq!(ToolLogLevel::from_verbose(true).as_str(), "info");
        assert_eq!(ToolLogLevel::from_verbose(false).as_str(), "warning");
    }

    #[test]
    fn test_global_options() {
        let toolchain = Toolchain::new("/opt/ffmpeg", "/opt/ffprobe", false);

        let cmd = toolchain.ffmpeg_commands().custom("Test");
        assert_eq!(cmd.args, vec!["-nostdin", "-nostats", "-v", "warning", "-y"]);
        assert_eq!(cmd.binary_path, PathBuf::from("/opt/ffmpeg"));

        let verbose = Toolchain::new("/opt/ffmpeg", "/opt/ffprobe", true);
        let cmd = verbose.ffprobe_commands().custom("Test");
        assert_eq!(cmd.args, vec!["-v", "info"]);
        assert_eq!(cmd.binary_path, PathBuf::from("/opt/ffprobe"));
    }

    #[test]
    fn test_explicit_path_is_made_absolute() {
        let path = locate_binary(FFMPEG, Some(Path::new("bin/ffmpeg")), &[]).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("bin/ffmpeg"));
    }

    #[test]
    fn test_search_dir_is_preferred() {
        let dir = TempDir::new().unwrap();
        let bundled = dir.path().join(format!("{}{}", FFPROBE, std::env::consts::EXE_SUFFIX));
        std::fs::write(&bundled, b"").unwrap();

        let path = locate_binary(FFPROBE, None, &[dir.path().to_path_buf()]).unwrap();
        assert_eq!(path, bundled);
    }

    #[test]
    fn test_unknown_binary_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = locate_binary("vid2captions-no-such-tool", None, &[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, Vid2CaptionsError::ToolNotFound(_)));
    }

    #[test]
    fn test_resolve_prefers_arguments_over_config() {
        let config = ToolsConfig {
            ffmpeg_path: Some(PathBuf::from("/config/ffmpeg")),
            ffprobe_path: Some(PathBuf::from("/config/ffprobe")),
            search_dir: None,
        };

        let toolchain = Toolchain::resolve(Some(Path::new("/cli/ffmpeg")), None, &config, true).unwrap();
        assert_eq!(toolchain.ffmpeg, PathBuf::from("/cli/ffmpeg"));
        assert_eq!(toolchain.ffprobe, PathBuf::from("/config/ffprobe"));
        assert_eq!(toolchain.log_level, ToolLogLevel::Info);
    }
}
