use std::fmt;
use std::path::{Path, PathBuf};

/// Abstract media processing command representation
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCommand {
    pub binary_path: PathBuf,
    pub args: Vec<String>,
    pub description: String,
}

impl MediaCommand {
    /// Create a new media processing command
    pub fn new<P: Into<PathBuf>, S: Into<String>>(binary_path: P, description: S) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|s| s.into()));
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Force input format for the next input
    pub fn format<S: Into<String>>(self, format: S) -> Self {
        self.arg("-f").arg(format)
    }

    /// Select a stream for the output
    pub fn map<S: Into<String>>(self, spec: S) -> Self {
        self.arg("-map").arg(spec)
    }

    /// Set video codec
    pub fn video_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:v").arg(codec)
    }

    /// Set audio codec
    pub fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:a").arg(codec)
    }

    /// Set video codec profile
    pub fn profile<S: Into<String>>(self, profile: S) -> Self {
        self.arg("-profile:v").arg(profile)
    }

    /// Set output pixel format
    pub fn pixel_format<S: Into<String>>(self, pix_fmt: S) -> Self {
        self.arg("-pix_fmt").arg(pix_fmt)
    }

    /// Convert output to a fixed frame rate
    pub fn frame_rate(self, fps: u32) -> Self {
        self.arg("-r").arg(fps.to_string())
    }

    /// Disable audio
    pub fn no_audio(self) -> Self {
        self.arg("-an")
    }

    /// Add video filter
    pub fn video_filter<S: Into<String>>(self, filter: S) -> Self {
        self.arg("-vf").arg(filter)
    }

    /// Stop at the end of the shortest stream
    pub fn shortest(self) -> Self {
        self.arg("-shortest")
    }

    /// Print selected entries with the csv writer, no section prefix
    pub fn show_entries<S: Into<String>>(self, entries: S) -> Self {
        self.arg("-show_entries")
            .arg(entries)
            .arg("-of")
            .arg("csv=p=0")
    }

    /// Argument following `flag`, if present
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Whether `flag` appears anywhere in the argument list
    pub fn has_arg(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }
}

impl fmt::Display for MediaCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary_path.display())?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Render a float the way ffmpeg option strings expect it: shortest
/// round-trip form, always with a decimal point (`30.0`, `29.97002997002997`)
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Builder for the commands issued against one binary
pub struct MediaCommandBuilder {
    binary_path: PathBuf,
    global_options: Vec<String>,
}

impl MediaCommandBuilder {
    /// Create a new command builder
    pub fn new<P: Into<PathBuf>>(binary_path: P) -> Self {
        Self {
            binary_path: binary_path.into(),
            global_options: Vec::new(),
        }
    }

    /// Options prepended to every command built here
    pub fn with_global_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.global_options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Build custom command carrying the global options
    pub fn custom<S: Into<String>>(&self, description: S) -> MediaCommand {
        MediaCommand::new(&self.binary_path, description).args(self.global_options.iter().cloned())
    }

    /// Build container duration probe
    pub fn probe_duration<P: AsRef<Path>>(&self, input_path: P) -> MediaCommand {
        self.custom("Duration probe")
            .input(input_path)
            .show_entries("format=duration")
    }

    /// Build video stream frame rate probe
    pub fn probe_frame_rate<P: AsRef<Path>>(&self, input_path: P) -> MediaCommand {
        self.custom("Frame rate probe")
            .input(input_path)
            .arg("-show_entries")
            .arg("stream=r_frame_rate")
            .arg("-select_streams")
            .arg("v")
            .arg("-of")
            .arg("csv=p=0")
    }

    /// Build blank canvas command: generated color video muxed with the original audio
    pub fn blank_video<P: AsRef<Path>>(
        &self,
        canvas_source: &str,
        input_path: P,
        output_path: P,
    ) -> MediaCommand {
        self.custom("Blank video")
            .format("lavfi")
            .arg("-i")
            .arg(canvas_source)
            .input(input_path)
            .map("0:v:0")
            .map("1:a:0")
            .video_codec("libx264")
            .audio_codec("aac")
            .shortest()
            .output(output_path)
    }

    /// Build color key command producing ProRes 4444 with alpha
    pub fn color_key<P: AsRef<Path>>(
        &self,
        input_path: P,
        key_filter: &str,
        fps: Option<u32>,
        output_path: P,
    ) -> MediaCommand {
        let mut cmd = self
            .custom("Color key mask")
            .input(input_path)
            .no_audio()
            .video_filter(key_filter)
            .video_codec("prores_ks")
            .profile("4444")
            .pixel_format("yuva444p10le");

        if let Some(fps) = fps {
            cmd = cmd.frame_rate(fps);
        }

        cmd.output(output_path)
    }

    /// Build version check command, without global options
    pub fn version_check(&self) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Version check").arg("-version")
    }
}
