//! vid2captions - video preparation helpers around ffmpeg
//!
//! Two operations, each a thin layer over external ffmpeg/ffprobe processes:
//! replacing a clip's picture with a blank canvas while keeping its audio, and
//! keying a color out into an alpha channel.

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod media;
pub mod paths;
pub mod tools;

pub use editor::{BlankRequest, MaskRequest, VideoEditor};
pub use error::{Result, Vid2CaptionsError};
pub use paths::prep_paths;
pub use tools::Toolchain;
