// External media tool plumbing:
// - commands: argument list builders for ffmpeg/ffprobe
// - runner: process execution behind the CommandRunner trait
// - probe: parsing of ffprobe csv output

pub mod commands;
pub mod probe;
pub mod runner;

pub use commands::*;
pub use probe::*;
pub use runner::*;
