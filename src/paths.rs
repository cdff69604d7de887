use std::path::{Path, PathBuf};

use crate::error::{Result, Vid2CaptionsError};

/// Resolve the absolute input path and the output path for an operation.
///
/// An explicit `output_path` wins and is made absolute as given. Otherwise the
/// output lands next to the input as `<stem><suffix>`. Absolutization is
/// lexical, so neither path needs to exist yet.
pub fn prep_paths<P: AsRef<Path>>(
    input_path: P,
    output_path: Option<&Path>,
    suffix: Option<&str>,
) -> Result<(PathBuf, PathBuf)> {
    let input = std::path::absolute(input_path.as_ref())?;

    let output = match (output_path, suffix) {
        (Some(output), _) => std::path::absolute(output)?,
        (None, Some(suffix)) => {
            let stem = input.file_stem().ok_or_else(|| {
                Vid2CaptionsError::InvalidArguments(format!(
                    "Input path has no file name: {}",
                    input.display()
                ))
            })?;
            let parent = input.parent().unwrap_or_else(|| Path::new("/"));

            let mut file_name = stem.to_os_string();
            file_name.push(suffix);
            parent.join(file_name)
        }
        (None, None) => {
            return Err(Vid2CaptionsError::InvalidArguments(
                "Either an output path or an output suffix is required".to_string(),
            ));
        }
    };

    Ok((input, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    #[test]
    fn test_suffix_derives_sibling() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input_video.mp4");

        let (resolved_input, output) = prep_paths(&input, None, Some("_masked")).unwrap();
        assert_eq!(resolved_input, input);
        assert_eq!(output, dir.path().join("input_video_masked"));
    }

    #[test]
    fn test_relative_input_becomes_absolute() {
        let cwd = std::env::current_dir().unwrap();

        let (input, output) = prep_paths("clip.mp4", None, Some("-blank.mp4")).unwrap();
        assert!(input.is_absolute());
        assert_eq!(input, cwd.join("clip.mp4"));
        assert_eq!(output, cwd.join("clip-blank.mp4"));
    }

    #[test]
    fn test_explicit_output_ignores_suffix() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("clip.mp4");
        let explicit = dir.path().join("out").join("keyed.mov");

        let (_, output) = prep_paths(&input, Some(&explicit), Some("-alpha.mov")).unwrap();
        assert_eq!(output, explicit);

        let (_, output) = prep_paths(&input, Some(&explicit), None).unwrap();
        assert_eq!(output, explicit);
    }

    #[test]
    fn test_relative_output_becomes_absolute() {
        let cwd = std::env::current_dir().unwrap();
        let (_, output) = prep_paths("a/clip.mp4", Some(Path::new("b/out.mov")), None).unwrap();
        assert_eq!(output, cwd.join("b/out.mov"));
    }

    #[test]
    fn test_multi_dot_stem() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("take.01.final.mp4");

        let (_, output) = prep_paths(&input, None, Some("-alpha.mov")).unwrap();
        assert_eq!(output, dir.path().join("take.01.final-alpha.mov"));
    }

    #[test]
    fn test_missing_output_and_suffix() {
        let err = prep_paths("clip.mp4", None, None).unwrap_err();
        assert!(matches!(err, Vid2CaptionsError::InvalidArguments(_)));
    }

    #[test]
    fn test_input_without_file_name() {
        let err = prep_paths("/", None, Some("-blank.mp4")).unwrap_err();
        assert!(matches!(err, Vid2CaptionsError::InvalidArguments(_)));
    }
}
