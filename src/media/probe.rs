use crate::error::{Result, Vid2CaptionsError};

/// Rational frame rate as reported by the probe tool (`r_frame_rate`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRate {
    pub numerator: f64,
    pub denominator: f64,
}

impl FrameRate {
    pub fn as_f64(&self) -> f64 {
        self.numerator / self.denominator
    }
}

/// Properties the blank canvas has to match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbedMetadata {
    pub duration: f64,
    pub frame_rate: FrameRate,
}

impl ProbedMetadata {
    pub fn fps(&self) -> f64 {
        self.frame_rate.as_f64()
    }
}

fn first_line(stdout: &str) -> Option<&str> {
    stdout.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Parse `format=duration` csv output, e.g. `5.000000`
pub fn parse_duration(stdout: &str) -> Result<f64> {
    let line = first_line(stdout)
        .ok_or_else(|| Vid2CaptionsError::ProbeParse("empty duration output".to_string()))?;

    let duration: f64 = line
        .parse()
        .map_err(|_| Vid2CaptionsError::ProbeParse(format!("invalid duration '{}'", line)))?;

    if !duration.is_finite() || duration < 0.0 {
        return Err(Vid2CaptionsError::ProbeParse(format!("invalid duration '{}'", line)));
    }

    Ok(duration)
}

/// Parse `stream=r_frame_rate` csv output, e.g. `30000/1001`. Only the first
/// video stream is considered.
pub fn parse_frame_rate(stdout: &str) -> Result<FrameRate> {
    let line = first_line(stdout)
        .ok_or_else(|| Vid2CaptionsError::ProbeParse("no video stream frame rate".to_string()))?;
    // csv may carry a trailing separator when several entries are requested
    let line = line.trim_end_matches(',');

    let invalid = || Vid2CaptionsError::ProbeParse(format!("invalid frame rate '{}'", line));

    let (numerator, denominator) = line.split_once('/').ok_or_else(invalid)?;
    let numerator: f64 = numerator.trim().parse().map_err(|_| invalid())?;
    let denominator: f64 = denominator.trim().parse().map_err(|_| invalid())?;

    if denominator == 0.0 || !numerator.is_finite() || !denominator.is_finite() {
        return Err(invalid());
    }

    Ok(FrameRate { numerator, denominator })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("5.0\n").unwrap(), 5.0);
        assert_eq!(parse_duration("  12.345000 \r\n").unwrap(), 12.345);
        assert_eq!(parse_duration("\n7\n").unwrap(), 7.0);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(matches!(parse_duration(""), Err(Vid2CaptionsError::ProbeParse(_))));
        assert!(matches!(parse_duration("N/A\n"), Err(Vid2CaptionsError::ProbeParse(_))));
        assert!(matches!(parse_duration("-1.0"), Err(Vid2CaptionsError::ProbeParse(_))));
    }

    #[test]
    fn test_parse_frame_rate() {
        let rate = parse_frame_rate("30/1\n").unwrap();
        assert_eq!(rate.as_f64(), 30.0);

        let rate = parse_frame_rate("30000/1001\n").unwrap();
        assert_eq!(rate.as_f64(), 30000.0 / 1001.0);
        assert!((rate.as_f64() - 29.97).abs() < 0.001);

        let rate = parse_frame_rate("24000/1001,\n").unwrap();
        assert_eq!(rate.as_f64(), 24000.0 / 1001.0);
    }

    #[test]
    fn test_parse_frame_rate_uses_first_stream() {
        let rate = parse_frame_rate("25/1\n60/1\n").unwrap();
        assert_eq!(rate.as_f64(), 25.0);
    }

    #[test]
    fn test_parse_frame_rate_rejects_garbage() {
        assert!(parse_frame_rate("").is_err());
        assert!(parse_frame_rate("30").is_err());
        assert!(parse_frame_rate("30/0").is_err());
        assert!(parse_frame_rate("0/0").is_err());
        assert!(parse_frame_rate("a/b").is_err());
    }
}
