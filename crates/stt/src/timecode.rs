//! Conversion between `HH:MM:SS,mmm` timecodes and seconds
//!
//! The comma is the decimal separator, as in SRT subtitles. Hours are
//! zero-padded to two digits but never capped, so very long audio yields
//! three or more hour digits.

use thiserror::Error;

/// A timecode that could not be converted to seconds
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimecodeError {
    #[error("invalid timecode: {0}")]
    FieldCount(String),
    #[error("invalid hours: {0}")]
    Hours(String),
    #[error("invalid minutes: {0}")]
    Minutes(String),
    #[error("invalid seconds: {0}")]
    Seconds(String),
}

/// Parse `HH:MM:SS,fff` into seconds
pub fn parse(timecode: &str) -> Result<f64, TimecodeError> {
    let mut fields = timecode.splitn(3, ':');
    let (Some(hours), Some(minutes), Some(seconds)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(TimecodeError::FieldCount(timecode.to_owned()));
    };

    let hours: i32 = hours.parse().map_err(|_| TimecodeError::Hours(hours.to_owned()))?;
    let minutes: i32 = minutes.parse().map_err(|_| TimecodeError::Minutes(minutes.to_owned()))?;

    let seconds = seconds.replace(',', ".");
    let seconds = seconds
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(TimecodeError::Seconds(seconds))?;

    Ok(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds)
}

/// Render a subtitle time range, `HH:MM:SS,mmm --> HH:MM:SS,mmm`
pub fn format_range(start: f64, end: f64) -> String {
    format!("{} --> {}", format_point(start), format_point(end))
}

/// Sub-second precision is truncated, not rounded
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_point(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u64;
    let minutes = (seconds / 60.0) as u64 % 60;
    let secs = seconds as u64 % 60;
    let millis = (seconds * 1000.0) as u64 % 1000;

    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}
