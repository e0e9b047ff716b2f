use std::str::FromStr;

use crate::error::SttError;
use crate::timecode;
use crate::types::{Segment, TranscriptionResponse};

/// Output representations of the transcription endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    VerboseJson,
    Text,
    Srt,
}

impl FromStr for ResponseFormat {
    type Err = ();

    /// Names are case-sensitive
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "json" => Ok(Self::Json),
            "verbose_json" => Ok(Self::VerboseJson),
            "text" => Ok(Self::Text),
            "srt" => Ok(Self::Srt),
            _ => Err(()),
        }
    }
}

/// Shape a parsed transcription into the requested format
///
/// An unknown format yields [`SttError::UnsupportedFormat`] carrying the
/// response as it stood before rendering.
pub fn render(mut response: TranscriptionResponse, format: &str) -> crate::Result<TranscriptionResponse> {
    let Ok(parsed) = format.parse::<ResponseFormat>() else {
        return Err(SttError::UnsupportedFormat {
            format: format.to_owned(),
            partial: Box::new(response),
        });
    };

    let segments = response.segments.take().unwrap_or_default();

    match parsed {
        ResponseFormat::Json | ResponseFormat::VerboseJson => {
            response.text = joined_text(&segments);
            response.segments = Some(
                segments
                    .into_iter()
                    .enumerate()
                    .map(|(id, segment)| Segment { id, ..segment })
                    .collect(),
            );
        }
        ResponseFormat::Text => {
            response.text = joined_text(&segments);
        }
        ResponseFormat::Srt => {
            response.text = srt_document(&segments);
        }
    }

    Ok(response)
}

fn joined_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Numbered cue blocks joined by a single newline
///
/// No blank line separates the blocks; existing consumers rely on this
/// exact layout.
fn srt_document(segments: &[Segment]) -> String {
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            format!(
                "{}\n{}\n{}",
                index + 1,
                timecode::format_range(segment.start, segment.end),
                segment.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
