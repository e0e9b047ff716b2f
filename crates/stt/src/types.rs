use serde::{Deserialize, Serialize};

/// Transcription request decoded from the multipart upload
#[derive(Debug)]
pub struct TranscriptionRequest {
    /// Raw audio data
    pub audio: Vec<u8>,
    /// Original filename
    pub filename: String,
    /// Audio container, e.g. `mp3`; the MIME type is `audio/{audio_kind}`
    pub audio_kind: String,
    /// Backend model identifier (e.g. "gemini-2.5-flash")
    pub model: String,
    /// Optional caller prompt prepended to the instructions
    pub prompt: Option<String>,
    /// Requested output format (json, `verbose_json`, text, srt)
    pub response_format: String,
}

impl TranscriptionRequest {
    pub fn mime_type(&self) -> String {
        format!("audio/{}", self.audio_kind)
    }
}

/// One utterance in `OpenAI` transcription format
///
/// Only `id`, `start`, `end` and `text` carry data; the remaining
/// Whisper fields are kept for wire compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: usize,
    pub seek: u32,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub tokens: Vec<u32>,
    pub temperature: f64,
    pub avg_logprob: f64,
    pub compression_ratio: f64,
    pub no_speech_prob: f64,
    pub transient: bool,
}

impl Segment {
    pub fn new(id: usize, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            id,
            start,
            end,
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Word-level timestamp; never populated since only segments are requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// Transcription response following the `OpenAI` transcription API format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub task: String,
    pub language: String,
    /// Total audio length in seconds
    pub duration: f64,
    /// Absent for `text` and `srt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
    #[serde(default)]
    pub words: Vec<Word>,
    /// Joined segment text, or the SRT document for `srt`
    pub text: String,
}

impl TranscriptionResponse {
    pub fn new(language: impl Into<String>, duration: f64, segments: Vec<Segment>) -> Self {
        Self {
            task: "transcribe".to_owned(),
            language: language.into(),
            duration,
            segments: Some(segments),
            words: Vec::new(),
            text: String::new(),
        }
    }
}
