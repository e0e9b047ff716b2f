use std::sync::Arc;

use indoc::indoc;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::error::{Result, SttError};
use crate::provider::{GenerateRequest, TranscriptionBackend};
use crate::render::render;
use crate::timecode;
use crate::types::{Segment, TranscriptionRequest, TranscriptionResponse};

/// Instructions sent with every audio clip
const INSTRUCTIONS: &str = indoc! {r#"
    Transcribe the following audio clip. 

    Requirements:
    - Do not return word-level, only segment-level.
    - Make sure segment boundaries are logical and natural.
    - For each segment, provide the start and end timestamps the format of timecode. Return the result as a JSON array, where each object contains:
    	- "text": the transcribed segment,
    	- "start": the start time (in timecode),
    	- "end": the end time (in timecode).

    Example output:
    {
    	"language": "english", // french, spanish, chinese, etc.
    	"length": "00:10:48,47",
    	"segments": [
    		...
    		{
    			"start": "00:00:10,96",
    			"end": "00:00:16,63",
    			"text": "What are some class jobs and why are they important?"
    		},
    		{
    			"start": "00:00:19,33",
    			"end": "00:00:23,99",
    			"text": "Students in my class have jobs to do."
    		},
    		...
    	]
    }
    Only return valid JSON.
"#};

/// Placed between a caller prompt and the instructions
const PROMPT_SEPARATOR: &str = "\n\n------------\n";

/// The JSON envelope the backend is asked to answer with
///
/// Timecodes are kept as text here; they are converted in one pass
/// afterwards so a single bad value rejects the whole answer.
///
/// Absent and `null` members both read as empty.
#[derive(Debug, Deserialize)]
struct AnswerEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    length: String,
    #[serde(default, deserialize_with = "null_as_default")]
    segments: Vec<AnswerSegment>,
}

#[derive(Debug, Deserialize)]
struct AnswerSegment {
    #[serde(default, deserialize_with = "null_as_default")]
    start: String,
    #[serde(default, deserialize_with = "null_as_default")]
    end: String,
    #[serde(default, deserialize_with = "null_as_default")]
    text: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Turns audio into an `OpenAI`-shaped transcription through a generative backend
#[derive(Clone)]
pub struct TranscriptionAdapter {
    backend: Arc<dyn TranscriptionBackend>,
}

impl TranscriptionAdapter {
    pub fn new(backend: Arc<dyn TranscriptionBackend>) -> Self {
        Self { backend }
    }

    /// Run one transcription; the backend is called exactly once
    pub async fn transcribe(
        &self,
        api_key: &SecretString,
        request: &TranscriptionRequest,
    ) -> Result<TranscriptionResponse> {
        let prompt = build_prompt(request.prompt.as_deref());
        let mime_type = request.mime_type();

        let answer = self
            .backend
            .generate(GenerateRequest {
                api_key,
                model: &request.model,
                prompt: &prompt,
                audio: &request.audio,
                mime_type: &mime_type,
            })
            .await?;

        let response = parse_answer(&answer)?;

        tracing::debug!(
            segments = response.segments.as_ref().map_or(0, Vec::len),
            duration = response.duration,
            format = %request.response_format,
            "transcription answer parsed"
        );

        render(response, &request.response_format)
    }
}

fn build_prompt(user_prompt: Option<&str>) -> String {
    match user_prompt {
        Some(prompt) if !prompt.is_empty() => format!("{prompt}{PROMPT_SEPARATOR}{INSTRUCTIONS}"),
        _ => INSTRUCTIONS.to_owned(),
    }
}

/// Remove a leading `json` code fence line and a trailing fence, then trim
fn strip_code_fence(answer: &str) -> &str {
    let answer = answer.strip_prefix("```json\n").unwrap_or(answer);
    let answer = answer.strip_suffix("```").unwrap_or(answer);
    answer.trim()
}

/// Parse a raw backend answer into a response with timings in seconds
fn parse_answer(answer: &str) -> Result<TranscriptionResponse> {
    let stripped = strip_code_fence(answer);
    if stripped.is_empty() {
        return Err(SttError::EmptyAnswer);
    }

    let envelope: AnswerEnvelope =
        serde_json::from_str(stripped).map_err(|e| SttError::MalformedAnswer(e.to_string()))?;

    let duration = timecode::parse(&envelope.length)?;

    let segments = envelope
        .segments
        .into_iter()
        .enumerate()
        .map(|(id, segment)| {
            Ok(Segment::new(
                id,
                timecode::parse(&segment.start)?,
                timecode::parse(&segment.end)?,
                segment.text,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TranscriptionResponse::new(envelope.language, duration, segments))
}
