use crate::errors::BackendError;
use crate::model::BackendId;

/// One decoded server-sent-event frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SseFrame {
    pub event: Option<String>,
    pub data: String,
}

/// Incremental SSE decoder fed from raw response body chunks.
///
/// Frames may be split across arbitrary chunk boundaries; bytes of an
/// incomplete frame stay buffered until the closing blank line arrives.
#[derive(Default)]
pub(crate) struct SseDecoder {
    buf: Vec<u8>,
}

impl SseDecoder {
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buf.extend_from_slice(chunk);
        let mut frames = Vec::new();
        while let Some((end, delim_len)) = next_frame_boundary(&self.buf) {
            let frame_bytes: Vec<u8> = self.buf.drain(..end + delim_len).take(end).collect();
            if let Some(frame) = parse_frame(&frame_bytes) {
                frames.push(frame);
            }
        }
        frames
    }
}

fn next_frame_boundary(buf: &[u8]) -> Option<(usize, usize)> {
    let mut i = 0;
    while i + 1 < buf.len() {
        match (buf[i], buf.get(i + 1), buf.get(i + 2), buf.get(i + 3)) {
            (b'\n', Some(&b'\n'), _, _) => return Some((i, 2)),
            (b'\r', Some(&b'\n'), Some(&b'\r'), Some(&b'\n')) => return Some((i, 4)),
            _ => i += 1,
        }
    }
    None
}

fn parse_frame(bytes: &[u8]) -> Option<SseFrame> {
    let text = String::from_utf8_lossy(bytes);
    let mut frame = SseFrame {
        event: None,
        data: String::new(),
    };
    let mut saw_field = false;
    for raw_line in text.split('\n') {
        let line = raw_line.trim_end_matches('\r');
        // Comment lines start with a colon per the SSE spec.
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("event:") {
            frame.event = Some(rest.trim_start().to_string());
            saw_field = true;
        } else if let Some(rest) = line.strip_prefix("data:") {
            if !frame.data.is_empty() {
                frame.data.push('\n');
            }
            frame.data.push_str(rest.trim_start());
            saw_field = true;
        }
    }
    saw_field.then_some(frame)
}

/// Responses API stream events reduced to what the snapshot stream needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResponseEvent {
    /// Incremental text appended to the output.
    TextDelta(String),
    /// Terminal success; the stream ends after this.
    Completed,
}

pub(crate) fn decode_frame(
    backend: &BackendId,
    frame: &SseFrame,
) -> Result<Vec<ResponseEvent>, BackendError> {
    let data = frame.data.trim();
    if data.is_empty() || data == "[DONE]" {
        return Ok(Vec::new());
    }
    let value: serde_json::Value = serde_json::from_str(data).map_err(|e| {
        BackendError::transport(backend.clone(), format!("invalid SSE JSON frame: {e}"))
    })?;
    decode_json(backend, &value)
}

pub(crate) fn decode_json(
    backend: &BackendId,
    value: &serde_json::Value,
) -> Result<Vec<ResponseEvent>, BackendError> {
    let Some(event_type) = value.get("type").and_then(|v| v.as_str()) else {
        return Ok(Vec::new());
    };
    match event_type {
        "response.output_text.delta" => Ok(value
            .get("delta")
            .and_then(|v| v.as_str())
            .map(|delta| ResponseEvent::TextDelta(delta.to_string()))
            .into_iter()
            .collect()),
        "response.completed" => Ok(vec![ResponseEvent::Completed]),
        "response.error" | "response.failed" => {
            let message = value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|v| v.as_str())
                .or_else(|| value.get("message").and_then(|v| v.as_str()))
                .unwrap_or("OpenAI stream error");
            Err(BackendError::backend(backend.clone(), message, None))
        }
        _ => Ok(Vec::new()),
    }
}
