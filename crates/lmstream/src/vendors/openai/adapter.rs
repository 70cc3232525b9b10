use std::collections::VecDeque;
use std::pin::Pin;

use futures::StreamExt as _;
use futures::stream;
use tracing::debug;

use crate::backend::{Availability, ModelBackend, SnapshotRequest, SnapshotStreamHandle};
use crate::errors::{BackendError, StreamError};
use crate::model::{BackendId, ModelRef};
use crate::transcript::TranscriptEntry;

use super::config::OpenAiClientConfig;
use super::options::OpenAiRequestOptions;
use super::transport::{ResponseEvent, SseDecoder, decode_frame};

const OPENAI_BACKEND: &str = "openai";

type ByteStream =
    Pin<Box<dyn futures::Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send + 'static>>;

/// Model backend for OpenAI's Responses API (streaming).
///
/// The API emits text deltas; this backend folds them into the cumulative
/// snapshots the streaming core consumes.
pub struct OpenAiBackend {
    client: reqwest::Client,
    config: OpenAiClientConfig,
}

impl OpenAiBackend {
    /// Creates a backend from explicit client configuration.
    pub fn new(config: OpenAiClientConfig) -> Result<Self, StreamError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StreamError::Config(format!("failed to build OpenAI client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Creates a backend using `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self, StreamError> {
        Self::new(OpenAiClientConfig::from_env()?)
    }
}

#[async_trait::async_trait]
impl ModelBackend for OpenAiBackend {
    fn id(&self) -> BackendId {
        BackendId::new(OPENAI_BACKEND)
    }

    async fn availability(&self, _model: &ModelRef) -> Availability {
        // The only precondition checkable without a network round trip is a
        // usable credential.
        if self.config.api_key.trim().is_empty() {
            return Availability::Unavailable {
                reason: "missing OpenAI API key".into(),
            };
        }
        Availability::Available
    }

    async fn stream_snapshots(
        &self,
        req: SnapshotRequest,
    ) -> Result<SnapshotStreamHandle, BackendError> {
        let backend_id = BackendId::new(OPENAI_BACKEND);
        let request_options = read_request_options(&req, &backend_id)?;
        let body = build_request_body(&req, &request_options);
        debug!(session_id = %req.session_id, model = %req.model.model, "starting OpenAI responses stream");

        let mut http_req = self
            .client
            .post(self.config.responses_url())
            .bearer_auth(&self.config.api_key)
            .json(&body);
        if let Some(timeout) = req.options.timeout {
            http_req = http_req.timeout(timeout);
        }

        let response = http_req.send().await.map_err(|e| {
            BackendError::transport(backend_id.clone(), format!("OpenAI request failed: {e}"))
        })?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BackendError::backend(
                backend_id,
                format!("OpenAI responses request failed with status {status}: {body}"),
                Some(status.as_u16()),
            ));
        }

        let bytes_stream: ByteStream = Box::pin(response.bytes_stream());
        Ok(SnapshotStreamHandle {
            stream: Box::pin(snapshot_stream(backend_id, bytes_stream)),
        })
    }
}

fn read_request_options(
    req: &SnapshotRequest,
    backend: &BackendId,
) -> Result<OpenAiRequestOptions, BackendError> {
    let value = req.generation.value();
    if value.is_null() {
        return Ok(OpenAiRequestOptions::default());
    }
    serde_json::from_value(value.clone()).map_err(|e| {
        BackendError::protocol(backend.clone(), format!("invalid OpenAI options: {e}"))
    })
}

pub(crate) fn build_request_body(
    req: &SnapshotRequest,
    options: &OpenAiRequestOptions,
) -> serde_json::Value {
    let mut input = Vec::with_capacity(req.transcript.len() + 1);
    for entry in &req.transcript {
        let (role, text) = match entry {
            TranscriptEntry::Instructions { text } => ("system", text),
            TranscriptEntry::Prompt { text, .. } => ("user", text),
            TranscriptEntry::Response { text } => ("assistant", text),
        };
        input.push(serde_json::json!({ "role": role, "content": text }));
    }
    input.push(serde_json::json!({ "role": "user", "content": req.prompt }));

    let mut body = serde_json::json!({
        "model": req.model.model,
        "input": input,
        "stream": true,
        "store": options.store.unwrap_or(false),
    });

    if !req.tools.is_empty() {
        body["tools"] = serde_json::Value::Array(
            req.tools
                .iter()
                .map(|tool| {
                    serde_json::json!({
                        "type": "function",
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.parameters,
                    })
                })
                .collect(),
        );
    }
    if let Some(effort) = options.reasoning_effort.as_ref() {
        body["reasoning"] = serde_json::json!({ "effort": effort });
    }
    if let Some(limit) = options.max_output_tokens {
        body["max_output_tokens"] = serde_json::json!(limit);
    }

    body
}

fn snapshot_stream(
    backend: BackendId,
    bytes_stream: ByteStream,
) -> impl futures::Stream<Item = Result<String, BackendError>> + Send {
    struct State {
        backend: BackendId,
        bytes_stream: ByteStream,
        decoder: SseDecoder,
        text: String,
        pending: VecDeque<String>,
        done: bool,
    }

    stream::try_unfold(
        State {
            backend,
            bytes_stream,
            decoder: SseDecoder::default(),
            text: String::new(),
            pending: VecDeque::new(),
            done: false,
        },
        |mut state| async move {
            loop {
                if let Some(snapshot) = state.pending.pop_front() {
                    return Ok(Some((snapshot, state)));
                }
                if state.done {
                    return Ok(None);
                }

                match state.bytes_stream.next().await {
                    Some(Ok(chunk)) => {
                        for frame in state.decoder.push_chunk(&chunk) {
                            for event in decode_frame(&state.backend, &frame)? {
                                match event {
                                    ResponseEvent::TextDelta(delta) => {
                                        state.text.push_str(&delta);
                                        // Each emitted item is the full
                                        // output so far.
                                        state.pending.push_back(state.text.clone());
                                    }
                                    ResponseEvent::Completed => state.done = true,
                                }
                            }
                        }
                    }
                    Some(Err(e)) => {
                        return Err(BackendError::transport(
                            state.backend,
                            format!("OpenAI streaming read failed: {e}"),
                        ));
                    }
                    None => {
                        state.done = true;
                    }
                }
            }
        },
    )
}
