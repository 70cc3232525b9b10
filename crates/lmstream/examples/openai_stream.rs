use std::sync::Arc;

use lmstream::prelude::*;
use lmstream::vendors::openai::{OpenAiBackend, OpenAiRequestOptions, OpenAiSessionBuilderExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), StreamError> {
    lmstream::init_observability();

    let streamer = Streamer::builder()
        .register_backend(Arc::new(OpenAiBackend::from_env()?))
        .build()?;

    let mut chunks = streamer
        .session(ModelRef::new("openai", "gpt-5-nano"))
        .input(Input::chat(vec![
            ChatMessage::new(Role::System, "Reply to test incremental streaming."),
            ChatMessage::new(Role::User, "Stream a greeting."),
        ]))
        .openai_options(OpenAiRequestOptions::default().store(false))
        .chunks()
        .await?;

    while let Some(chunk) = chunks.next_chunk().await? {
        if let StreamChunk::Text { text } = chunk {
            print!("{text}");
        }
    }
    println!();
    Ok(())
}
