use std::sync::Arc;
use std::time::Duration;

use lmstream::prelude::*;
use lmstream::vendors::openai::OpenAiBackend;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), StreamError> {
    lmstream::init_observability();

    let streamer = Streamer::builder()
        .register_backend(Arc::new(OpenAiBackend::from_env()?))
        .build()?;

    let mut deltas = streamer
        .session(ModelRef::new("openai", "gpt-5-nano"))
        .input(Input::plain("Count slowly from one to twenty in words."))
        .text_deltas()
        .await?;

    // Pause the stream after a moment, hold it briefly, then resume. The
    // output picks up exactly where it left off.
    let gate = deltas.pause_gate();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        gate.pause();
        eprintln!("\n[paused for two seconds]");
        tokio::time::sleep(Duration::from_secs(2)).await;
        gate.resume();
        eprintln!("[resumed]");
    });

    while let Some(delta) = deltas.next_delta().await {
        print!("{delta}");
    }
    println!();
    Ok(())
}
