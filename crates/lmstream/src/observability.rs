use once_cell::sync::OnceCell;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

static INIT: OnceCell<()> = OnceCell::new();

fn env_flag(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enabled" => Some(true),
        "0" | "false" | "no" | "off" | "disabled" => Some(false),
        _ => None,
    }
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    std::env::var("LMSTREAM_LOG_LEVEL")
        .ok()
        .and_then(|level| tracing_subscriber::EnvFilter::try_new(level).ok())
        .or_else(|| tracing_subscriber::EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| tracing_subscriber::EnvFilter::new("info"))
}

/// Initialize tracing output once per process.
///
/// Environment variables:
/// - `LMSTREAM_OBSERVABILITY` / `LMSTREAM_OBSERVABILITY_ENABLED`: optional enable/disable flag (default enabled).
/// - `LMSTREAM_LOG_LEVEL`: optional level/filter override (`info`, `debug`, etc.).
/// - `LMSTREAM_JSON_LOG_PATH`: optional log file path. If set, logs are JSONL in that file;
///   if unset, logs go to stdout in a human-readable console format.
/// - `RUST_LOG`: optional filter override.
pub fn init_observability() {
    INIT.get_or_init(|| {
        let enabled = env_flag("LMSTREAM_OBSERVABILITY_ENABLED")
            .or_else(|| env_flag("LMSTREAM_OBSERVABILITY"))
            .unwrap_or(true);
        if !enabled {
            return;
        }

        let registry = tracing_subscriber::registry().with(env_filter());
        match std::env::var("LMSTREAM_JSON_LOG_PATH") {
            Ok(path_raw) => {
                let path = std::path::PathBuf::from(path_raw);
                let dir = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => {
                        let _ = std::fs::create_dir_all(parent);
                        parent.to_path_buf()
                    }
                    _ => std::path::PathBuf::from("."),
                };
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("lmstream.logs.jsonl");
                let writer = tracing_appender::rolling::never(dir, file_name.to_string());
                let _ = registry
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_current_span(true)
                            .with_span_list(true)
                            .with_target(false)
                            .with_writer(writer),
                    )
                    .try_init();
            }
            Err(_) => {
                let _ = registry
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_target(false)
                            .with_writer(std::io::stdout),
                    )
                    .try_init();
            }
        }
    });
}
