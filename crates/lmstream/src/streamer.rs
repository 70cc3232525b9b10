use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::backend::ModelBackend;
use crate::errors::StreamError;
use crate::model::{BackendId, ModelRef};
use crate::session::SessionBuilder;

pub(crate) struct StreamerInner {
    backends: HashMap<BackendId, Arc<dyn ModelBackend>>,
}

impl StreamerInner {
    pub(crate) fn backend(&self, id: &BackendId) -> Option<Arc<dyn ModelBackend>> {
        self.backends.get(id).cloned()
    }
}

/// Entry point for creating streaming sessions.
#[derive(Clone)]
pub struct Streamer {
    pub(crate) inner: Arc<StreamerInner>,
}

impl Streamer {
    /// Starts a builder for registering backends and creating a `Streamer`.
    pub fn builder() -> StreamerBuilder {
        StreamerBuilder::default()
    }

    /// Starts building a streaming session for the given model.
    ///
    /// Each session drives exactly one model call and owns its own pause
    /// gate and cancellation handle.
    pub fn session(&self, model: ModelRef) -> SessionBuilder {
        SessionBuilder::new(self.inner.clone(), model)
    }
}

/// Builder used to register model backends before creating a `Streamer`.
#[derive(Default)]
pub struct StreamerBuilder {
    backends: Vec<Arc<dyn ModelBackend>>,
}

impl StreamerBuilder {
    /// Registers a model backend.
    ///
    /// Register one backend per backend id (for example one `openai`
    /// backend).
    pub fn register_backend(mut self, backend: Arc<dyn ModelBackend>) -> Self {
        self.backends.push(backend);
        self
    }

    /// Builds the streamer and validates backend registration (including
    /// duplicates).
    pub fn build(self) -> Result<Streamer, StreamError> {
        let mut map: HashMap<BackendId, Arc<dyn ModelBackend>> = HashMap::new();
        let mut seen: HashSet<BackendId> = HashSet::new();
        for backend in self.backends {
            let id = backend.id();
            if !seen.insert(id.clone()) {
                return Err(StreamError::Config(format!(
                    "duplicate backend registration: {id}"
                )));
            }
            map.insert(id, backend);
        }
        Ok(Streamer {
            inner: Arc::new(StreamerInner { backends: map }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Availability, SnapshotRequest, SnapshotStreamHandle};
    use crate::errors::BackendError;

    struct DummyBackend;

    #[async_trait::async_trait]
    impl ModelBackend for DummyBackend {
        fn id(&self) -> BackendId {
            BackendId::new("dummy")
        }

        async fn availability(&self, _model: &ModelRef) -> Availability {
            Availability::Available
        }

        async fn stream_snapshots(
            &self,
            _req: SnapshotRequest,
        ) -> Result<SnapshotStreamHandle, BackendError> {
            unreachable!("not used in this test")
        }
    }

    #[test]
    fn build_rejects_duplicate_backend_ids() {
        let result = Streamer::builder()
            .register_backend(Arc::new(DummyBackend))
            .register_backend(Arc::new(DummyBackend))
            .build();
        assert!(
            matches!(result, Err(StreamError::Config(message)) if message.contains("duplicate backend"))
        );
    }
}
