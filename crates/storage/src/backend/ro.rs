//! Read-only storage backend.
//!
//! Wraps another backend and turns every write into a logged no-op that
//! still reports success.

use crate::{BackendHandle, StorageBackend, backend::FileInfoStream, error::Result};
use async_trait::async_trait;
use std::path::Path;

/// Read-only view over another backend.
///
/// Writes are dropped with an [`info event`](tracing::Event);
/// reads pass straight through.
#[derive(Clone)]
pub struct ReadOnlyBackend {
    inner: BackendHandle,
}
impl ReadOnlyBackend {
    pub fn new(inner: BackendHandle) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StorageBackend for ReadOnlyBackend {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn list_stream<'a>(&'a self, prefix: Option<&'a Path>) -> FileInfoStream<'a> {
        self.inner.list_stream(prefix)
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.inner.read(path).await
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        tracing::info!(path = %path.display(), bytes = data.len(), "Skipping write to read-only backend");
        Ok(())
    }
}
