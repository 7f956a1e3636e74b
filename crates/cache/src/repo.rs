use crate::Record;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use metagame_storage::backend::{LocalBackend, ReadOnlyBackend};
use metagame_storage::{BackendHandle, StorageBackend};
use std::path::{Path, PathBuf};
use std::sync::Arc;

async fn read_record<R: Record>(backend: &dyn StorageBackend, id: &R::Id) -> Result<Option<R>> {
    let path = R::path(id);
    let bytes = match backend.read(&path).await {
        Ok(bytes) => bytes,
        Err(err) if err.is_not_found() => {
            tracing::trace!(kind = R::KIND, %id, "Cache miss");
            return Ok(None);
        },
        Err(err) => return Err(err.raise(ErrorKind::Storage)),
    };
    match serde_json::from_slice(&bytes) {
        Ok(record) => Ok(Some(record)),
        Err(error) => {
            // Treated as a miss: the caller re-fetches and overwrites it.
            tracing::warn!(kind = R::KIND, %id, path = %path.display(), %error, "Corrupt cache record, ignoring");
            Ok(None)
        },
    }
}

/// Read-write access to the record cache.
///
/// Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct Cache {
    backend: BackendHandle,
}
impl Cache {
    pub fn new(backend: BackendHandle) -> Self {
        Self { backend }
    }

    /// Open (creating if necessary) a cache rooted at a local directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let backend = LocalBackend::new("cache", root.as_ref()).or_raise(|| ErrorKind::Unavailable)?;
        Ok(Self::new(Arc::new(backend)))
    }

    /// Look up a record by ID. `None` on a miss, including when the stored
    /// record cannot be decoded.
    #[tracing::instrument(level = "debug", skip_all, fields(kind = R::KIND, %id))]
    pub async fn get<R: Record>(&self, id: &R::Id) -> Result<Option<R>> {
        read_record(self.backend.as_ref(), id).await
    }

    /// Write a record, replacing any previous version of it.
    #[tracing::instrument(level = "debug", skip_all, fields(kind = R::KIND, id = %record.id()))]
    pub async fn put<R: Record>(&self, record: &R) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(record).or_raise(|| ErrorKind::Serialize(R::KIND))?;
        self.backend.write(&R::path(record.id()), &bytes).await.or_raise(|| ErrorKind::Storage)
    }

    /// Number of records of a kind.
    pub async fn count<R: Record>(&self) -> Result<usize> {
        let files = self.backend.list(Some(&PathBuf::from(R::KIND))).await.or_raise(|| ErrorKind::Storage)?;
        Ok(files.iter().filter(|file| file.has_extension("json")).count())
    }

    /// A view of this cache that can only read.
    pub fn reader(&self) -> CacheReader {
        CacheReader {
            backend: Arc::new(ReadOnlyBackend::new(self.backend.clone())),
        }
    }
}

/// Read-only access to the record cache, handed to concurrent workers so the
/// owner of the [`Cache`] stays the only writer.
#[derive(Clone)]
pub struct CacheReader {
    backend: BackendHandle,
}
impl CacheReader {
    pub async fn get<R: Record>(&self, id: &R::Id) -> Result<Option<R>> {
        read_record(self.backend.as_ref(), id).await
    }
}
