//! Local filesystem storage backend.
//!
//! Files are stored under a root directory and accessed through `tokio::fs`.
//! Writes go to a hidden sibling file first and are then renamed over the
//! target, so a reader (or a second process) sees either the old contents or
//! the new ones, never a torn file.

use crate::backend::FileInfoStream;
use crate::error::{ErrorKind, Result};
use crate::{FileInfo, StorageBackend, path::validate as validate_path};
use async_stream::stream;
use async_trait::async_trait;
use exn::ResultExt;
use std::fs::create_dir_all as sync_create_dir;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs::{self, DirEntry};

const TEMP_SUFFIX: &str = ".tmp";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

enum WalkEntry {
    File(FileInfo),
    Descend(PathBuf),
    Skip,
}

/// Local filesystem storage backend.
///
/// # Examples
///
/// ```no_run
/// use metagame_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("cache", "/home/me/.cache/metagame")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LocalBackend {
    name: String,
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend, creating the root directory if
    /// it doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPath`](ErrorKind::InvalidPath) if the path is not
    /// absolute or exists but is not a directory.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidPath(root));
            }
        } else {
            // Only happens once at startup; not worth an async constructor.
            sync_create_dir(&root).map_err(|e| Self::map_io_error(e, &root))?;
        }
        Ok(Self { name: name.into(), root })
    }

    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    fn relative_path(&self, absolute: impl AsRef<Path>) -> Result<PathBuf> {
        let absolute = absolute.as_ref();
        let relative = absolute.strip_prefix(&self.root).or_raise(|| {
            ErrorKind::BackendError(format!("path `{:?}` is not within root `{:?}`", absolute, self.root))
        })?;
        validate_path(relative)
    }

    /// Hidden sibling of `target` that a write is staged in. Unique per
    /// process and per call so concurrent writers never share one.
    fn temp_path(target: &Path) -> PathBuf {
        let name = target.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        target.with_file_name(format!(".{name}.{}.{counter}{TEMP_SUFFIX}", std::process::id()))
    }

    fn is_temp_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.') && n.ends_with(TEMP_SUFFIX))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }

    // Errors can't be `?`'d inside the stream loop, so the per-entry work
    // lives here and the loop only yields.
    async fn process_entry(&self, entry: DirEntry, prefix: Option<&Path>) -> Result<WalkEntry> {
        let path = entry.path();
        let metadata = entry.metadata().await.map_err(|e| Self::map_io_error(e, &path))?;
        let relative = self.relative_path(&path)?;
        if let Some(pfx) = prefix
            && !relative.starts_with(pfx)
        {
            return Ok(WalkEntry::Skip);
        }
        if metadata.is_dir() {
            return Ok(WalkEntry::Descend(path));
        }
        if metadata.is_file() && !Self::is_temp_file(&relative) {
            return Ok(WalkEntry::File(FileInfo::new(relative, metadata.len())));
        }
        // Staged writes and broken symlinks.
        Ok(WalkEntry::Skip)
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_stream<'a>(&'a self, prefix: Option<&'a Path>) -> FileInfoStream<'a> {
        let validated_prefix = match prefix.map(validate_path).transpose() {
            Ok(pfx) => pfx,
            Err(e) => return Box::pin(futures::stream::once(async { Err(e) })),
        };
        // Walk from the parent of the prefix so a prefix naming a file (or
        // nothing yet) doesn't error; `Path::starts_with` does the filtering.
        let start_dir = validated_prefix
            .as_ref()
            .map(|prefix| self.root.join(prefix).parent().unwrap_or(&self.root).to_path_buf())
            .unwrap_or_else(|| self.root.clone());
        let mut stack = vec![start_dir];

        Box::pin(stream! {
            'dirs: while let Some(current) = stack.pop() {
                let mut entries = match fs::read_dir(&current).await {
                    Ok(entries) => entries,
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                    Err(err) => {
                        yield Err(exn::Exn::from(Self::map_io_error(err, &current)));
                        continue 'dirs;
                    }
                };
                'entries: loop {
                    let entry = match entries.next_entry().await {
                        Ok(Some(entry)) => entry,
                        Ok(None) => break 'entries,
                        Err(e) => { yield Err(exn::Exn::from(Self::map_io_error(e, &current))); continue 'entries; },
                    };
                    match self.process_entry(entry, validated_prefix.as_deref()).await {
                        Ok(WalkEntry::File(f)) => yield Ok(f),
                        Ok(WalkEntry::Descend(d)) => stack.push(d),
                        Ok(WalkEntry::Skip) => {},
                        Err(e) => yield Err(e),
                    };
                }
            }
        })
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::read(&abs_path).await.map_err(|e| Self::map_io_error(e, path))?)
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        if let Some(parent) = abs_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| Self::map_io_error(e, path))?;
        }
        let temp = Self::temp_path(&abs_path);
        fs::write(&temp, data).await.map_err(|e| Self::map_io_error(e, path))?;
        if let Err(e) = fs::rename(&temp, &abs_path).await {
            if let Err(cleanup) = fs::remove_file(&temp).await {
                tracing::warn!(path = %temp.display(), error = %cleanup, "Failed to remove staged write");
            }
            exn::bail!(Self::map_io_error(e, path));
        }
        tracing::trace!(backend = %self.name, path = %path.display(), bytes = data.len(), "Wrote file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> (tempfile::TempDir, LocalBackend) {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("cache", temp_dir.path()).unwrap();
        (temp_dir, backend)
    }

    #[test]
    fn test_new_requires_absolute_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(LocalBackend::new("cache", temp_dir.path()).is_ok());
        assert!(LocalBackend::new("cache", "relative/path").is_err());
        assert!(LocalBackend::new("cache", "./relative").is_err());
    }

    #[test]
    fn test_new_creates_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("nested/cache");
        LocalBackend::new("cache", &root).unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn test_new_rejects_file_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();
        let err = LocalBackend::new("cache", &file).err().unwrap();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }

    #[test]
    fn test_paths() {
        let (temp_dir, backend) = backend();
        let abs = temp_dir.path().join("decklists/1.json");
        assert_eq!(backend.absolute_path("decklists/1.json").unwrap(), abs);
        assert_eq!(backend.relative_path(&abs).unwrap(), Path::new("decklists/1.json"));
        assert!(backend.absolute_path("../etc/passwd").is_err());
        assert!(backend.relative_path("/other/file.json").is_err());
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let (_temp_dir, backend) = backend();
        backend.write(Path::new("cards/30077.json"), b"{}").await.unwrap();
        assert_eq!(backend.read(Path::new("cards/30077.json")).await.unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_write_replaces_and_leaves_no_staging_files() {
        let (temp_dir, backend) = backend();
        let path = Path::new("tournaments/1.json");
        backend.write(path, b"first version, longer").await.unwrap();
        backend.write(path, b"second").await.unwrap();
        assert_eq!(backend.read(path).await.unwrap(), b"second");
        let names: Vec<_> = std::fs::read_dir(temp_dir.path().join("tournaments"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("1.json")]);
    }

    #[tokio::test]
    async fn test_read_missing() {
        let (_temp_dir, backend) = backend();
        let err = backend.read(Path::new("decklists/404.json")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_reports_size() {
        let (_temp_dir, backend) = backend();
        backend.write(Path::new("file.json"), b"Hello, world!").await.unwrap();
        let files = backend.list(None).await.unwrap();
        assert_eq!(files, vec![FileInfo::new("file.json", 13)]);
    }

    #[tokio::test]
    async fn test_list_with_prefix() {
        let (_temp_dir, backend) = backend();
        backend.write(Path::new("cards/1.json"), b"data").await.unwrap();
        backend.write(Path::new("cards/2.json"), b"data").await.unwrap();
        backend.write(Path::new("cardsets/3.json"), b"data").await.unwrap();
        backend.write(Path::new("decklists/4.json"), b"data").await.unwrap();
        assert_eq!(backend.list(None).await.unwrap().len(), 4);
        let mut cards: Vec<_> = backend.list(Some(Path::new("cards"))).await.unwrap().into_iter().map(|f| f.path).collect();
        cards.sort();
        assert_eq!(cards, vec![PathBuf::from("cards/1.json"), PathBuf::from("cards/2.json")]);
        assert!(backend.list(Some(Path::new("nonexistent"))).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_skips_staged_writes() {
        let (temp_dir, backend) = backend();
        backend.write(Path::new("cards/1.json"), b"data").await.unwrap();
        std::fs::write(temp_dir.path().join("cards/.2.json.99.0.tmp"), b"partial").unwrap();
        assert_eq!(backend.list(Some(Path::new("cards"))).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_path_security() {
        let (_temp_dir, backend) = backend();
        assert!(backend.read(Path::new("../etc/passwd")).await.is_err());
        assert!(backend.read(Path::new("etc/../../passwd")).await.is_err());
        assert!(backend.write(Path::new("../etc/passwd"), b"data").await.is_err());
        assert!(backend.list(Some(Path::new("../cards"))).await.is_err());
    }
}
