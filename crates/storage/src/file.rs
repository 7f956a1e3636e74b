use std::path::PathBuf;

/// File metadata returned by storage backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Relative path from storage root
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}
impl FileInfo {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self { path: path.into(), size }
    }

    /// Whether the file name ends in the given extension (without the dot).
    pub fn has_extension(&self, extension: &str) -> bool {
        self.path.extension().is_some_and(|ext| ext == extension)
    }
}
