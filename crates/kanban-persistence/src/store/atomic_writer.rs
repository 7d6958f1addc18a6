use kanban_core::KanbanResult;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Writes whole files through a sibling temp file and a rename, so readers
/// never observe a half-written document.
pub struct AtomicWriter;

impl AtomicWriter {
    pub async fn write_atomic(path: &Path, data: &[u8]) -> KanbanResult<()> {
        // Same directory keeps the rename on one filesystem.
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;

        fs::write(temp_file.path(), data).await?;
        temp_file.persist(path).map_err(|e| e.error)?;

        tracing::debug!("Atomically wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    /// Read a file, or `None` if it does not exist yet.
    pub async fn read_if_exists(path: &Path) -> KanbanResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
