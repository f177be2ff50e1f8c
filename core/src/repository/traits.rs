use anyhow::Result;

/// Key-value byte store holding one whole snapshot of the collection.
///
/// Both calls are synchronous and local. The store treats every error as
/// non-fatal.
pub trait SnapshotStorage {
    /// Last saved snapshot, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<u8>>>;
    /// Replaces the stored snapshot.
    fn save(&self, bytes: &[u8]) -> Result<()>;
}
