use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{anyhow, Result};

use crate::repository::traits::SnapshotStorage;

#[derive(Default, Debug)]
struct Inner {
    snapshot: RefCell<Option<Vec<u8>>>,
    fail_saves: Cell<bool>,
    fail_loads: Cell<bool>,
    saves: Cell<usize>,
}

/// In-process transport. Clones share the same snapshot, so a caller can keep
/// a handle to inspect what the store wrote.
#[derive(Clone, Default, Debug)]
pub struct MemorySnapshotStorage {
    inner: Rc<Inner>,
}

impl MemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(bytes: impl Into<Vec<u8>>) -> Self {
        let storage = Self::default();
        *storage.inner.snapshot.borrow_mut() = Some(bytes.into());
        storage
    }

    pub fn snapshot(&self) -> Option<Vec<u8>> {
        self.inner.snapshot.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.inner.saves.get()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.inner.fail_saves.set(fail);
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.inner.fail_loads.set(fail);
    }
}

impl SnapshotStorage for MemorySnapshotStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        if self.inner.fail_loads.get() {
            return Err(anyhow!("memory storage: load disabled"));
        }
        Ok(self.snapshot())
    }

    fn save(&self, bytes: &[u8]) -> Result<()> {
        if self.inner.fail_saves.get() {
            return Err(anyhow!("memory storage: save disabled"));
        }
        *self.inner.snapshot.borrow_mut() = Some(bytes.to_vec());
        self.inner.saves.set(self.inner.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let storage = MemorySnapshotStorage::new();
        let handle = storage.clone();

        storage.save(b"abc").unwrap();
        assert_eq!(handle.snapshot().as_deref(), Some(&b"abc"[..]));
        assert_eq!(handle.save_count(), 1);
    }

    #[test]
    fn test_failing_save_keeps_previous_snapshot() {
        let storage = MemorySnapshotStorage::with_snapshot("old");
        storage.set_fail_saves(true);
        assert!(storage.save(b"new").is_err());
        assert_eq!(storage.load().unwrap().as_deref(), Some(&b"old"[..]));
        assert_eq!(storage.save_count(), 0);
    }
}
