use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::repository::traits::SnapshotStorage;

pub const DEFAULT_DIR_NAME: &str = ".taskboard";
const DEFAULT_FILE_NAME: &str = "projects.json";

/// Resolves the data directory: `base_dir` if given, else `~/.taskboard`.
pub fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    match base_dir {
        Some(dir) => Ok(dir),
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            Ok(home_dir.join(DEFAULT_DIR_NAME))
        }
    }
}

/// Snapshot kept as `projects.json` in the data directory.
#[derive(Clone, Debug)]
pub struct FileSnapshotStorage {
    file_path: PathBuf,
}

impl FileSnapshotStorage {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = data_dir(base_dir)?;
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        Ok(FileSnapshotStorage { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn temp_path(&self) -> PathBuf {
        self.file_path.with_extension("json.tmp")
    }
}

impl SnapshotStorage for FileSnapshotStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.file_path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", self.file_path.display())),
        }
    }

    fn save(&self, bytes: &[u8]) -> Result<()> {
        // Write then rename so a crash mid-write leaves the old snapshot intact.
        let tmp = self.temp_path();
        {
            let mut file = File::create(&tmp)
                .with_context(|| format!("failed to create {}", tmp.display()))?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.file_path)
            .with_context(|| format!("failed to replace {}", self.file_path.display()))?;
        Ok(())
    }
}
