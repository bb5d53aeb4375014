use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, trace};

use super::error::WriteError;
use super::traits::ResourceReader;
use crate::domain::{ReadError, ResourceId};

/// Filesystem store rooted at a directory
///
/// Resource ids are joined onto the root, so `poem-two/stanza-01.txt`
/// with root `poems` reads `poems/poem-two/stanza-01.txt`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path a resource id resolves to
    pub fn resolve(&self, id: &ResourceId) -> PathBuf {
        self.root.join(id.as_path())
    }

    /// Write `contents` to the resource, replacing it if it exists
    ///
    /// Missing parent directories are created first.
    pub async fn write(&self, id: &ResourceId, contents: &str) -> Result<(), WriteError> {
        let path = self.resolve(id);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        fs::write(&path, contents)
            .await
            .map_err(|source| WriteError::Write {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), bytes = contents.len(), "Wrote resource");
        Ok(())
    }
}

#[async_trait]
impl ResourceReader for FileStore {
    async fn read(&self, id: &ResourceId) -> Result<String, ReadError> {
        let path = self.resolve(id);
        trace!(path = %path.display(), "Reading resource");

        fs::read_to_string(&path)
            .await
            .map_err(|e| ReadError::from_io(id.clone(), &e))
    }
}
