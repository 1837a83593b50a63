use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{CredentialError, Result};
use crate::store::record::CredentialRecord;

/// Single-file store for the current credential record.
///
/// Writes go to a temp file in the target directory which is then renamed
/// over the destination, so readers see either the old or the new record.
/// No locking: concurrent processes may race, last rename wins.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Replace the stored record wholesale.
    pub fn save(&self, record: &CredentialRecord) -> Result<()> {
        let dir = self.parent_dir();
        ensure_private_dir(dir).map_err(|source| self.write_err("failed to create storage directory", dir, source))?;

        let json = serde_json::to_vec_pretty(record)
            .map_err(|e| self.write_err("failed to serialize credential for", &self.path, e.into()))?;

        // dropped (and removed) on every early return below
        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|source| self.write_err("failed to create temp file in", dir, source))?;
        restrict_to_owner(tmp.as_file())
            .map_err(|source| self.write_err("failed to set permissions on", tmp.path(), source))?;
        tmp.write_all(&json)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|source| self.write_err("failed to write", tmp.path(), source))?;
        tmp.persist(&self.path)
            .map_err(|e| self.write_err("failed to replace", &self.path, e.error))?;
        sync_dir(dir).map_err(|source| self.write_err("failed to sync storage directory", dir, source))?;

        info!("credential saved, path '{}'", self.path.display());
        Ok(())
    }

    /// Read the stored record. A missing file is [`CredentialError::NoCredential`].
    pub fn load(&self) -> Result<CredentialRecord> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no credential at '{}'", self.path.display());
                return Err(CredentialError::NoCredential {
                    path: self.path.clone(),
                });
            }
            Err(source) => {
                return Err(CredentialError::StorageRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let record = serde_json::from_slice::<CredentialRecord>(&bytes)
            .map_err(|e| self.corrupt(e.to_string()))?
            .normalize();
        record.check().map_err(|reason| self.corrupt(reason))?;

        debug!("credential loaded, path '{}'", self.path.display());
        Ok(record)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn corrupt(&self, reason: String) -> CredentialError {
        CredentialError::CorruptCredential {
            path: self.path.clone(),
            reason,
        }
    }

    fn write_err(&self, action: &'static str, path: &Path, source: std::io::Error) -> CredentialError {
        CredentialError::StorageWrite {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Create `dir` and missing ancestors, owner-only. Existing directories are left as they are.
fn ensure_private_dir(dir: &Path) -> std::io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(crate::utils::constants::CREDENTIAL_DIR_MODE);
    }
    builder.create(dir)
}

/// Flush the directory entry so the rename survives a crash.
#[cfg(unix)]
pub(crate) fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
pub(crate) fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn restrict_to_owner(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(crate::utils::constants::CREDENTIAL_FILE_MODE))
}

#[cfg(not(unix))]
fn restrict_to_owner(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}
