//! Load and save configuration snapshots.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sku_core::load_inventory;
use sku_model::{Inventory, RawConfiguration};
use tracing::{debug, info};

use crate::defaults::factory_default;
use crate::error::{Result, StoreError};

/// A place configuration snapshots live.
///
/// Every load goes through the normaliser, so callers always receive the
/// canonical form no matter how old the stored document is.
pub trait ConfigStore {
    fn load(&self) -> Result<Inventory>;
    fn save(&self, inventory: &Inventory) -> Result<()>;
}

/// Decode a configuration document.
pub fn parse_configuration(bytes: &[u8], path: &Path) -> Result<Inventory> {
    let raw: RawConfiguration =
        serde_json::from_slice(bytes).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(load_inventory(raw))
}

/// Encode a snapshot as pretty-printed canonical JSON.
pub fn encode_configuration(inventory: &Inventory) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(&inventory.to_raw())
        .map_err(|source| StoreError::Serialization { source })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// A JSON file on local disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the file, or the factory default when it does not exist yet.
    pub fn load_or_default(&self) -> Result<Inventory> {
        if self.exists() {
            self.load()
        } else {
            info!(path = %self.path.display(), "no configuration file, using factory default");
            Ok(factory_default())
        }
    }

    /// Write the factory default, refusing to clobber an existing file
    /// unless `force` is set.
    pub fn initialize(&self, force: bool) -> Result<Inventory> {
        if self.exists() && !force {
            return Err(StoreError::AlreadyExists {
                path: self.path.clone(),
            });
        }
        let inventory = factory_default();
        self.save(&inventory)?;
        Ok(inventory)
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&self) -> Result<Inventory> {
        let bytes = fs::read(&self.path).map_err(|source| StoreError::Io {
            operation: "read",
            path: self.path.clone(),
            source,
        })?;
        let inventory = parse_configuration(&bytes, &self.path)?;
        info!(
            path = %self.path.display(),
            categories = inventory.len(),
            "loaded configuration"
        );
        Ok(inventory)
    }

    /// Temp file plus rename, so a crash never leaves a half-written file.
    fn save(&self, inventory: &Inventory) -> Result<()> {
        let bytes = encode_configuration(inventory)?;
        let temp_path = self.path.with_extension("json.tmp");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let written = write_synced(&temp_path, &bytes).and_then(|()| {
            fs::rename(&temp_path, &self.path).map_err(|source| StoreError::AtomicWriteFailed {
                temp_path: temp_path.clone(),
                target_path: self.path.clone(),
                source,
            })
        });
        if let Err(error) = written {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                debug!(path = %temp_path.display(), %cleanup, "temp file not removed");
            }
            return Err(error);
        }

        info!(
            path = %self.path.display(),
            categories = inventory.len(),
            "saved configuration"
        );
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(io_error("create", path))?;
    file.write_all(bytes).map_err(io_error("write", path))?;
    file.sync_all().map_err(io_error("sync", path))
}

fn io_error<'a>(operation: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> StoreError + 'a {
    move |source| StoreError::Io {
        operation,
        path: path.to_path_buf(),
        source,
    }
}

/// In-memory store holding the encoded document, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            document: Mutex::new(Some(bytes.into())),
        }
    }

    fn path() -> &'static Path {
        Path::new("<memory>")
    }

    fn lock_error() -> StoreError {
        StoreError::Io {
            operation: "lock",
            path: Self::path().to_path_buf(),
            source: io::Error::other("memory store lock poisoned"),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<Inventory> {
        let guard = self.document.lock().map_err(|_| Self::lock_error())?;
        match guard.as_deref() {
            Some(bytes) => parse_configuration(bytes, Self::path()),
            None => {
                debug!("memory store empty, using factory default");
                Ok(factory_default())
            }
        }
    }

    fn save(&self, inventory: &Inventory) -> Result<()> {
        let bytes = encode_configuration(inventory)?;
        let mut guard = self.document.lock().map_err(|_| Self::lock_error())?;
        *guard = Some(bytes);
        Ok(())
    }
}
