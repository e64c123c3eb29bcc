use crate::model::ShiftRecord;
use anyhow::Context;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Clé fixe sous laquelle l'escala est persistée.
pub const STORAGE_KEY: &str = "work-schedule";

pub trait Storage {
    /// Charge les créneaux ; un support vide donne une liste vide.
    fn load(&self) -> anyhow::Result<Vec<ShiftRecord>>;
    /// Sauvegarde de manière atomique.
    fn save(&self, records: &[ShiftRecord]) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    /// `<dir>/work-schedule.json`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        Self::open(dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Vec<ShiftRecord>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        let records: Vec<ShiftRecord> = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(records)
    }

    fn save(&self, records: &[ShiftRecord]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(records)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

/// Stockage en mémoire (tests, intégration embarquée).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<Vec<ShiftRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> anyhow::Result<Vec<ShiftRecord>> {
        let guard = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("memory storage poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, records: &[ShiftRecord]) -> anyhow::Result<()> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("memory storage poisoned"))?;
        *guard = records.to_vec();
        Ok(())
    }
}
