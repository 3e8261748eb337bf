use flipzy_core::{Card, CardStore, CoreError};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

pub mod paths;

/// Card store backed by one JSON array on disk.
///
/// Each call re-reads or rewrites the whole file; nothing is cached between
/// calls, so edits made to the file by hand are picked up on the next load.
pub struct JsonStore {
    path: PathBuf,
    backups_dir: PathBuf,
}

impl JsonStore {
    pub fn open_default() -> Result<Self, CoreError> {
        let (file, backups) = paths::default_store_files();
        Self::open(file, backups)
    }

    pub fn open_in(root: &Path) -> Result<Self, CoreError> {
        let (file, backups) = paths::store_files_in(root);
        Self::open(file, backups)
    }

    /// Creates the directories. The store file itself appears on first save.
    pub fn open(path: PathBuf, backups_dir: PathBuf) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&backups_dir)?;
        debug!(path = %path.display(), "opened card store");
        Ok(Self { path, backups_dir })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Like [`CardStore::load_all`] but reports unreadable or malformed data
    /// instead of treating it as empty. A missing file is still empty.
    pub fn try_load_all(&self) -> Result<Vec<Card>, CoreError> {
        let buf = match fs::read(&self.path) {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&buf)?)
    }

    fn next_backup_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("cards");
        let ts = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f");
        let mut candidate = self.backups_dir.join(format!("{stem}_backup_{ts}.json"));
        let mut n = 1;
        while candidate.exists() {
            candidate = self
                .backups_dir
                .join(format!("{stem}_backup_{ts}-{n}.json"));
            n += 1;
        }
        candidate
    }
}

impl CardStore for JsonStore {
    fn load_all(&self) -> Vec<Card> {
        match self.try_load_all() {
            Ok(cards) => {
                debug!(count = cards.len(), "loaded cards");
                cards
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding unreadable card store");
                Vec::new()
            }
        }
    }

    fn save_all(&self, cards: &[Card]) -> Result<(), CoreError> {
        let json = serde_json::to_vec_pretty(cards)?;
        write_atomic(&self.path, &json)?;
        debug!(count = cards.len(), "saved cards");
        Ok(())
    }

    fn backup_now(&self) -> Result<Option<PathBuf>, CoreError> {
        match fs::metadata(&self.path) {
            Ok(m) if m.len() > 0 => {}
            Ok(_) => {
                debug!("store file is empty, skipping backup");
                return Ok(None);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no store file yet, skipping backup");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }

        fs::create_dir_all(&self.backups_dir)?;
        let target = self.next_backup_path();
        fs::copy(&self.path, &target)?;
        info!(backup = %target.display(), "backed up card store");
        Ok(Some(target))
    }
}

/// Temp file in the same directory, then rename over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), io::Error> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
