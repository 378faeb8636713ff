use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};
use shared::models::{ComicId, Database};

pub const DEFAULT_DATABASE_FILE: &str = "database.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Malformed vote database {path}: {reason}")]
    MalformedStorage { path: String, reason: String },
    #[error("Failed to persist vote database {path}: {source}")]
    PersistenceFailure { path: String, source: io::Error },
    #[error("Failed to read vote database {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("Vote database lock poisoned")]
    LockFailed,
}

/// Like counts and voter sets for every comic, mirrored to a JSON file.
///
/// One mutex covers every read and every read-modify-write, including the disk
/// write that follows an accepted vote, so votes are fully serialized.
#[derive(Debug)]
pub struct VoteStore {
    database: Mutex<Database>,
    path: Option<PathBuf>,
}

impl VoteStore {
    /// Opens the store backed by `path`, creating `{"likes": {}}` there if the
    /// file does not exist yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let database = read_database(&path)?;
        Ok(Self {
            database: Mutex::new(database),
            path: Some(path),
        })
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            database: Mutex::new(Database::default()),
            path: None,
        }
    }

    /// Replaces the in-memory state with the current file contents.
    ///
    /// Must not race with in-flight votes.
    pub fn reload(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else { return Ok(()) };
        let fresh = read_database(path)?;
        *self.lock()? = fresh;
        Ok(())
    }

    pub fn get_likes(&self, id: ComicId) -> Result<u64, StoreError> {
        Ok(self.lock()?.likes_for(id))
    }

    /// Counts `identity`'s vote for `id` at most once and returns the like count.
    ///
    /// A repeat vote returns the current count without writing the file. If the
    /// write fails the vote is taken back out of memory before returning.
    pub fn record_vote(&self, id: ComicId, identity: &str) -> Result<u64, StoreError> {
        let mut database = self.lock()?;

        let record = database.likes.entry(id).or_default();
        if !record.add_vote(identity) {
            debug!(comic = id, %identity, "Duplicate vote ignored");
            return Ok(record.likes());
        }
        let likes = record.likes();

        if let Err(e) = self.persist(&database) {
            error!(comic = id, "Vote not counted: {}", e);
            if let Some(record) = database.likes.get_mut(&id) {
                record.retract_vote(identity);
                if record.is_empty() {
                    database.likes.remove(&id);
                }
            }
            return Err(e);
        }

        info!(comic = id, likes, "Vote recorded");
        Ok(likes)
    }

    /// Writes the current snapshot to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        let database = self.lock()?;
        self.persist(&database)
    }

    /// Copy of the whole database, taken under the lock.
    pub fn snapshot(&self) -> Result<Database, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Database>, StoreError> {
        self.database.lock().map_err(|e| {
            error!("Failed to acquire vote database lock: {}", e);
            StoreError::LockFailed
        })
    }

    fn persist(&self, database: &Database) -> Result<(), StoreError> {
        let Some(path) = &self.path else { return Ok(()) };
        write_database(path, database).map_err(|source| StoreError::PersistenceFailure {
            path: path.display().to_string(),
            source,
        })
    }
}

fn read_database(path: &Path) -> Result<Database, StoreError> {
    let shown = path.display().to_string();

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Vote database {} not found, creating an empty one", shown);
            let database = Database::default();
            write_database(path, &database)
                .map_err(|source| StoreError::PersistenceFailure { path: shown, source })?;
            return Ok(database);
        }
        Err(source) => return Err(StoreError::Io { path: shown, source }),
    };

    let database: Database = serde_json::from_str(&raw).map_err(|e| StoreError::MalformedStorage {
        path: shown.clone(),
        reason: e.to_string(),
    })?;

    if let Some(id) = database.first_inconsistent() {
        return Err(StoreError::MalformedStorage {
            path: shown,
            reason: format!("comic {} has a like count that does not match its voters", id),
        });
    }

    info!(
        comics = database.likes.len(),
        likes = database.total_likes(),
        "Loaded vote database {}", shown
    );
    Ok(database)
}

/// Writes the full snapshot to a sibling temp file, then renames it over `path`.
fn write_database(path: &Path, database: &Database) -> io::Result<()> {
    let json = serde_json::to_vec_pretty(database)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path);
    let written = File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(&json)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp_path, path));

    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
