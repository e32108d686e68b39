use crate::error::FocusError;
use crate::state::ApplicationState;
use fs2::FileExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// File name of the state inside the focus home directory
pub const STATE_FILENAME: &str = "state.json";
/// How long [`FileStateStorage::update`] waits for another process by default
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Abstract state persistence interface
pub trait StateStorage {
    /// Return the stored state. When nothing is stored yet, a default state is
    /// persisted and returned.
    fn load(&self) -> Result<ApplicationState, FocusError>;
    /// Persist the whole state, replacing what was stored
    fn save(&self, state: &ApplicationState) -> Result<(), FocusError>;
}

/// Single JSON file persistence with an advisory lock file next to it
#[derive(Debug, Clone)]
pub struct FileStateStorage {
    path: PathBuf,
    lock_timeout: Duration,
}

/// Exclusive hold on the state file. Released on drop.
#[derive(Debug)]
pub struct StateLock {
    _file: File,
}

impl FileStateStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStateStorage {
            path: path.into(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    /// Acquire the exclusive lock, retrying with backoff until the timeout.
    ///
    /// Returns `FocusError::StateBusy` if another process keeps holding it.
    pub fn lock(&self) -> Result<StateLock, FocusError> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&lock_path)?;

        let start = Instant::now();
        let mut delay = Duration::from_millis(10);
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => break,
                Err(_) if start.elapsed() < self.lock_timeout => {
                    std::thread::sleep(delay);
                    delay = (delay * 2).min(Duration::from_millis(200));
                }
                Err(e) => {
                    warn!(path = %lock_path.display(), "timed out waiting for state lock");
                    return Err(FocusError::StateBusy(format!(
                        "{} is held by another focus process: {}",
                        lock_path.display(),
                        e
                    )));
                }
            }
        }

        debug!(path = %lock_path.display(), "state lock acquired");
        Ok(StateLock { _file: file })
    }

    /// Load, mutate and save while holding the lock.
    ///
    /// Nothing is written when `mutate` fails.
    pub fn update<T, F>(&self, mutate: F) -> Result<T, FocusError>
    where
        F: FnOnce(&mut ApplicationState) -> Result<T, FocusError>,
    {
        let _lock = self.lock()?;
        let mut state = self.read_or_init()?;
        let out = mutate(&mut state)?;
        self.save(&state)?;
        Ok(out)
    }

    /// Decode the state file, writing a default one first if it is missing.
    /// The caller must hold the lock.
    fn read_or_init(&self) -> Result<ApplicationState, FocusError> {
        if self.path.exists() {
            return self.read();
        }
        info!(path = %self.path.display(), "no state file, creating default");
        let state = ApplicationState::default();
        self.save(&state)?;
        Ok(state)
    }

    fn read(&self) -> Result<ApplicationState, FocusError> {
        let content = fs::read(&self.path)?;
        let state: ApplicationState = serde_json::from_slice(&content).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "state file unreadable");
            e
        })?;
        debug!(path = %self.path.display(), repos = state.todos.len(), "state loaded");
        Ok(state)
    }

    /// Write to a uniquely named temp file in the same directory, then rename
    /// it over the state file.
    fn write_atomic(&self, contents: &[u8]) -> Result<(), FocusError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl StateStorage for FileStateStorage {
    /// Creating the default state takes the lock, so a first run cannot
    /// write underneath another process's `update`.
    fn load(&self) -> Result<ApplicationState, FocusError> {
        if self.path.exists() {
            return self.read();
        }
        let _lock = self.lock()?;
        self.read_or_init()
    }

    fn save(&self, state: &ApplicationState) -> Result<(), FocusError> {
        let mut buf = serde_json::to_vec_pretty(state)?;
        buf.push(b'\n');
        self.write_atomic(&buf)?;
        debug!(path = %self.path.display(), bytes = buf.len(), "state saved");
        Ok(())
    }
}
