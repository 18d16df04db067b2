use highroller_types::casino::{
    decode_balance, decode_history, encode_balance, encode_history, CodecError, HistoryLog,
};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::warn;

/// Logical records kept in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Balance,
    History,
}

impl Key {
    pub fn name(&self) -> &'static str {
        match self {
            Key::Balance => "highroller.balance.v1",
            Key::History => "highroller.history.v1",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] io::Error),
    #[error("failed to encode record: {0}")]
    Encode(#[from] CodecError),
}

/// String key-value storage the engine persists through.
pub trait Store {
    fn get(&self, key: &Key) -> Result<Option<String>, StoreError>;
    fn insert(&mut self, key: Key, value: String) -> Result<(), StoreError>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get(&self, key: &Key) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn insert(&mut self, key: Key, value: String) -> Result<(), StoreError> {
        (**self).insert(key, value)
    }
}

#[derive(Default)]
pub struct Memory {
    state: HashMap<Key, String>,
}

impl Store for Memory {
    fn get(&self, key: &Key) -> Result<Option<String>, StoreError> {
        Ok(self.state.get(key).cloned())
    }

    fn insert(&mut self, key: Key, value: String) -> Result<(), StoreError> {
        self.state.insert(key, value);
        Ok(())
    }
}

/// One file per record inside a data directory.
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a data directory.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path(&self, key: &Key) -> PathBuf {
        self.directory.join(key.name())
    }
}

impl Store for FileStore {
    fn get(&self, key: &Key) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn insert(&mut self, key: Key, value: String) -> Result<(), StoreError> {
        // Write aside and rename so a crash never leaves a torn record
        let path = self.path(&key);
        let staging = path.with_extension("tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }
}

/// Records recovered from storage. Missing or unreadable records are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub balance: Option<u64>,
    pub history: Option<HistoryLog>,
}

/// Loads and saves the player's records.
pub struct Persistence<S: Store> {
    store: S,
}

impl<S: Store> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read both records. Never fails: anything unusable is reported and dropped.
    pub fn load(&self) -> Snapshot {
        let balance = self
            .read(Key::Balance)
            .and_then(|raw| match decode_balance(&raw) {
                Ok(balance) => Some(balance),
                Err(e) => {
                    warn!(error = %e, "discarding stored balance");
                    None
                }
            });
        let history = self
            .read(Key::History)
            .and_then(|raw| match decode_history(&raw) {
                Ok(history) => Some(history),
                Err(e) => {
                    warn!(error = %e, "discarding stored history");
                    None
                }
            });
        Snapshot { balance, history }
    }

    fn read(&self, key: Key) -> Option<String> {
        match self.store.get(&key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = key.name(), error = %e, "storage error during load");
                None
            }
        }
    }

    /// Write both records.
    pub fn save(&mut self, balance: u64, history: &HistoryLog) -> Result<(), StoreError> {
        self.store.insert(Key::Balance, encode_balance(balance))?;
        self.store.insert(Key::History, encode_history(history)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use highroller_types::casino::{HistoryEntry, Symbol};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "highroller-{name}-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_empty_store_loads_nothing() {
        let persistence = Persistence::new(Memory::default());
        assert_eq!(persistence.load(), Snapshot::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut persistence = Persistence::new(Memory::default());
        let mut history = HistoryLog::default();
        history.append(HistoryEntry::slot(&[Symbol::Bell; 3], 30, 1));

        persistence.save(130, &history).unwrap();
        assert_eq!(
            persistence.store().get(&Key::Balance).unwrap().as_deref(),
            Some("130")
        );

        let snapshot = persistence.load();
        assert_eq!(snapshot.balance, Some(130));
        assert_eq!(snapshot.history, Some(history));
    }

    #[test]
    fn test_malformed_records_are_absent() {
        let mut store = Memory::default();
        store.insert(Key::Balance, "NaN".to_string()).unwrap();
        store
            .insert(Key::History, "[{\"text\":".to_string())
            .unwrap();

        let snapshot = Persistence::new(store).load();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_malformed_history_keeps_balance() {
        let mut store = Memory::default();
        store.insert(Key::Balance, "512".to_string()).unwrap();
        store.insert(Key::History, "garbage".to_string()).unwrap();

        let snapshot = Persistence::new(store).load();
        assert_eq!(snapshot.balance, Some(512));
        assert_eq!(snapshot.history, None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = scratch_dir("roundtrip");
        let mut store = FileStore::open(&dir).unwrap();
        assert_eq!(store.get(&Key::Balance).unwrap(), None);

        store.insert(Key::Balance, "77".to_string()).unwrap();
        assert_eq!(store.get(&Key::Balance).unwrap().as_deref(), Some("77"));

        // A second handle on the same directory sees the record.
        let reopened = FileStore::open(&dir).unwrap();
        assert_eq!(reopened.get(&Key::Balance).unwrap().as_deref(), Some("77"));

        // Overwrites replace the whole record.
        store.insert(Key::Balance, "5".to_string()).unwrap();
        assert_eq!(reopened.get(&Key::Balance).unwrap().as_deref(), Some("5"));
        assert_eq!(store.get(&Key::History).unwrap(), None);

        fs::remove_dir_all(&dir).unwrap();
    }
}
