use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::StoreFile;

pub(crate) const CONFIG_DIR_NAME: &str = ".gsm";
pub(crate) const CONFIG_FILE_NAME: &str = "config.json";
pub(crate) const LOG_FILE_NAME: &str = "gsm.log";

/// Load/save boundary for the connection list.
///
/// `save` replaces the current snapshot only after the write succeeded, so a
/// failed save leaves both the file and the in-memory copy untouched.
pub(crate) trait ConnectionStore {
    fn load(&mut self) -> Result<()>;
    fn save(&mut self, store: StoreFile) -> Result<()>;
    fn current(&self) -> &StoreFile;
}

pub(crate) fn config_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path);
    }
    if let Some(mut dir) = dirs::home_dir() {
        dir.push(CONFIG_DIR_NAME);
        dir.push(CONFIG_FILE_NAME);
        return Ok(dir);
    }
    let mut fallback = std::env::current_dir().context("current dir")?;
    fallback.push(CONFIG_DIR_NAME);
    fallback.push(CONFIG_FILE_NAME);
    Ok(fallback)
}

pub(crate) fn log_path(config_path: &Path) -> PathBuf {
    config_path.with_file_name(LOG_FILE_NAME)
}

pub(crate) struct FileStore {
    path: PathBuf,
    current: StoreFile,
}

impl FileStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            current: StoreFile::default(),
        }
    }

    pub(crate) fn open(path: PathBuf) -> Result<Self> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }
}

impl ConnectionStore for FileStore {
    fn load(&mut self) -> Result<()> {
        ensure_parent_dir(&self.path)?;
        if !self.path.exists() {
            let empty = StoreFile::default();
            write_store(&self.path, &empty)?;
            self.current = empty;
            return Ok(());
        }
        self.current = read_store(&self.path)?;
        Ok(())
    }

    fn save(&mut self, store: StoreFile) -> Result<()> {
        write_store(&self.path, &store)?;
        self.current = store;
        Ok(())
    }

    fn current(&self) -> &StoreFile {
        &self.current
    }
}

pub(crate) fn read_store(path: &Path) -> Result<StoreFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config file '{}'", path.display()))?;
    if content.trim().is_empty() {
        return Ok(StoreFile::default());
    }
    let store = serde_json::from_str(&content)
        .with_context(|| format!("parse config file '{}'", path.display()))?;
    Ok(store)
}

pub(crate) fn write_store(path: &Path, store: &StoreFile) -> Result<()> {
    ensure_parent_dir(path)?;
    let content = serde_json::to_string_pretty(store).context("serialize config")?;
    fs::write(path, content)
        .with_context(|| format!("write config file '{}'", path.display()))?;
    restrict_file(path)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }
    create_private_dir(parent)
        .with_context(|| format!("create config dir '{}'", parent.display()))
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(unix)]
fn restrict_file(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).context("restrict config file")
}

#[cfg(not(unix))]
fn restrict_file(_path: &Path) -> Result<()> {
    Ok(())
}

/// In-memory store for controller tests; `fail_saves` makes every save error.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub(crate) persisted: StoreFile,
    pub(crate) current: StoreFile,
    pub(crate) fail_saves: bool,
    pub(crate) fail_loads: bool,
    pub(crate) saves: usize,
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn with(connections: Vec<crate::model::Connection>) -> Self {
        let store = StoreFile { connections };
        Self {
            persisted: store.clone(),
            current: store,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl ConnectionStore for MemoryStore {
    fn load(&mut self) -> Result<()> {
        if self.fail_loads {
            anyhow::bail!("disk unavailable");
        }
        self.current = self.persisted.clone();
        Ok(())
    }

    fn save(&mut self, store: StoreFile) -> Result<()> {
        if self.fail_saves {
            anyhow::bail!("disk full");
        }
        self.saves += 1;
        self.persisted = store.clone();
        self.current = store;
        Ok(())
    }

    fn current(&self) -> &StoreFile {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Connection;

    #[test]
    fn load_creates_missing_file_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let store = FileStore::open(path.clone()).unwrap();
        assert!(store.current().connections.is_empty());
        assert!(path.exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"connections\": []"));
    }

    #[cfg(unix)]
    #[test]
    fn load_creates_private_directory_and_file() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("private").join(CONFIG_FILE_NAME);
        FileStore::open(path.clone()).unwrap();
        let dir_mode = fs::metadata(path.parent().unwrap()).unwrap().permissions().mode();
        let file_mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(dir_mode & 0o777, 0o700);
        assert_eq!(file_mode & 0o777, 0o600);
    }

    #[test]
    fn empty_file_loads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "").unwrap();
        let store = FileStore::open(path).unwrap();
        assert!(store.current().connections.is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        let err = FileStore::open(path).err().unwrap();
        assert!(format!("{err:#}").contains("parse config file"));
    }

    #[test]
    fn save_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut store = FileStore::open(path.clone()).unwrap();
        let mut next = store.current().clone();
        next.add_connection(Connection::new("Echo", "abc123", vec!["work".into()]));
        store.save(next).unwrap();

        let reopened = FileStore::open(path).unwrap();
        assert_eq!(reopened.current().connections.len(), 1);
        assert_eq!(reopened.current().connections[0].tags, vec!["work"]);
    }

    #[test]
    fn failed_save_keeps_current_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a dir").unwrap();
        let mut store = FileStore::new(blocker.join(CONFIG_FILE_NAME));
        let mut next = StoreFile::default();
        next.add_connection(Connection::new("Echo", "abc", vec![]));
        assert!(store.save(next).is_err());
        assert!(store.current().connections.is_empty());
    }

    #[test]
    fn config_path_prefers_override() {
        let path = PathBuf::from("/tmp/custom.json");
        assert_eq!(config_path(Some(path.clone())).unwrap(), path);
        let default = config_path(None).unwrap();
        assert!(default.ends_with(Path::new(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn log_path_sits_next_to_config() {
        let path = PathBuf::from("/home/u/.gsm/config.json");
        assert_eq!(log_path(&path), PathBuf::from("/home/u/.gsm/gsm.log"));
    }
}
