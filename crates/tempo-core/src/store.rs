use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{
  debug,
  error,
  warn
};

pub mod keys {
  pub const COUNTDOWN_TARGET: &str =
    "countdown-target";
  pub const STOPWATCH_TIME: &str =
    "stopwatch-time";
  pub const STOPWATCH_LAPS: &str =
    "stopwatch-laps";
  pub const TODOS: &str = "todos";
}

/// Synchronous string-keyed storage.
///
/// Every key is owned by exactly one engine, so implementations only need
/// each call to be atomic on its own.
pub trait KeyValueStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>>;

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;

  fn remove(
    &self,
    key: &str
  ) -> anyhow::Result<()>;
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  map: Rc<RefCell<BTreeMap<String, String>>>
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.map.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.map.borrow().is_empty()
  }
}

impl KeyValueStore for MemoryStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.map.borrow().get(key).cloned())
  }

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self.map.borrow_mut().insert(
      key.to_string(),
      value.to_string()
    );
    Ok(())
  }

  fn remove(
    &self,
    key: &str
  ) -> anyhow::Result<()> {
    self.map.borrow_mut().remove(key);
    Ok(())
  }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
  use std::cell::RefCell;
  use std::collections::BTreeMap;
  use std::fs;
  use std::io::Write;
  use std::path::{
    Path,
    PathBuf
  };

  use anyhow::{
    Context,
    anyhow
  };
  use tempfile::NamedTempFile;
  use tracing::{
    debug,
    error,
    info
  };

  use super::KeyValueStore;

  /// Store backed by a single JSON object file, rewritten atomically on
  /// every change.
  #[derive(Debug)]
  pub struct FileStore {
    pub data_dir: PathBuf,
    pub path:     PathBuf,
    map:          RefCell<BTreeMap<String, String>>
  }

  impl FileStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(
      data_dir: &Path
    ) -> anyhow::Result<Self> {
      let data_dir = data_dir.to_path_buf();
      fs::create_dir_all(&data_dir)
        .with_context(|| {
          format!(
            "failed to create {}",
            data_dir.display()
          )
        })?;

      let path = data_dir.join("storage.json");
      let map = if path.exists() {
        let raw = fs::read_to_string(&path)
          .with_context(|| {
            format!(
              "failed reading {}",
              path.display()
            )
          })?;
        if raw.trim().is_empty() {
          BTreeMap::new()
        } else {
          match serde_json::from_str::<
            BTreeMap<String, String>
          >(&raw)
          {
            | Ok(map) => map,
            | Err(err) => {
              error!(
                error = %err,
                file = %path.display(),
                "failed parsing storage file; starting empty"
              );
              BTreeMap::new()
            }
          }
        }
      } else {
        BTreeMap::new()
      };

      info!(
        data_dir = %data_dir.display(),
        keys = map.len(),
        "opened file store"
      );

      Ok(Self {
        data_dir,
        path,
        map: RefCell::new(map)
      })
    }

    /// Writes `map` to disk. The in-memory map is only replaced by callers
    /// once this succeeds.
    #[tracing::instrument(skip(self, map))]
    fn write(
      &self,
      map: &BTreeMap<String, String>
    ) -> anyhow::Result<()> {
      debug!(
        file = %self.path.display(),
        keys = map.len(),
        "saving storage file atomically"
      );

      let dir = self
        .path
        .parent()
        .unwrap_or_else(|| Path::new("."));
      let mut temp =
        NamedTempFile::new_in(dir)?;
      let serialized =
        serde_json::to_string_pretty(map)?;
      temp.write_all(serialized.as_bytes())?;
      temp.flush()?;

      temp.persist(&self.path).map_err(|err| {
        anyhow!(
          "failed to persist {}: {}",
          self.path.display(),
          err
        )
      })?;
      Ok(())
    }
  }

  impl KeyValueStore for FileStore {
    fn get(
      &self,
      key: &str
    ) -> anyhow::Result<Option<String>> {
      Ok(self.map.borrow().get(key).cloned())
    }

    fn set(
      &self,
      key: &str,
      value: &str
    ) -> anyhow::Result<()> {
      let mut next = self.map.borrow().clone();
      next.insert(
        key.to_string(),
        value.to_string()
      );
      self.write(&next).with_context(|| {
        format!("failed to save key {key}")
      })?;
      self.map.replace(next);
      Ok(())
    }

    fn remove(
      &self,
      key: &str
    ) -> anyhow::Result<()> {
      let mut next = self.map.borrow().clone();
      if next.remove(key).is_none() {
        return Ok(());
      }
      self.write(&next).with_context(|| {
        format!("failed to remove key {key}")
      })?;
      self.map.replace(next);
      Ok(())
    }
  }
}

/// Reads and decodes a JSON value. Missing keys, read failures and corrupt
/// content all yield `None`.
pub fn load_json<T, S>(
  store: &S,
  key: &str
) -> Option<T>
where
  T: DeserializeOwned,
  S: KeyValueStore + ?Sized
{
  let raw = load_raw(store, key)?;
  match serde_json::from_str::<T>(&raw) {
    | Ok(value) => Some(value),
    | Err(err) => {
      error!(
        error = %err,
        key,
        "failed parsing stored value; using default"
      );
      None
    }
  }
}

pub fn load_raw<S>(
  store: &S,
  key: &str
) -> Option<String>
where
  S: KeyValueStore + ?Sized
{
  match store.get(key) {
    | Ok(value) => value,
    | Err(err) => {
      error!(
        error = %err,
        key,
        "failed reading from store"
      );
      None
    }
  }
}

pub fn save_json<T, S>(
  store: &S,
  key: &str,
  value: &T
) where
  T: Serialize + ?Sized,
  S: KeyValueStore + ?Sized
{
  match serde_json::to_string(value) {
    | Ok(json) => save_raw(store, key, &json),
    | Err(err) => {
      warn!(
        error = %err,
        key,
        "failed encoding value for store"
      );
    }
  }
}

pub fn save_raw<S>(
  store: &S,
  key: &str,
  value: &str
) where
  S: KeyValueStore + ?Sized
{
  if let Err(err) = store.set(key, value)
  {
    warn!(
      error = %err,
      key,
      "failed writing to store"
    );
  } else {
    debug!(key, bytes = value.len(), "persisted");
  }
}

pub fn remove_key<S>(
  store: &S,
  key: &str
) where
  S: KeyValueStore + ?Sized
{
  if let Err(err) = store.remove(key) {
    warn!(
      error = %err,
      key,
      "failed removing from store"
    );
  }
}
