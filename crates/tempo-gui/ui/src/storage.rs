use anyhow::anyhow;
use tempo_core::KeyValueStore;

/// `window.localStorage`, looked up on every call.
#[derive(
  Debug, Clone, Copy, Default, PartialEq,
)]
pub struct LocalStorage;

fn local_storage()
-> anyhow::Result<web_sys::Storage> {
  web_sys::window()
    .ok_or_else(|| anyhow!("no window"))?
    .local_storage()
    .map_err(|err| {
      anyhow!(
        "local storage unavailable: {err:?}"
      )
    })?
    .ok_or_else(|| {
      anyhow!("local storage disabled")
    })
}

impl KeyValueStore for LocalStorage {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    local_storage()?
      .get_item(key)
      .map_err(|err| {
        anyhow!(
          "failed reading {key}: {err:?}"
        )
      })
  }

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    local_storage()?
      .set_item(key, value)
      .map_err(|err| {
        anyhow!(
          "failed writing {key}: {err:?}"
        )
      })
  }

  fn remove(
    &self,
    key: &str
  ) -> anyhow::Result<()> {
    local_storage()?
      .remove_item(key)
      .map_err(|err| {
        anyhow!(
          "failed removing {key}: {err:?}"
        )
      })
  }
}
