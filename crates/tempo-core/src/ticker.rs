use tracing::trace;

/// A live periodic callback.
///
/// `stop` consumes the handle so a callback can be cancelled at most once.
pub trait TickHandle {
  fn stop(self);
}

/// Owner-side slot holding at most one live tick handle.
///
/// The owner calls `sync` after every command that can change the running
/// state and `stop` during teardown. Engines never see the handle.
#[derive(Debug)]
pub struct TickSlot<H: TickHandle> {
  handle: Option<H>,
  label:  &'static str
}

impl<H: TickHandle> TickSlot<H> {
  pub fn new(
    label: &'static str
  ) -> Self {
    Self {
      handle: None,
      label
    }
  }

  pub fn is_armed(&self) -> bool {
    self.handle.is_some()
  }

  /// Arms a handle when `running` and none is live; stops the live handle
  /// when not running. Returns whether the slot changed.
  pub fn sync<F>(
    &mut self,
    running: bool,
    arm: F
  ) -> bool
  where
    F: FnOnce() -> H
  {
    match (running, self.handle.is_some())
    {
      | (true, false) => {
        trace!(ticker = self.label, "arming tick handle");
        self.handle = Some(arm());
        true
      }
      | (false, true) => self.stop(),
      | _ => false
    }
  }

  pub fn stop(&mut self) -> bool {
    match self.handle.take() {
      | Some(handle) => {
        trace!(ticker = self.label, "stopping tick handle");
        handle.stop();
        true
      }
      | None => false
    }
  }
}

impl<H: TickHandle> Drop for TickSlot<H> {
  fn drop(&mut self) {
    self.stop();
  }
}
