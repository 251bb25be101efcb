use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};

use crate::store::{
  self,
  KeyValueStore,
  keys
};

/// Immutable snapshot taken by `Stopwatch::lap`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct Lap {
  /// Capture time in epoch millis; strictly increasing across laps.
  pub id:   i64,
  /// Elapsed millis at capture.
  pub time: u64,
  /// `time` minus the previous lap's `time`.
  pub diff: u64
}

/// Elapsed-time accumulator with newest-first laps.
///
/// Elapsed time and laps persist; a loaded stopwatch is always paused.
#[derive(Debug, Clone)]
pub struct Stopwatch<S: KeyValueStore> {
  elapsed_ms: u64,
  running:    bool,
  laps:       Vec<Lap>,
  step_ms:    u64,
  store:      S
}

impl<S: KeyValueStore> Stopwatch<S> {
  pub fn load(
    store: S,
    step_ms: u32
  ) -> Self {
    let elapsed_ms = store::load_raw(
      &store,
      keys::STOPWATCH_TIME
    )
    .and_then(|raw| {
      match raw.trim().parse::<u64>() {
        | Ok(value) => Some(value),
        | Err(err) => {
          warn!(
            error = %err,
            raw = %raw,
            "ignoring unparsable stopwatch time"
          );
          None
        }
      }
    })
    .unwrap_or(0);

    let laps = store::load_json::<Vec<Lap>, _>(
      &store,
      keys::STOPWATCH_LAPS
    )
    .unwrap_or_default();

    info!(
      elapsed_ms,
      laps = laps.len(),
      "loaded stopwatch"
    );

    Self {
      elapsed_ms,
      running: false,
      laps,
      step_ms: u64::from(step_ms.max(1)),
      store
    }
  }

  pub fn elapsed_ms(&self) -> u64 {
    self.elapsed_ms
  }

  pub fn is_running(&self) -> bool {
    self.running
  }

  pub fn laps(&self) -> &[Lap] {
    &self.laps
  }

  /// Display number for the lap at `index` in newest-first order; the first
  /// lap ever taken is number 1.
  pub fn lap_number(
    &self,
    index: usize
  ) -> usize {
    self.laps.len().saturating_sub(index)
  }

  pub fn can_lap(&self) -> bool {
    self.running || self.elapsed_ms > 0
  }

  pub fn fastest_lap(&self) -> Option<&Lap> {
    if self.laps.len() < 2 {
      return None;
    }
    self.laps.iter().min_by_key(|lap| lap.diff)
  }

  pub fn slowest_lap(&self) -> Option<&Lap> {
    if self.laps.len() < 2 {
      return None;
    }
    self.laps.iter().max_by_key(|lap| lap.diff)
  }

  pub fn start(&mut self) {
    self.running = true;
    debug!(elapsed_ms = self.elapsed_ms, "stopwatch started");
  }

  pub fn pause(&mut self) {
    self.running = false;
    self.persist_time();
    debug!(elapsed_ms = self.elapsed_ms, "stopwatch paused");
  }

  /// Adds one step while running.
  pub fn tick(&mut self) {
    if !self.running {
      return;
    }
    self.elapsed_ms =
      self.elapsed_ms.saturating_add(self.step_ms);
    self.persist_time();
  }

  #[tracing::instrument(skip(self))]
  pub fn reset(&mut self) {
    self.running = false;
    self.elapsed_ms = 0;
    self.laps.clear();
    store::remove_key(
      &self.store,
      keys::STOPWATCH_TIME
    );
    store::remove_key(
      &self.store,
      keys::STOPWATCH_LAPS
    );
    debug!("stopwatch reset");
  }

  /// Records a lap unless the stopwatch is paused at zero.
  pub fn lap(
    &mut self,
    now_ms: i64
  ) -> Option<Lap> {
    if !self.can_lap() {
      return None;
    }

    let previous = self.laps.first();
    let id = match previous {
      | Some(prev) if now_ms <= prev.id => {
        prev.id.checked_add(1).unwrap_or_else(|| {
          warn!(
            previous = prev.id,
            "stored lap id is at the limit; using the clock"
          );
          now_ms
        })
      }
      | _ => now_ms
    };
    let diff = previous
      .map(|prev| {
        self.elapsed_ms.saturating_sub(prev.time)
      })
      .unwrap_or(self.elapsed_ms);

    let lap = Lap {
      id,
      time: self.elapsed_ms,
      diff
    };
    self.laps.insert(0, lap);
    store::save_json(
      &self.store,
      keys::STOPWATCH_LAPS,
      &self.laps
    );
    debug!(
      number = self.laps.len(),
      time = lap.time,
      diff = lap.diff,
      "lap recorded"
    );
    Some(lap)
  }

  fn persist_time(&self) {
    store::save_raw(
      &self.store,
      keys::STOPWATCH_TIME,
      &self.elapsed_ms.to_string()
    );
  }
}

#[cfg(test)]
mod tests {
  use super::{
    Lap,
    Stopwatch
  };
  use crate::store::{
    KeyValueStore,
    MemoryStore
  };

  fn run_for(
    watch: &mut Stopwatch<MemoryStore>,
    ms: u64
  ) {
    for _ in 0..ms / 10 {
      watch.tick();
    }
  }

  #[test]
  fn ticks_only_while_running() {
    let mut watch =
      Stopwatch::load(MemoryStore::new(), 10);
    watch.tick();
    assert_eq!(watch.elapsed_ms(), 0);

    watch.start();
    run_for(&mut watch, 250);
    assert_eq!(watch.elapsed_ms(), 250);

    watch.pause();
    run_for(&mut watch, 100);
    assert_eq!(watch.elapsed_ms(), 250);
  }

  #[test]
  fn laps_are_newest_first_with_deltas() {
    let mut watch =
      Stopwatch::load(MemoryStore::new(), 10);
    assert_eq!(watch.lap(1), None);

    watch.start();
    run_for(&mut watch, 250);
    watch.lap(1_000).expect("first lap");
    run_for(&mut watch, 450);
    watch.lap(1_450).expect("second lap");

    let summary: Vec<(u64, u64)> = watch
      .laps()
      .iter()
      .map(|lap| (lap.time, lap.diff))
      .collect();
    assert_eq!(
      summary,
      vec![(700, 450), (250, 250)]
    );
    assert_eq!(watch.lap_number(0), 2);
    assert_eq!(watch.lap_number(1), 1);
    assert_eq!(
      watch.fastest_lap().map(|l| l.time),
      Some(250)
    );
    assert_eq!(
      watch.slowest_lap().map(|l| l.time),
      Some(700)
    );
  }

  #[test]
  fn lap_ids_strictly_increase() {
    let mut watch =
      Stopwatch::load(MemoryStore::new(), 10);
    watch.start();
    let first = watch.lap(5).expect("lap");
    let second = watch.lap(5).expect("lap");
    let third = watch.lap(3).expect("lap");
    assert!(first.id < second.id);
    assert!(second.id < third.id);
  }

  #[test]
  fn lap_after_stored_id_at_limit_does_not_overflow() {
    let store = MemoryStore::new();
    store
      .set("stopwatch-time", "100")
      .expect("seed time");
    store
      .set(
        "stopwatch-laps",
        r#"[{"id":9223372036854775807,"time":50,"diff":50}]"#
      )
      .expect("seed laps");

    let mut watch = Stopwatch::load(store, 10);
    let lap = watch.lap(5).expect("lap");
    assert_eq!(lap.id, 5);
    assert_eq!(lap.time, 100);
    assert_eq!(lap.diff, 50);
    assert_eq!(watch.laps().len(), 2);
  }

  #[test]
  fn paused_with_elapsed_time_can_still_lap() {
    let mut watch =
      Stopwatch::load(MemoryStore::new(), 10);
    watch.start();
    watch.tick();
    watch.pause();
    assert!(watch.can_lap());
    assert_eq!(
      watch.lap(1),
      Some(Lap {
        id:   1,
        time: 10,
        diff: 10
      })
    );
  }

  #[test]
  fn reset_clears_memory_and_store() {
    let store = MemoryStore::new();
    let mut watch =
      Stopwatch::load(store.clone(), 10);
    watch.start();
    run_for(&mut watch, 30);
    watch.lap(1);
    assert_eq!(
      store.get("stopwatch-time").expect("get"),
      Some("30".to_string())
    );

    watch.reset();
    assert_eq!(watch.elapsed_ms(), 0);
    assert!(watch.laps().is_empty());
    assert!(!watch.is_running());
    assert!(store.is_empty());
  }

  #[test]
  fn reload_restores_paused_state() {
    let store = MemoryStore::new();
    let mut watch =
      Stopwatch::load(store.clone(), 10);
    watch.start();
    run_for(&mut watch, 120);
    watch.lap(7);

    let reloaded = Stopwatch::load(store, 10);
    assert!(!reloaded.is_running());
    assert_eq!(reloaded.elapsed_ms(), 120);
    assert_eq!(reloaded.laps().len(), 1);
  }

  #[test]
  fn corrupt_values_load_as_zero_and_empty() {
    let store = MemoryStore::new();
    store
      .set("stopwatch-time", "abc")
      .expect("set");
    store
      .set("stopwatch-laps", "[{")
      .expect("set");
    let watch = Stopwatch::load(store, 10);
    assert_eq!(watch.elapsed_ms(), 0);
    assert!(watch.laps().is_empty());
  }
}
