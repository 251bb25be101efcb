use chrono::NaiveDateTime;
use tracing::{
  debug,
  info,
  warn
};

use crate::events::{
  CountdownEvent,
  ValidationError
};
use crate::format::TimeLeft;
use crate::store::{
  self,
  KeyValueStore,
  keys
};

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const INPUT_FORMAT_SECONDS: &str =
  "%Y-%m-%dT%H:%M:%S";

/// Parses the value of a `datetime-local` input.
pub fn parse_target_input(
  raw: &str
) -> Option<NaiveDateTime> {
  let trimmed = raw.trim();
  NaiveDateTime::parse_from_str(
    trimmed,
    INPUT_FORMAT
  )
  .or_else(|_| {
    NaiveDateTime::parse_from_str(
      trimmed,
      INPUT_FORMAT_SECONDS
    )
  })
  .ok()
}

pub fn format_target_input(
  target: NaiveDateTime
) -> String {
  use chrono::Timelike;

  if target.second() == 0 {
    target.format(INPUT_FORMAT).to_string()
  } else {
    target
      .format(INPUT_FORMAT_SECONDS)
      .to_string()
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CountdownStatus {
  Idle,
  Running,
  Finished
}

/// Countdown to a local wall-clock target.
///
/// Only the target is persisted. `running` and `finished` belong to the
/// session and start false on every load.
#[derive(Debug, Clone)]
pub struct Countdown<S: KeyValueStore> {
  target:    Option<NaiveDateTime>,
  running:   bool,
  finished:  bool,
  time_left: TimeLeft,
  store:     S
}

impl<S: KeyValueStore> Countdown<S> {
  pub fn load(
    store: S,
    now: NaiveDateTime
  ) -> Self {
    let target = store::load_raw(
      &store,
      keys::COUNTDOWN_TARGET
    )
    .and_then(|raw| {
      let parsed = parse_target_input(&raw);
      if parsed.is_none() {
        warn!(
          raw = %raw,
          "ignoring unparsable countdown target"
        );
      }
      parsed
    });

    info!(target = ?target, "loaded countdown");

    let mut countdown = Self {
      target,
      running: false,
      finished: false,
      time_left: TimeLeft::ZERO,
      store
    };
    countdown.time_left =
      countdown.remaining_at(now);
    countdown
  }

  pub fn target(
    &self
  ) -> Option<NaiveDateTime> {
    self.target
  }

  pub fn target_input(&self) -> String {
    self
      .target
      .map(format_target_input)
      .unwrap_or_default()
  }

  pub fn is_running(&self) -> bool {
    self.running
  }

  pub fn is_finished(&self) -> bool {
    self.finished
  }

  pub fn status(&self) -> CountdownStatus {
    if self.finished {
      CountdownStatus::Finished
    } else if self.running {
      CountdownStatus::Running
    } else {
      CountdownStatus::Idle
    }
  }

  /// The value computed by the last `set_target` or `tick`.
  pub fn time_left(&self) -> TimeLeft {
    self.time_left
  }

  pub fn remaining_millis(
    &self,
    now: NaiveDateTime
  ) -> i64 {
    self
      .target
      .map(|target| {
        (target - now)
          .num_milliseconds()
          .max(0)
      })
      .unwrap_or(0)
  }

  pub fn remaining_at(
    &self,
    now: NaiveDateTime
  ) -> TimeLeft {
    TimeLeft::from_millis(
      self.remaining_millis(now)
    )
  }

  /// Replaces the target and re-arms the finished notification. A running
  /// countdown keeps running against the new target.
  #[tracing::instrument(skip(self))]
  pub fn set_target(
    &mut self,
    target: NaiveDateTime,
    now: NaiveDateTime
  ) {
    self.target = Some(target);
    self.finished = false;
    self.time_left = self.remaining_at(now);
    store::save_raw(
      &self.store,
      keys::COUNTDOWN_TARGET,
      &format_target_input(target)
    );
    debug!(time_left = ?self.time_left, "countdown target set");
  }

  /// An empty input clears the target for this session only. The stored
  /// target is removed by `reset` alone.
  pub fn set_target_input(
    &mut self,
    raw: &str,
    now: NaiveDateTime
  ) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
      self.clear_session_target();
      return Ok(());
    }

    let target = parse_target_input(raw)
      .ok_or_else(|| {
        ValidationError::InvalidTarget(
          raw.trim().to_string()
        )
      })?;
    self.set_target(target, now);
    Ok(())
  }

  pub fn start(
    &mut self
  ) -> Result<(), ValidationError> {
    if self.target.is_none() {
      return Err(
        ValidationError::MissingTarget
      );
    }
    self.running = true;
    debug!("countdown started");
    Ok(())
  }

  pub fn pause(&mut self) {
    self.running = false;
    debug!("countdown paused");
  }

  fn clear_session_target(&mut self) {
    self.running = false;
    self.finished = false;
    self.target = None;
    self.time_left = TimeLeft::ZERO;
    debug!("countdown target cleared");
  }

  #[tracing::instrument(skip(self))]
  pub fn reset(&mut self) {
    self.clear_session_target();
    store::remove_key(
      &self.store,
      keys::COUNTDOWN_TARGET
    );
    debug!("countdown reset");
  }

  /// Recomputes the remaining time. Returns the finished event on the tick
  /// where the remaining time first reaches zero for the current target.
  pub fn tick(
    &mut self,
    now: NaiveDateTime
  ) -> Option<CountdownEvent> {
    if !self.running || self.target.is_none()
    {
      return None;
    }

    self.time_left = self.remaining_at(now);
    if !self.time_left.is_zero() {
      return None;
    }

    self.running = false;
    if self.finished {
      return None;
    }

    self.finished = true;
    info!("countdown finished");
    Some(CountdownEvent::Finished)
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    Duration,
    NaiveDate,
    NaiveDateTime
  };

  use super::{
    Countdown,
    CountdownStatus,
    format_target_input,
    parse_target_input
  };
  use crate::events::{
    CountdownEvent,
    ValidationError
  };
  use crate::format::TimeLeft;
  use crate::store::{
    KeyValueStore,
    MemoryStore
  };

  fn at(
    hour: u32,
    minute: u32,
    second: u32
  ) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
      .and_then(|d| {
        d.and_hms_opt(hour, minute, second)
      })
      .expect("valid datetime")
  }

  #[test]
  fn parses_datetime_local_values() {
    assert_eq!(
      parse_target_input("2026-10-17T09:30"),
      Some(at(9, 30, 0))
    );
    assert_eq!(
      parse_target_input(
        "2026-10-17T09:30:15"
      ),
      Some(at(9, 30, 15))
    );
    assert_eq!(
      parse_target_input("tomorrow"),
      None
    );
    assert_eq!(
      format_target_input(at(9, 30, 0)),
      "2026-10-17T09:30"
    );
  }

  #[test]
  fn past_target_clamps_to_zero() {
    let mut countdown = Countdown::load(
      MemoryStore::new(),
      at(12, 0, 0)
    );
    countdown
      .set_target(at(11, 0, 0), at(12, 0, 0));
    assert_eq!(
      countdown.time_left(),
      TimeLeft::ZERO
    );
    assert_eq!(
      countdown
        .remaining_millis(at(13, 0, 0)),
      0
    );
  }

  #[test]
  fn start_without_target_is_rejected() {
    let mut countdown = Countdown::load(
      MemoryStore::new(),
      at(12, 0, 0)
    );
    assert_eq!(
      countdown.start(),
      Err(ValidationError::MissingTarget)
    );
    assert!(!countdown.is_running());
  }

  #[test]
  fn set_target_computes_display_without_starting()
  {
    let store = MemoryStore::new();
    let mut countdown =
      Countdown::load(store.clone(), at(12, 0, 0));
    countdown
      .set_target(at(13, 2, 3), at(12, 0, 0));

    assert!(!countdown.is_running());
    assert_eq!(
      countdown.time_left(),
      TimeLeft {
        days:    0,
        hours:   1,
        minutes: 2,
        seconds: 3
      }
    );
    assert_eq!(
      store
        .get("countdown-target")
        .expect("get"),
      Some("2026-10-17T13:02:03".to_string())
    );
  }

  #[test]
  fn finishes_exactly_once_after_ninety_ticks() {
    let start = at(12, 0, 0);
    let mut countdown =
      Countdown::load(MemoryStore::new(), start);
    countdown.set_target(
      start + Duration::seconds(90),
      start
    );
    countdown.start().expect("start");

    let mut events = Vec::new();
    for second in 1..=120 {
      if let Some(event) = countdown.tick(
        start + Duration::seconds(second)
      ) {
        events.push((second, event));
      }
    }

    assert_eq!(
      events,
      vec![(90, CountdownEvent::Finished)]
    );
    assert_eq!(
      countdown.status(),
      CountdownStatus::Finished
    );
    assert!(!countdown.is_running());
  }

  #[test]
  fn restarting_an_expired_target_does_not_refire() {
    let start = at(12, 0, 0);
    let mut countdown =
      Countdown::load(MemoryStore::new(), start);
    countdown.set_target(start, start);
    countdown.start().expect("start");
    assert_eq!(
      countdown.tick(start),
      Some(CountdownEvent::Finished)
    );

    countdown.start().expect("restart");
    assert_eq!(countdown.tick(start), None);
    assert!(!countdown.is_running());

    countdown.set_target(
      start + Duration::seconds(1),
      start
    );
    assert!(!countdown.is_finished());
    countdown.start().expect("start again");
    assert_eq!(
      countdown
        .tick(start + Duration::seconds(1)),
      Some(CountdownEvent::Finished)
    );
  }

  #[test]
  fn paused_countdown_does_not_tick() {
    let start = at(12, 0, 0);
    let mut countdown =
      Countdown::load(MemoryStore::new(), start);
    countdown.set_target(
      start + Duration::seconds(5),
      start
    );
    countdown.start().expect("start");
    countdown.pause();
    assert_eq!(
      countdown
        .tick(start + Duration::seconds(10)),
      None
    );
    assert_eq!(countdown.time_left().seconds, 5);
  }

  #[test]
  fn reload_keeps_target_but_not_session_flags() {
    let store = MemoryStore::new();
    let start = at(12, 0, 0);
    let mut countdown =
      Countdown::load(store.clone(), start);
    countdown
      .set_target(at(12, 1, 0), start);
    countdown.start().expect("start");

    let reloaded =
      Countdown::load(store.clone(), start);
    assert_eq!(reloaded.target(), Some(at(12, 1, 0)));
    assert!(!reloaded.is_running());
    assert_eq!(reloaded.time_left().minutes, 1);

    store
      .set("countdown-target", "garbage")
      .expect("set");
    let broken = Countdown::load(store, start);
    assert_eq!(broken.target(), None);
  }

  #[test]
  fn empty_input_clears_session_and_invalid_input_is_rejected()
  {
    let store = MemoryStore::new();
    let start = at(12, 0, 0);
    let mut countdown =
      Countdown::load(store.clone(), start);
    countdown
      .set_target_input("2026-10-17T12:30", start)
      .expect("valid input");
    assert_eq!(
      countdown.target_input(),
      "2026-10-17T12:30"
    );

    assert_eq!(
      countdown
        .set_target_input("12:30 pm", start),
      Err(ValidationError::InvalidTarget(
        "12:30 pm".to_string()
      ))
    );
    assert_eq!(countdown.target(), Some(at(12, 30, 0)));

    countdown.start().expect("start");
    countdown
      .set_target_input("", start)
      .expect("clear");
    assert_eq!(countdown.target(), None);
    assert!(!countdown.is_running());
    assert_eq!(countdown.time_left(), TimeLeft::ZERO);
    assert_eq!(
      store
        .get("countdown-target")
        .expect("get")
        .as_deref(),
      Some("2026-10-17T12:30")
    );

    let reloaded =
      Countdown::load(store.clone(), start);
    assert_eq!(reloaded.target(), Some(at(12, 30, 0)));

    countdown.reset();
    assert_eq!(
      store
        .get("countdown-target")
        .expect("get"),
      None
    );
  }
}
