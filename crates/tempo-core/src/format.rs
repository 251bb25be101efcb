use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// Remaining time until a countdown target.
///
/// Never stored; always derived from `target - now`. Every field is zero
/// once the difference drops to zero or below.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct TimeLeft {
  pub days:    u64,
  pub hours:   u64,
  pub minutes: u64,
  pub seconds: u64
}

impl TimeLeft {
  pub const ZERO: TimeLeft = TimeLeft {
    days:    0,
    hours:   0,
    minutes: 0,
    seconds: 0
  };

  pub fn from_millis(ms: i64) -> Self {
    if ms <= 0 {
      return Self::ZERO;
    }

    Self {
      days:    (ms / MS_PER_DAY) as u64,
      hours:   ((ms / MS_PER_HOUR) % 24)
        as u64,
      minutes: ((ms / MS_PER_MINUTE) % 60)
        as u64,
      seconds: ((ms / MS_PER_SECOND) % 60)
        as u64
    }
  }

  pub fn is_zero(&self) -> bool {
    *self == Self::ZERO
  }

  pub fn digits(&self) -> CountdownDigits {
    CountdownDigits {
      days:    pad2(self.days),
      hours:   pad2(self.hours),
      minutes: pad2(self.minutes),
      seconds: pad2(self.seconds)
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct CountdownDigits {
  pub days:    String,
  pub hours:   String,
  pub minutes: String,
  pub seconds: String
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct StopwatchDigits {
  pub minutes:      String,
  pub seconds:      String,
  pub centiseconds: String
}

impl fmt::Display for StopwatchDigits {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "{}:{}.{}",
      self.minutes,
      self.seconds,
      self.centiseconds
    )
  }
}

pub fn pad2(value: u64) -> String {
  format!("{value:02}")
}

pub fn format_countdown(
  ms: i64
) -> CountdownDigits {
  TimeLeft::from_millis(ms).digits()
}

/// Minutes are not wrapped into hours; a stopwatch left running for two
/// hours reads `120:00.00`.
pub fn format_stopwatch(
  ms: u64
) -> StopwatchDigits {
  let minutes = ms / 60_000;
  let seconds = (ms % 60_000) / 1_000;
  let centiseconds = (ms % 1_000) / 10;

  StopwatchDigits {
    minutes:      pad2(minutes),
    seconds:      pad2(seconds),
    centiseconds: pad2(centiseconds)
  }
}
