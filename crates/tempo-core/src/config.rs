use serde::Deserialize;
use tracing::{
  debug,
  error,
  info
};

use crate::todo::{
  Category,
  Priority
};

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct SuiteConfig {
  #[serde(default = "default_version")]
  pub version:   u32,
  #[serde(default)]
  pub countdown: CountdownConfig,
  #[serde(default)]
  pub stopwatch: StopwatchConfig,
  #[serde(default)]
  pub clock:     ClockConfig,
  #[serde(default)]
  pub tasks:     TasksConfig,
  #[serde(default)]
  pub notices:   NoticesConfig
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct CountdownConfig {
  #[serde(default = "default_second_tick")]
  pub tick_ms:            u32,
  #[serde(
    default = "default_finished_notice_ms"
  )]
  pub finished_notice_ms: u32
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct StopwatchConfig {
  #[serde(
    default = "default_stopwatch_tick"
  )]
  pub tick_ms: u32,
  #[serde(
    default = "default_stopwatch_tick"
  )]
  pub step_ms: u32
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Deserialize,
)]
pub enum HourCycle {
  #[serde(rename = "12")]
  Twelve,
  #[serde(rename = "24")]
  TwentyFour
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct ClockConfig {
  #[serde(default = "default_second_tick")]
  pub tick_ms:    u32,
  #[serde(default = "default_hour_cycle")]
  pub hour_cycle: HourCycle
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct TasksConfig {
  #[serde(default)]
  pub default_priority: Priority,
  #[serde(default)]
  pub default_category: Category
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct NoticesConfig {
  #[serde(
    default = "default_notice_duration"
  )]
  pub duration_ms: u32
}

fn default_version() -> u32 {
  1
}

fn default_second_tick() -> u32 {
  1_000
}

fn default_stopwatch_tick() -> u32 {
  10
}

fn default_finished_notice_ms() -> u32 {
  5_000
}

fn default_notice_duration() -> u32 {
  3_000
}

fn default_hour_cycle() -> HourCycle {
  HourCycle::Twelve
}

impl Default for CountdownConfig {
  fn default() -> Self {
    Self {
      tick_ms:            default_second_tick(),
      finished_notice_ms:
        default_finished_notice_ms()
    }
  }
}

impl Default for StopwatchConfig {
  fn default() -> Self {
    Self {
      tick_ms: default_stopwatch_tick(),
      step_ms: default_stopwatch_tick()
    }
  }
}

impl Default for ClockConfig {
  fn default() -> Self {
    Self {
      tick_ms:    default_second_tick(),
      hour_cycle: default_hour_cycle()
    }
  }
}

impl Default for TasksConfig {
  fn default() -> Self {
    Self {
      default_priority: Priority::Medium,
      default_category: Category::Other
    }
  }
}

impl Default for NoticesConfig {
  fn default() -> Self {
    Self {
      duration_ms: default_notice_duration()
    }
  }
}

impl Default for SuiteConfig {
  fn default() -> Self {
    Self {
      version:   default_version(),
      countdown: CountdownConfig::default(),
      stopwatch: StopwatchConfig::default(),
      clock:     ClockConfig::default(),
      tasks:     TasksConfig::default(),
      notices:   NoticesConfig::default()
    }
  }
}

impl SuiteConfig {
  /// Parses and sanitises a TOML document, falling back to defaults when it
  /// does not parse.
  pub fn from_toml_str(raw: &str) -> Self {
    match toml::from_str::<SuiteConfig>(raw)
    {
      | Ok(mut config) => {
        config.sanitize();
        info!(
          version = config.version,
          countdown_tick_ms =
            config.countdown.tick_ms,
          stopwatch_tick_ms =
            config.stopwatch.tick_ms,
          "loaded suite config"
        );
        config
      }
      | Err(error) => {
        error!(%error, "failed parsing suite config; using defaults");
        SuiteConfig::default()
      }
    }
  }

  pub fn sanitize(&mut self) {
    if self.countdown.tick_ms == 0 {
      self.countdown.tick_ms =
        default_second_tick();
    }
    if self.countdown.finished_notice_ms
      == 0
    {
      self.countdown.finished_notice_ms =
        default_finished_notice_ms();
    }

    if self.stopwatch.tick_ms == 0 {
      self.stopwatch.tick_ms =
        default_stopwatch_tick();
    }
    self.stopwatch.step_ms =
      self.stopwatch.step_ms.max(1);

    if self.clock.tick_ms == 0 {
      self.clock.tick_ms =
        default_second_tick();
    }

    if self.notices.duration_ms == 0 {
      self.notices.duration_ms =
        default_notice_duration();
    }

    debug!(config = ?self, "sanitized suite config");
  }
}
