use chrono::{
  DateTime,
  FixedOffset,
  Timelike
};

use crate::config::HourCycle;
use crate::format::pad2;

/// Wall-clock reading for one render. Derived on every tick, never stored.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ClockFace {
  pub hours:      String,
  pub minutes:    String,
  pub seconds:    String,
  pub meridiem:   Option<&'static str>,
  pub date_label: String,
  pub timezone:   String,
  pub utc_offset: String
}

impl ClockFace {
  pub fn at(
    now: DateTime<FixedOffset>,
    tz_name: Option<&str>,
    cycle: HourCycle
  ) -> Self {
    let (hour, meridiem) = match cycle {
      | HourCycle::Twelve => {
        let meridiem = if now.hour() >= 12 {
          "PM"
        } else {
          "AM"
        };
        let hour = match now.hour() % 12 {
          | 0 => 12,
          | h => h
        };
        (hour, Some(meridiem))
      }
      | HourCycle::TwentyFour => {
        (now.hour(), None)
      }
    };

    Self {
      hours: pad2(u64::from(hour)),
      minutes: pad2(u64::from(now.minute())),
      seconds: pad2(u64::from(now.second())),
      meridiem,
      date_label: now
        .format("%A, %B %-d, %Y")
        .to_string(),
      timezone: timezone_label(tz_name),
      utc_offset: utc_offset_label(
        now.offset().local_minus_utc()
      )
    }
  }

  pub fn time_label(&self) -> String {
    let base = format!(
      "{}:{}:{}",
      self.hours, self.minutes, self.seconds
    );
    match self.meridiem {
      | Some(meridiem) => {
        format!("{base} {meridiem}")
      }
      | None => base
    }
  }
}

/// `America/New_York` reads as `New York`.
pub fn timezone_label(
  tz_name: Option<&str>
) -> String {
  tz_name
    .and_then(|name| name.rsplit('/').next())
    .map(|city| city.trim().replace('_', " "))
    .filter(|city| !city.is_empty())
    .unwrap_or_else(|| "Local".to_string())
}

pub fn utc_offset_label(
  offset_seconds: i32
) -> String {
  let sign = if offset_seconds < 0 {
    '-'
  } else {
    '+'
  };
  let total_minutes =
    offset_seconds.unsigned_abs() / 60;
  let hours = total_minutes / 60;
  let minutes = total_minutes % 60;

  if minutes == 0 {
    format!("UTC{sign}{hours}")
  } else {
    format!("UTC{sign}{hours}:{minutes:02}")
  }
}
