/// Top-level panels. The active tab lives only in the view and is never
/// persisted.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub enum Tab {
  #[default]
  Countdown,
  Todo,
  Stopwatch,
  Clock
}

impl Tab {
  pub const ALL: [Tab; 4] = [
    Tab::Countdown,
    Tab::Todo,
    Tab::Stopwatch,
    Tab::Clock
  ];

  pub fn key(self) -> &'static str {
    match self {
      | Tab::Countdown => "countdown",
      | Tab::Todo => "todo",
      | Tab::Stopwatch => "stopwatch",
      | Tab::Clock => "clock"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Tab::Countdown => "Countdown",
      | Tab::Todo => "To-Do",
      | Tab::Stopwatch => "Stopwatch",
      | Tab::Clock => "Clock"
    }
  }

  /// Unknown keys fall back to the countdown.
  pub fn from_key(value: &str) -> Self {
    Self::ALL
      .into_iter()
      .find(|tab| tab.key() == value.trim())
      .unwrap_or_default()
  }
}
