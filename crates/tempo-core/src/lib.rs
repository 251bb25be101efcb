pub mod clock;
pub mod config;
pub mod countdown;
pub mod events;
pub mod format;
pub mod stopwatch;
pub mod store;
pub mod tabs;
pub mod ticker;
pub mod todo;

pub use config::SuiteConfig;
pub use countdown::Countdown;
pub use events::{
  CountdownEvent,
  Notice,
  NoticeLevel,
  TaskEvent,
  ValidationError
};
pub use stopwatch::{
  Lap,
  Stopwatch
};
pub use store::KeyValueStore;
pub use tabs::Tab;
pub use ticker::{
  TickHandle,
  TickSlot
};
pub use todo::{
  Category,
  Placement,
  Priority,
  Task,
  TaskList
};
