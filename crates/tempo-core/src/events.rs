use thiserror::Error;

/// Validation failures. State is left unchanged whenever one is returned.
#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum ValidationError {
  #[error("task text is empty")]
  EmptyTaskText,

  #[error("no countdown target set")]
  MissingTarget,

  #[error("invalid countdown target: {0}")]
  InvalidTarget(String)
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CountdownEvent {
  Finished
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum TaskEvent {
  Added { id: String },
  Updated { id: String },
  Completed { id: String },
  Deleted { id: String }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum NoticeLevel {
  Success,
  Error
}

/// A transient message for the toast surface.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct Notice {
  pub level:       NoticeLevel,
  pub title:       String,
  pub description: Option<String>,
  pub duration_ms: u32
}

impl Notice {
  pub fn success(
    title: &str,
    duration_ms: u32
  ) -> Self {
    Self {
      level: NoticeLevel::Success,
      title: title.to_string(),
      description: None,
      duration_ms
    }
  }

  pub fn error(
    title: &str,
    duration_ms: u32
  ) -> Self {
    Self {
      level: NoticeLevel::Error,
      title: title.to_string(),
      description: None,
      duration_ms
    }
  }

  pub fn with_description(
    mut self,
    description: &str
  ) -> Self {
    self.description =
      Some(description.to_string());
    self
  }

  pub fn for_countdown(
    event: CountdownEvent,
    duration_ms: u32
  ) -> Self {
    match event {
      | CountdownEvent::Finished => {
        Self::success(
          "Countdown Complete!",
          duration_ms
        )
        .with_description(
          "Your countdown has finished!"
        )
      }
    }
  }

  pub fn for_task(
    event: &TaskEvent,
    duration_ms: u32
  ) -> Self {
    let title = match event {
      | TaskEvent::Added { .. } => {
        "Task added successfully!"
      }
      | TaskEvent::Updated { .. } => {
        "Task updated!"
      }
      | TaskEvent::Completed { .. } => {
        "Task completed!"
      }
      | TaskEvent::Deleted { .. } => {
        "Task deleted!"
      }
    };
    Self::success(title, duration_ms)
  }

  /// Editing and adding share `EmptyTaskText`; `editing` picks the wording.
  pub fn for_validation(
    error: &ValidationError,
    editing: bool,
    duration_ms: u32
  ) -> Self {
    let title = match error {
      | ValidationError::EmptyTaskText
        if editing =>
      {
        "Task cannot be empty"
      }
      | ValidationError::EmptyTaskText => {
        "Please enter a task"
      }
      | ValidationError::MissingTarget => {
        "Please set a target date first"
      }
      | ValidationError::InvalidTarget(_) => {
        "Please pick a valid date and time"
      }
    };
    Self::error(title, duration_ms)
  }
}
