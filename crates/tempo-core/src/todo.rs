use std::collections::BTreeSet;
use std::fmt;

use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};
use uuid::Uuid;

use crate::events::{
  TaskEvent,
  ValidationError
};
use crate::store::{
  self,
  KeyValueStore,
  keys
};

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  High,
  #[default]
  Medium,
  Low
}

impl Priority {
  pub const ALL: [Priority; 3] = [
    Priority::High,
    Priority::Medium,
    Priority::Low
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | Priority::High => "high",
      | Priority::Medium => "medium",
      | Priority::Low => "low"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Priority::High => "High",
      | Priority::Medium => "Medium",
      | Priority::Low => "Low"
    }
  }

  pub fn from_key(
    value: &str
  ) -> Option<Self> {
    Self::ALL.into_iter().find(|p| {
      p.as_key().eq_ignore_ascii_case(
        value.trim()
      )
    })
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Work,
  Personal,
  Shopping,
  Health,
  #[default]
  Other
}

impl Category {
  pub const ALL: [Category; 5] = [
    Category::Work,
    Category::Personal,
    Category::Shopping,
    Category::Health,
    Category::Other
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | Category::Work => "work",
      | Category::Personal => "personal",
      | Category::Shopping => "shopping",
      | Category::Health => "health",
      | Category::Other => "other"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Category::Work => "Work",
      | Category::Personal => "Personal",
      | Category::Shopping => "Shopping",
      | Category::Health => "Health",
      | Category::Other => "Other"
    }
  }

  pub fn from_key(
    value: &str
  ) -> Option<Self> {
    Self::ALL.into_iter().find(|c| {
      c.as_key().eq_ignore_ascii_case(
        value.trim()
      )
    })
  }
}

impl fmt::Display for Priority {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_key())
  }
}

impl fmt::Display for Category {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_key())
  }
}

/// One task record. Records written before priorities and categories
/// existed load with `medium`/`other`.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub id:         String,
  pub text:       String,
  pub completed:  bool,
  pub created_at: i64,
  #[serde(default)]
  pub priority:   Priority,
  #[serde(default)]
  pub category:   Category
}

impl Task {
  pub fn new(
    text: &str,
    priority: Priority,
    category: Category,
    now_ms: i64
  ) -> Result<Self, ValidationError> {
    let text = normalized_text(text)?;
    Ok(Self {
      id: Uuid::new_v4().to_string(),
      text,
      completed: false,
      created_at: now_ms,
      priority,
      category
    })
  }
}

/// Where `reorder` should put a task.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum Placement {
  Before(String),
  After(String),
  Index(usize)
}

/// Moves `items[from]` to `to`, shifting the items in between. Out of range
/// indices leave the slice untouched.
pub fn move_to<T>(
  items: &mut [T],
  from: usize,
  to: usize
) -> bool {
  if from >= items.len()
    || to >= items.len()
    || from == to
  {
    return false;
  }

  if from < to {
    items[from..=to].rotate_left(1);
  } else {
    items[to..=from].rotate_right(1);
  }
  true
}

/// Ordered task collection persisted as a whole under `todos`.
#[derive(Debug, Clone)]
pub struct TaskList<S: KeyValueStore> {
  tasks:          Vec<Task>,
  pending_delete: Option<String>,
  store:          S
}

impl<S: KeyValueStore> TaskList<S> {
  pub fn load(store: S) -> Self {
    let stored =
      store::load_json::<Vec<Task>, _>(
        &store,
        keys::TODOS
      )
      .unwrap_or_default();

    let before = stored.len();
    let mut seen = BTreeSet::new();
    let tasks: Vec<Task> = stored
      .into_iter()
      .filter(|task| {
        !task.text.trim().is_empty()
          && seen.insert(task.id.clone())
      })
      .collect();

    if tasks.len() != before {
      warn!(
        before,
        after = tasks.len(),
        "dropped blank or duplicate tasks on load"
      );
    }
    info!(count = tasks.len(), "loaded tasks");

    Self {
      tasks,
      pending_delete: None,
      store
    }
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  pub fn get(
    &self,
    id: &str
  ) -> Option<&Task> {
    self.tasks.iter().find(|t| t.id == id)
  }

  pub fn position(
    &self,
    id: &str
  ) -> Option<usize> {
    self
      .tasks
      .iter()
      .position(|t| t.id == id)
  }

  pub fn completed_count(&self) -> usize {
    self
      .tasks
      .iter()
      .filter(|t| t.completed)
      .count()
  }

  pub fn summary(&self) -> String {
    format!(
      "{} of {} completed",
      self.completed_count(),
      self.len()
    )
  }

  #[tracing::instrument(skip(self, text))]
  pub fn add(
    &mut self,
    text: &str,
    priority: Priority,
    category: Category,
    now_ms: i64
  ) -> Result<TaskEvent, ValidationError> {
    let task =
      Task::new(text, priority, category, now_ms)?;
    let id = task.id.clone();
    self.tasks.insert(0, task);
    self.persist();
    debug!(%id, count = self.tasks.len(), "added task");
    Ok(TaskEvent::Added { id })
  }

  /// Flips completion. Only the false to true edge produces an event.
  pub fn toggle_complete(
    &mut self,
    id: &str
  ) -> Option<TaskEvent> {
    let task = self
      .tasks
      .iter_mut()
      .find(|t| t.id == id)?;
    task.completed = !task.completed;
    let completed = task.completed;
    self.persist();
    debug!(id, completed, "toggled task");

    completed.then(|| TaskEvent::Completed {
      id: id.to_string()
    })
  }

  /// Returns `Ok(None)` when no task has `id`.
  #[tracing::instrument(skip(self, text))]
  pub fn edit(
    &mut self,
    id: &str,
    text: &str,
    priority: Priority,
    category: Category
  ) -> Result<Option<TaskEvent>, ValidationError>
  {
    let text = normalized_text(text)?;
    let Some(task) = self
      .tasks
      .iter_mut()
      .find(|t| t.id == id)
    else {
      return Ok(None);
    };

    task.text = text;
    task.priority = priority;
    task.category = category;
    self.persist();
    debug!(id, "edited task");
    Ok(Some(TaskEvent::Updated {
      id: id.to_string()
    }))
  }

  pub fn pending_delete(
    &self
  ) -> Option<&Task> {
    self
      .pending_delete
      .as_deref()
      .and_then(|id| self.get(id))
  }

  /// First phase of a delete. Nothing is removed until `confirm_delete`.
  pub fn request_delete(
    &mut self,
    id: &str
  ) -> bool {
    if self.get(id).is_none() {
      return false;
    }
    self.pending_delete = Some(id.to_string());
    true
  }

  pub fn cancel_delete(&mut self) {
    self.pending_delete = None;
  }

  pub fn confirm_delete(
    &mut self
  ) -> Option<TaskEvent> {
    let id = self.pending_delete.take()?;
    let index = self.position(&id)?;
    self.tasks.remove(index);
    self.persist();
    debug!(%id, count = self.tasks.len(), "deleted task");
    Some(TaskEvent::Deleted { id })
  }

  /// Moves a task, keeping the relative order of every other task. Returns
  /// whether the order changed; unknown ids are ignored.
  #[tracing::instrument(skip(self))]
  pub fn reorder(
    &mut self,
    id: &str,
    placement: &Placement
  ) -> bool {
    let Some(from) = self.position(id) else {
      return false;
    };
    let last = self.tasks.len() - 1;

    let to = match placement {
      | Placement::Index(index) => {
        (*index).min(last)
      }
      | Placement::Before(anchor)
      | Placement::After(anchor) => {
        if anchor == id {
          return false;
        }
        let Some(anchor_index) =
          self.position(anchor)
        else {
          return false;
        };
        let after = matches!(
          placement,
          Placement::After(_)
        );
        match (from < anchor_index, after)
        {
          | (true, true) => anchor_index,
          | (true, false) => anchor_index - 1,
          | (false, true) => anchor_index + 1,
          | (false, false) => anchor_index
        }
      }
    };

    let moved =
      move_to(&mut self.tasks, from, to);
    if moved {
      self.persist();
      debug!(id, from, to, "reordered task");
    }
    moved
  }

  fn persist(&self) {
    store::save_json(
      &self.store,
      keys::TODOS,
      &self.tasks
    );
  }
}

fn normalized_text(
  text: &str
) -> Result<String, ValidationError> {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return Err(
      ValidationError::EmptyTaskText
    );
  }
  Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
  use super::{
    Category,
    Placement,
    Priority,
    TaskList,
    move_to
  };
  use crate::events::{
    TaskEvent,
    ValidationError
  };
  use crate::store::{
    KeyValueStore,
    MemoryStore
  };

  fn texts(
    list: &TaskList<MemoryStore>
  ) -> Vec<&str> {
    list
      .tasks()
      .iter()
      .map(|t| t.text.as_str())
      .collect()
  }

  fn seeded(
    names: &[&str]
  ) -> TaskList<MemoryStore> {
    let mut list =
      TaskList::load(MemoryStore::new());
    for (offset, name) in
      names.iter().rev().enumerate()
    {
      list
        .add(
          name,
          Priority::Medium,
          Category::Other,
          offset as i64
        )
        .expect("add");
    }
    list
  }

  fn id_of(
    list: &TaskList<MemoryStore>,
    text: &str
  ) -> String {
    list
      .tasks()
      .iter()
      .find(|t| t.text == text)
      .map(|t| t.id.clone())
      .expect("task present")
  }

  #[test]
  fn move_to_shifts_items_between() {
    let mut items = vec!['a', 'b', 'c', 'd'];
    assert!(move_to(&mut items, 0, 2));
    assert_eq!(items, vec!['b', 'c', 'a', 'd']);
    assert!(move_to(&mut items, 3, 0));
    assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    assert!(!move_to(&mut items, 1, 1));
    assert!(!move_to(&mut items, 9, 0));
  }

  #[test]
  fn add_trims_and_rejects_blank_text() {
    let mut list =
      TaskList::load(MemoryStore::new());
    assert_eq!(
      list.add(
        "   ",
        Priority::High,
        Category::Work,
        1
      ),
      Err(ValidationError::EmptyTaskText)
    );
    assert!(list.is_empty());

    list
      .add(
        "  water plants ",
        Priority::Low,
        Category::Personal,
        2
      )
      .expect("add");
    assert_eq!(texts(&list), vec!["water plants"]);
    assert_eq!(list.tasks()[0].created_at, 2);
    assert!(!list.tasks()[0].completed);
  }

  #[test]
  fn before_and_after_placements() {
    let mut list = seeded(&["a", "b", "c", "d"]);
    let a = id_of(&list, "a");
    let c = id_of(&list, "c");
    let d = id_of(&list, "d");

    assert!(list.reorder(
      &a,
      &Placement::After(c.clone())
    ));
    assert_eq!(texts(&list), vec!["b", "c", "a", "d"]);

    assert!(list.reorder(
      &d,
      &Placement::Before(c.clone())
    ));
    assert_eq!(texts(&list), vec!["b", "d", "c", "a"]);

    assert!(!list.reorder(
      &d,
      &Placement::Before(c)
    ));
    assert!(!list.reorder(
      &a,
      &Placement::Before(a.clone())
    ));
  }

  #[test]
  fn index_placement_clamps_to_end() {
    let mut list = seeded(&["a", "b", "c"]);
    let a = id_of(&list, "a");
    assert!(list.reorder(
      &a,
      &Placement::Index(99)
    ));
    assert_eq!(texts(&list), vec!["b", "c", "a"]);
    assert!(!list.reorder(
      "missing",
      &Placement::Index(0)
    ));
  }

  #[test]
  fn toggle_only_reports_completion_edge() {
    let mut list = seeded(&["a"]);
    let a = id_of(&list, "a");
    assert_eq!(
      list.toggle_complete(&a),
      Some(TaskEvent::Completed { id: a.clone() })
    );
    assert_eq!(list.summary(), "1 of 1 completed");
    assert_eq!(list.toggle_complete(&a), None);
    assert_eq!(list.toggle_complete("nope"), None);
    assert_eq!(list.completed_count(), 0);
  }

  #[test]
  fn request_delete_ignores_unknown_ids() {
    let mut list = seeded(&["a"]);
    assert!(!list.request_delete("nope"));
    assert!(list.pending_delete().is_none());
    assert_eq!(list.confirm_delete(), None);
    assert_eq!(list.len(), 1);
  }

  #[test]
  fn load_drops_blank_and_duplicate_records() {
    let store = MemoryStore::new();
    store
      .set(
        "todos",
        r#"[
          {"id":"1","text":" keep ","completed":false,"createdAt":1},
          {"id":"2","text":"   ","completed":false,"createdAt":2},
          {"id":"1","text":"dup","completed":true,"createdAt":3}
        ]"#
      )
      .expect("seed");

    let list = TaskList::load(store);
    assert_eq!(texts(&list), vec![" keep "]);
  }

  #[test]
  fn load_keeps_surviving_text_as_stored() {
    let store = MemoryStore::new();
    store
      .set(
        "todos",
        r#"[{"id":"7","text":"  padded  ","completed":true,"createdAt":9,"priority":"high","category":"work"}]"#
      )
      .expect("seed");

    let list = TaskList::load(store);
    let task = list.get("7").expect("task");
    assert_eq!(task.text, "  padded  ");
    assert!(task.completed);
    assert_eq!(task.created_at, 9);
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.category, Category::Work);
  }
}
