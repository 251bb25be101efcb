use chrono::{
  Duration,
  NaiveDate
};
use tempfile::tempdir;
use tempo_core::countdown::Countdown;
use tempo_core::events::{
  CountdownEvent,
  TaskEvent,
  ValidationError
};
use tempo_core::stopwatch::Stopwatch;
use tempo_core::store::{
  FileStore,
  KeyValueStore,
  MemoryStore
};
use tempo_core::todo::{
  Category,
  Placement,
  Priority,
  TaskList
};

fn texts(
  list: &TaskList<impl KeyValueStore>
) -> Vec<String> {
  list
    .tasks()
    .iter()
    .map(|task| task.text.clone())
    .collect()
}

#[test]
fn task_list_prepends_and_reorders() {
  let mut list =
    TaskList::load(MemoryStore::new());
  list
    .add(
      "buy milk",
      Priority::High,
      Category::Shopping,
      1
    )
    .expect("add milk");
  list
    .add(
      "call bob",
      Priority::Low,
      Category::Work,
      2
    )
    .expect("add bob");
  assert_eq!(
    texts(&list),
    vec!["call bob", "buy milk"]
  );

  let milk = list.tasks()[1].id.clone();
  let bob = list.tasks()[0].id.clone();
  assert!(list.reorder(
    &milk,
    &Placement::Before(bob.clone())
  ));
  assert_eq!(
    texts(&list),
    vec!["buy milk", "call bob"]
  );

  assert!(!list.reorder(
    &milk,
    &Placement::Before(bob)
  ));
  assert!(!list.reorder(
    &milk,
    &Placement::Index(0)
  ));
  assert_eq!(
    texts(&list),
    vec!["buy milk", "call bob"]
  );
}

#[test]
fn blank_edit_leaves_stored_bytes_untouched() {
  let store = MemoryStore::new();
  let mut list =
    TaskList::load(store.clone());
  list
    .add(
      "write report",
      Priority::Medium,
      Category::Work,
      10
    )
    .expect("add");
  let id = list.tasks()[0].id.clone();
  let before_store =
    store.get("todos").expect("get");
  let before_tasks = list.tasks().to_vec();

  assert_eq!(
    list.edit(
      &id,
      "   ",
      Priority::High,
      Category::Health
    ),
    Err(ValidationError::EmptyTaskText)
  );
  assert_eq!(list.tasks(), &before_tasks[..]);
  assert_eq!(
    store.get("todos").expect("get"),
    before_store
  );

  assert_eq!(
    list.edit(
      &id,
      " final report ",
      Priority::High,
      Category::Work
    ),
    Ok(Some(TaskEvent::Updated {
      id: id.clone()
    }))
  );
  let task = &list.tasks()[0];
  assert_eq!(task.text, "final report");
  assert_eq!(task.priority, Priority::High);
  assert_eq!(task.created_at, 10);
  assert_eq!(
    list.edit(
      "missing",
      "x",
      Priority::Low,
      Category::Other
    ),
    Ok(None)
  );
}

#[test]
fn delete_needs_confirmation() {
  let mut list =
    TaskList::load(MemoryStore::new());
  list
    .add(
      "stretch",
      Priority::Low,
      Category::Health,
      1
    )
    .expect("add");
  let id = list.tasks()[0].id.clone();

  assert!(list.request_delete(&id));
  assert_eq!(
    list
      .pending_delete()
      .map(|task| task.text.as_str()),
    Some("stretch")
  );
  list.cancel_delete();
  assert_eq!(list.len(), 1);
  assert_eq!(list.confirm_delete(), None);

  assert!(list.request_delete(&id));
  assert_eq!(
    list.confirm_delete(),
    Some(TaskEvent::Deleted { id })
  );
  assert!(list.is_empty());
}

#[test]
fn legacy_records_gain_default_tags() {
  let store = MemoryStore::new();
  store
    .set(
      "todos",
      r#"[{"id":"1700000000000","text":"old task","completed":true,"createdAt":1700000000000}]"#
    )
    .expect("seed legacy data");

  let list = TaskList::load(store);
  let task = &list.tasks()[0];
  assert_eq!(task.id, "1700000000000");
  assert_eq!(task.text, "old task");
  assert!(task.completed);
  assert_eq!(task.created_at, 1_700_000_000_000);
  assert_eq!(task.priority, Priority::Medium);
  assert_eq!(task.category, Category::Other);
}

#[test]
fn corrupt_task_store_loads_empty() {
  let store = MemoryStore::new();
  store
    .set("todos", "not json at all")
    .expect("seed corrupt data");
  assert!(TaskList::load(store).is_empty());
}

#[test]
fn file_store_survives_reopen() {
  let temp = tempdir().expect("tempdir");
  let start = NaiveDate::from_ymd_opt(2026, 10, 17)
    .and_then(|d| d.and_hms_opt(8, 0, 0))
    .expect("valid start");

  {
    let store = FileStore::open(temp.path())
      .expect("open store");
    let mut countdown =
      Countdown::load(store, start);
    countdown.set_target(
      start + Duration::hours(2),
      start
    );
  }
  {
    let store = FileStore::open(temp.path())
      .expect("open store");
    let mut watch = Stopwatch::load(store, 10);
    watch.start();
    for _ in 0..25 {
      watch.tick();
    }
    watch.lap(1);
    watch.pause();
  }

  let store = FileStore::open(temp.path())
    .expect("reopen store");
  let countdown = Countdown::load(store, start);
  assert_eq!(
    countdown.target_input(),
    "2026-10-17T10:00"
  );
  assert_eq!(countdown.time_left().hours, 2);

  let store = FileStore::open(temp.path())
    .expect("reopen store");
  let watch = Stopwatch::load(store, 10);
  assert_eq!(watch.elapsed_ms(), 250);
  assert_eq!(watch.laps().len(), 1);
}

#[test]
fn corrupt_storage_file_opens_empty() {
  let temp = tempdir().expect("tempdir");
  std::fs::write(
    temp.path().join("storage.json"),
    "{ broken"
  )
  .expect("write corrupt file");

  let store = FileStore::open(temp.path())
    .expect("open store");
  assert_eq!(
    store.get("todos").expect("get"),
    None
  );
  store.set("todos", "[]").expect("set");
  assert_eq!(
    store.get("todos").expect("get"),
    Some("[]".to_string())
  );
}

#[test]
fn countdown_reports_completion_once() {
  let start = NaiveDate::from_ymd_opt(2026, 10, 17)
    .and_then(|d| d.and_hms_opt(23, 59, 0))
    .expect("valid start");
  let mut countdown =
    Countdown::load(MemoryStore::new(), start);
  countdown.set_target(
    start + Duration::seconds(90),
    start
  );
  countdown.start().expect("start");

  let fired = (1..=90)
    .filter_map(|second| {
      countdown
        .tick(start + Duration::seconds(second))
    })
    .collect::<Vec<_>>();
  assert_eq!(fired, vec![CountdownEvent::Finished]);
  assert_eq!(
    countdown.tick(start + Duration::seconds(91)),
    None
  );
}
