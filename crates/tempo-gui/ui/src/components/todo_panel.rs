use chrono::Utc;
use tempo_core::config::TasksConfig;
use tempo_core::{
  Category,
  Notice,
  Placement,
  Priority,
  TaskList
};
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  InputEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html,
  use_force_update,
  use_mut_ref,
  use_state
};

use super::{
  CategorySelect,
  ConfirmDialog,
  EditDraft,
  PrioritySelect,
  TaskEditor,
  TaskRow
};
use crate::storage::LocalStorage;

#[derive(Properties, PartialEq)]
pub struct TodoPanelProps {
  pub config:    TasksConfig,
  pub notice_ms: u32,
  pub on_notice: Callback<Notice>
}

#[function_component(TodoPanel)]
pub fn todo_panel(
  props: &TodoPanelProps
) -> Html {
  let list = use_mut_ref(|| {
    TaskList::load(LocalStorage)
  });
  let refresh = use_force_update();
  let draft_text = use_state(String::new);
  let draft_priority = {
    let priority = props.config.default_priority;
    use_state(move || priority)
  };
  let draft_category = {
    let category = props.config.default_category;
    use_state(move || category)
  };
  let editing = use_state(|| None::<EditDraft>);
  let dragging = use_state(|| None::<String>);
  let drag_over = use_state(|| None::<String>);
  let notice_ms = props.notice_ms;

  let on_draft_text = {
    let draft_text = draft_text.clone();
    Callback::from(move |event: InputEvent| {
      draft_text.set(
        event
          .target_unchecked_into::<HtmlInputElement>()
          .value()
      );
    })
  };

  let on_draft_priority = {
    let draft_priority = draft_priority.clone();
    Callback::from(move |event: Event| {
      let value = event
        .target_unchecked_into::<HtmlSelectElement>()
        .value();
      if let Some(priority) =
        Priority::from_key(&value)
      {
        draft_priority.set(priority);
      }
    })
  };

  let on_draft_category = {
    let draft_category = draft_category.clone();
    Callback::from(move |event: Event| {
      let value = event
        .target_unchecked_into::<HtmlSelectElement>()
        .value();
      if let Some(category) =
        Category::from_key(&value)
      {
        draft_category.set(category);
      }
    })
  };

  let on_add = {
    let list = list.clone();
    let draft_text = draft_text.clone();
    let draft_priority = draft_priority.clone();
    let draft_category = draft_category.clone();
    let on_notice = props.on_notice.clone();
    Callback::from(move |event: SubmitEvent| {
      event.prevent_default();
      let result = list.borrow_mut().add(
        &draft_text,
        *draft_priority,
        *draft_category,
        Utc::now().timestamp_millis()
      );
      match result {
        | Ok(event) => {
          draft_text.set(String::new());
          on_notice.emit(Notice::for_task(
            &event, notice_ms
          ));
        }
        | Err(error) => {
          on_notice.emit(Notice::for_validation(
            &error, false, notice_ms
          ));
        }
      }
    })
  };

  let on_toggle = {
    let list = list.clone();
    let refresh = refresh.clone();
    let on_notice = props.on_notice.clone();
    Callback::from(move |id: String| {
      let event =
        list.borrow_mut().toggle_complete(&id);
      if let Some(event) = event {
        on_notice.emit(Notice::for_task(
          &event, notice_ms
        ));
      }
      refresh.force_update();
    })
  };

  let on_edit = {
    let list = list.clone();
    let editing = editing.clone();
    Callback::from(move |id: String| {
      let draft =
        list.borrow().get(&id).map(|task| {
          EditDraft {
            id:       task.id.clone(),
            text:     task.text.clone(),
            priority: task.priority,
            category: task.category
          }
        });
      editing.set(draft);
    })
  };

  let on_edit_change = {
    let editing = editing.clone();
    Callback::from(move |draft: EditDraft| {
      editing.set(Some(draft));
    })
  };

  let on_edit_save = {
    let list = list.clone();
    let editing = editing.clone();
    let on_notice = props.on_notice.clone();
    Callback::from(move |()| {
      let Some(draft) = (*editing).clone() else {
        return;
      };
      let result = list.borrow_mut().edit(
        &draft.id,
        &draft.text,
        draft.priority,
        draft.category
      );
      match result {
        | Ok(event) => {
          if let Some(event) = event {
            on_notice.emit(Notice::for_task(
              &event, notice_ms
            ));
          }
          editing.set(None);
        }
        | Err(error) => {
          on_notice.emit(Notice::for_validation(
            &error, true, notice_ms
          ));
        }
      }
    })
  };

  let on_edit_cancel = {
    let editing = editing.clone();
    Callback::from(move |()| {
      editing.set(None);
    })
  };

  let on_request_delete = {
    let list = list.clone();
    let refresh = refresh.clone();
    Callback::from(move |id: String| {
      list.borrow_mut().request_delete(&id);
      refresh.force_update();
    })
  };

  let on_confirm_delete = {
    let list = list.clone();
    let refresh = refresh.clone();
    let on_notice = props.on_notice.clone();
    Callback::from(move |_: MouseEvent| {
      let event =
        list.borrow_mut().confirm_delete();
      if let Some(event) = event {
        on_notice.emit(Notice::for_task(
          &event, notice_ms
        ));
      }
      refresh.force_update();
    })
  };

  let on_cancel_delete = {
    let list = list.clone();
    let refresh = refresh.clone();
    Callback::from(move |_: MouseEvent| {
      list.borrow_mut().cancel_delete();
      refresh.force_update();
    })
  };

  let on_move = {
    let list = list.clone();
    let refresh = refresh.clone();
    Callback::from(
      move |(id, index): (String, usize)| {
        list
          .borrow_mut()
          .reorder(&id, &Placement::Index(index));
        refresh.force_update();
      }
    )
  };

  let on_drag_start = {
    let dragging = dragging.clone();
    Callback::from(move |id: String| {
      dragging.set(Some(id));
    })
  };

  let on_drag_over = {
    let drag_over = drag_over.clone();
    Callback::from(move |id: String| {
      if drag_over.as_deref() != Some(id.as_str())
      {
        drag_over.set(Some(id));
      }
    })
  };

  let on_drop = {
    let list = list.clone();
    let dragging = dragging.clone();
    let drag_over = drag_over.clone();
    Callback::from(move |over_id: String| {
      if let Some(from_id) = (*dragging).clone() {
        let target =
          list.borrow().position(&over_id);
        if let Some(index) = target {
          let moved = list
            .borrow_mut()
            .reorder(&from_id, &Placement::Index(index));
          tracing::debug!(
            from = %from_id,
            over = %over_id,
            moved,
            "task dropped"
          );
        }
      }
      dragging.set(None);
      drag_over.set(None);
    })
  };

  let on_drag_end = {
    let dragging = dragging.clone();
    let drag_over = drag_over.clone();
    Callback::from(move |()| {
      dragging.set(None);
      drag_over.set(None);
    })
  };

  let snapshot = list.borrow();
  let total = snapshot.len();
  let pending_delete = snapshot
    .pending_delete()
    .map(|task| task.text.clone());

  html! {
      <section class="panel todo">
          <div class="panel-header">
              <h2>{ "To-Do List" }</h2>
              <p>{ snapshot.summary() }</p>
          </div>
          <form class="task-form" onsubmit={on_add}>
              <input
                  type="text"
                  placeholder="Add a new task..."
                  value={(*draft_text).clone()}
                  oninput={on_draft_text}
              />
              <PrioritySelect value={*draft_priority} onchange={on_draft_priority} />
              <CategorySelect value={*draft_category} onchange={on_draft_category} />
              <button class="btn primary" type="submit">{ "Add" }</button>
          </form>
          {
              if snapshot.is_empty() {
                  html! { <p class="empty">{ "No tasks yet. Add one above!" }</p> }
              } else {
                  html! {
                      <ul class="task-list">
                          {
                              for snapshot.tasks().iter().enumerate().map(|(position, task)| {
                                  match &*editing {
                                      | Some(draft) if draft.id == task.id => html! {
                                          <li key={task.id.clone()} class="task-row editing">
                                              <TaskEditor
                                                  draft={draft.clone()}
                                                  on_change={on_edit_change.clone()}
                                                  on_save={on_edit_save.clone()}
                                                  on_cancel={on_edit_cancel.clone()}
                                              />
                                          </li>
                                      },
                                      | _ => html! {
                                          <TaskRow
                                              key={task.id.clone()}
                                              task={task.clone()}
                                              position={position}
                                              total={total}
                                              is_dragging={dragging.as_deref() == Some(task.id.as_str())}
                                              is_drop_target={drag_over.as_deref() == Some(task.id.as_str())}
                                              on_toggle={on_toggle.clone()}
                                              on_edit={on_edit.clone()}
                                              on_request_delete={on_request_delete.clone()}
                                              on_move={on_move.clone()}
                                              on_drag_start={on_drag_start.clone()}
                                              on_drag_over={on_drag_over.clone()}
                                              on_drop={on_drop.clone()}
                                              on_drag_end={on_drag_end.clone()}
                                          />
                                      }
                                  }
                              })
                          }
                      </ul>
                  }
              }
          }
          {
              match pending_delete {
                  | Some(text) => html! {
                      <ConfirmDialog
                          title={"Delete Task?".to_string()}
                          message={format!("\"{text}\" will be permanently removed. This action cannot be undone.")}
                          confirm_label={"Delete".to_string()}
                          on_confirm={on_confirm_delete}
                          on_cancel={on_cancel_delete}
                      />
                  },
                  | None => html! {}
              }
          }
      </section>
  }
}
