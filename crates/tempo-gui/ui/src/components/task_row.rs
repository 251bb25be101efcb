use tempo_core::Task;
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskRowProps {
  pub task:              Task,
  pub position:          usize,
  pub total:             usize,
  pub is_dragging:       bool,
  pub is_drop_target:    bool,
  pub on_toggle:         Callback<String>,
  pub on_edit:           Callback<String>,
  pub on_request_delete: Callback<String>,
  pub on_move:           Callback<(String, usize)>,
  pub on_drag_start:     Callback<String>,
  pub on_drag_over:      Callback<String>,
  pub on_drop:           Callback<String>,
  pub on_drag_end:       Callback<()>
}

#[function_component(TaskRow)]
pub fn task_row(
  props: &TaskRowProps
) -> Html {
  let task_id = props.task.id.clone();

  let ondragstart = {
    let on_drag_start =
      props.on_drag_start.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |event: DragEvent| {
        if let Some(data_transfer) =
          event.data_transfer()
        {
          let _ = data_transfer
            .set_data("text/plain", &task_id);
          data_transfer
            .set_drop_effect("move");
        }
        on_drag_start.emit(task_id.clone());
      }
    )
  };

  let ondragover = {
    let on_drag_over =
      props.on_drag_over.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        on_drag_over.emit(task_id.clone());
      }
    )
  };

  let ondrop = {
    let on_drop = props.on_drop.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        event.stop_propagation();
        on_drop.emit(task_id.clone());
      }
    )
  };

  let ondragend = {
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(move |_: DragEvent| {
      on_drag_end.emit(());
    })
  };

  let on_toggle = {
    let on_toggle = props.on_toggle.clone();
    let task_id = task_id.clone();
    Callback::from(move |_: MouseEvent| {
      on_toggle.emit(task_id.clone());
    })
  };

  let on_edit = {
    let on_edit = props.on_edit.clone();
    let task_id = task_id.clone();
    Callback::from(move |_: MouseEvent| {
      on_edit.emit(task_id.clone());
    })
  };

  let on_delete = {
    let on_request_delete =
      props.on_request_delete.clone();
    let task_id = task_id.clone();
    Callback::from(move |_: MouseEvent| {
      on_request_delete.emit(task_id.clone());
    })
  };

  let on_move_up = {
    let on_move = props.on_move.clone();
    let task_id = task_id.clone();
    let target =
      props.position.saturating_sub(1);
    Callback::from(move |_: MouseEvent| {
      on_move.emit((task_id.clone(), target));
    })
  };

  let on_move_down = {
    let on_move = props.on_move.clone();
    let task_id = task_id.clone();
    let target = props.position + 1;
    Callback::from(move |_: MouseEvent| {
      on_move.emit((task_id.clone(), target));
    })
  };

  let task = &props.task;
  let is_first = props.position == 0;
  let is_last =
    props.position + 1 >= props.total;

  html! {
      <li
          class={classes!(
              "task-row",
              task.completed.then_some("completed"),
              props.is_dragging.then_some("dragging"),
              props.is_drop_target.then_some("drop-target")
          )}
          draggable="true"
          {ondragstart}
          {ondragover}
          {ondrop}
          {ondragend}
      >
          <button
              class={if task.completed { "check on" } else { "check" }}
              aria-label="Toggle complete"
              onclick={on_toggle}
          >
              { if task.completed { "✓" } else { "" } }
          </button>
          <div class="task-body">
              <span class="task-text">{ &task.text }</span>
              <div class="task-tags">
                  <span class={classes!("badge", "priority", task.priority.as_key())}>
                      { task.priority.label() }
                  </span>
                  <span class={classes!("badge", "category", task.category.as_key())}>
                      { task.category.label() }
                  </span>
              </div>
          </div>
          <div class="task-actions">
              <button class="icon" aria-label="Move up" disabled={is_first} onclick={on_move_up}>{ "↑" }</button>
              <button class="icon" aria-label="Move down" disabled={is_last} onclick={on_move_down}>{ "↓" }</button>
              <button class="icon" aria-label="Edit task" onclick={on_edit}>{ "Edit" }</button>
              <button class="icon danger" aria-label="Delete task" onclick={on_delete}>{ "Delete" }</button>
          </div>
      </li>
  }
}
