use tempo_core::{
  Category,
  Priority
};
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  InputEvent,
  KeyboardEvent
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

/// In-progress edit of one task. Lives only in the view until saved.
#[derive(Clone, PartialEq)]
pub struct EditDraft {
  pub id:       String,
  pub text:     String,
  pub priority: Priority,
  pub category: Category
}

#[derive(Properties, PartialEq)]
pub struct TaskEditorProps {
  pub draft:     EditDraft,
  pub on_change: Callback<EditDraft>,
  pub on_save:   Callback<()>,
  pub on_cancel: Callback<()>
}

#[function_component(TaskEditor)]
pub fn task_editor(
  props: &TaskEditorProps
) -> Html {
  let on_text = {
    let draft = props.draft.clone();
    let on_change = props.on_change.clone();
    Callback::from(move |event: InputEvent| {
      let mut next = draft.clone();
      next.text = event
        .target_unchecked_into::<HtmlInputElement>()
        .value();
      on_change.emit(next);
    })
  };

  let on_priority = {
    let draft = props.draft.clone();
    let on_change = props.on_change.clone();
    Callback::from(move |event: Event| {
      let value = event
        .target_unchecked_into::<HtmlSelectElement>()
        .value();
      if let Some(priority) =
        Priority::from_key(&value)
      {
        let mut next = draft.clone();
        next.priority = priority;
        on_change.emit(next);
      }
    })
  };

  let on_category = {
    let draft = props.draft.clone();
    let on_change = props.on_change.clone();
    Callback::from(move |event: Event| {
      let value = event
        .target_unchecked_into::<HtmlSelectElement>()
        .value();
      if let Some(category) =
        Category::from_key(&value)
      {
        let mut next = draft.clone();
        next.category = category;
        on_change.emit(next);
      }
    })
  };

  let on_keydown = {
    let on_save = props.on_save.clone();
    let on_cancel = props.on_cancel.clone();
    Callback::from(move |event: KeyboardEvent| {
      match event.key().as_str() {
        | "Enter" => on_save.emit(()),
        | "Escape" => on_cancel.emit(()),
        | _ => {}
      }
    })
  };

  let on_save_click = {
    let on_save = props.on_save.clone();
    Callback::from(move |_: MouseEvent| {
      on_save.emit(());
    })
  };

  let on_cancel_click = {
    let on_cancel = props.on_cancel.clone();
    Callback::from(move |_: MouseEvent| {
      on_cancel.emit(());
    })
  };

  html! {
      <div class="task-editor">
          <input
              type="text"
              class="task-edit-text"
              value={props.draft.text.clone()}
              oninput={on_text}
              onkeydown={on_keydown}
              autofocus=true
          />
          <PrioritySelect value={props.draft.priority} onchange={on_priority} />
          <CategorySelect value={props.draft.category} onchange={on_category} />
          <button class="btn primary small" onclick={on_save_click}>{ "Save" }</button>
          <button class="btn small" onclick={on_cancel_click}>{ "Cancel" }</button>
      </div>
  }
}

#[derive(Properties, PartialEq)]
pub struct PrioritySelectProps {
  pub value:    Priority,
  pub onchange: Callback<Event>
}

#[function_component(PrioritySelect)]
pub fn priority_select(
  props: &PrioritySelectProps
) -> Html {
  html! {
      <select class="priority-select" onchange={props.onchange.clone()}>
          {
              for Priority::ALL.into_iter().map(|priority| html! {
                  <option
                      key={priority.as_key()}
                      value={priority.as_key()}
                      selected={priority == props.value}
                  >
                      { priority.label() }
                  </option>
              })
          }
      </select>
  }
}

#[derive(Properties, PartialEq)]
pub struct CategorySelectProps {
  pub value:    Category,
  pub onchange: Callback<Event>
}

#[function_component(CategorySelect)]
pub fn category_select(
  props: &CategorySelectProps
) -> Html {
  html! {
      <select class="category-select" onchange={props.onchange.clone()}>
          {
              for Category::ALL.into_iter().map(|category| html! {
                  <option
                      key={category.as_key()}
                      value={category.as_key()}
                      selected={category == props.value}
                  >
                      { category.label() }
                  </option>
              })
          }
      </select>
  }
}
