use tempo_core::NoticeLevel;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use crate::app::Toast;

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
  pub toasts:     Vec<Toast>,
  pub on_dismiss: Callback<u64>
}

#[function_component(ToastStack)]
pub fn toast_stack(
  props: &ToastStackProps
) -> Html {
  html! {
      <div class="toast-stack" role="status" aria-live="polite">
          {
              for props.toasts.iter().map(|toast| {
                  let id = toast.id;
                  let on_dismiss = props.on_dismiss.clone();
                  let level = match toast.notice.level {
                      | NoticeLevel::Success => "success",
                      | NoticeLevel::Error => "error"
                  };
                  html! {
                      <div
                          key={id.to_string()}
                          class={classes!("toast", level)}
                          onclick={move |_| on_dismiss.emit(id)}
                      >
                          <div class="toast-title">{ &toast.notice.title }</div>
                          {
                              match &toast.notice.description {
                                  | Some(description) => html! {
                                      <div class="toast-description">{ description }</div>
                                  },
                                  | None => html! {}
                              }
                          }
                      </div>
                  }
              })
          }
      </div>
  }
}
