use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
  pub title:         String,
  pub message:       String,
  pub confirm_label: String,
  pub on_confirm:    Callback<MouseEvent>,
  pub on_cancel:     Callback<MouseEvent>
}

#[function_component(ConfirmDialog)]
pub fn confirm_dialog(
  props: &ConfirmDialogProps
) -> Html {
  html! {
      <div class="modal-backdrop">
          <div class="modal" role="alertdialog" aria-modal="true">
              <h2>{ props.title.clone() }</h2>
              <p>{ props.message.clone() }</p>
              <div class="modal-actions">
                  <button class="btn" onclick={props.on_cancel.clone()}>{ "Cancel" }</button>
                  <button class="btn danger" onclick={props.on_confirm.clone()}>
                      { props.confirm_label.clone() }
                  </button>
              </div>
          </div>
      </div>
  }
}
