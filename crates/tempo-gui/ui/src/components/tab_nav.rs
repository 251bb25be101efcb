use tempo_core::Tab;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TabNavProps {
  pub active:    Tab,
  pub on_select: Callback<Tab>
}

#[function_component(TabNav)]
pub fn tab_nav(
  props: &TabNavProps
) -> Html {
  html! {
      <nav class="tab-nav">
          {
              for Tab::ALL.into_iter().map(|tab| {
                  let on_select = props.on_select.clone();
                  let is_active = props.active == tab;
                  html! {
                      <button
                          key={tab.key()}
                          class={if is_active { "tab active" } else { "tab" }}
                          onclick={move |_| on_select.emit(tab)}
                      >
                          { tab.label() }
                      </button>
                  }
              })
          }
      </nav>
  }
}
