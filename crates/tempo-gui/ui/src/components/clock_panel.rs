use chrono::Local;
use js_sys::{
  Array,
  Object,
  Reflect
};
use tempo_core::clock::ClockFace;
use tempo_core::config::ClockConfig;
use wasm_bindgen::JsValue;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_force_update,
  use_state
};

use crate::ticking::use_ticking;

/// IANA zone name reported by the browser, e.g. `Europe/Berlin`.
fn browser_timezone() -> Option<String> {
  let options = js_sys::Intl::DateTimeFormat::new(
    &Array::new(),
    &Object::new()
  )
  .resolved_options();
  Reflect::get(
    &options,
    &JsValue::from_str("timeZone")
  )
  .ok()
  .and_then(|value| value.as_string())
}

#[derive(Properties, PartialEq)]
pub struct ClockPanelProps {
  pub config: ClockConfig
}

#[function_component(ClockPanel)]
pub fn clock_panel(
  props: &ClockPanelProps
) -> Html {
  let timezone = use_state(browser_timezone);
  let refresh = use_force_update();

  let on_tick = {
    let refresh = refresh.clone();
    Callback::from(move |()| {
      refresh.force_update();
    })
  };
  use_ticking(
    "clock",
    true,
    props.config.tick_ms,
    on_tick
  );

  let face = ClockFace::at(
    Local::now().fixed_offset(),
    timezone.as_deref(),
    props.config.hour_cycle
  );

  html! {
      <section class="panel clock">
          <div class="panel-header">
              <h2>{ "Digital Clock" }</h2>
              <p>{ "Current local time" }</p>
          </div>
          <div class="clock-readout">
              <span class="time-value">{ face.hours.clone() }</span>
              <span class="separator">{ ":" }</span>
              <span class="time-value">{ face.minutes.clone() }</span>
              <span class="separator">{ ":" }</span>
              <span class="time-value">{ face.seconds.clone() }</span>
              {
                  match face.meridiem {
                      | Some(meridiem) => html! { <span class="meridiem">{ meridiem }</span> },
                      | None => html! {}
                  }
              }
          </div>
          <div class="clock-date">{ face.date_label.clone() }</div>
          <div class="clock-meta">
              <div class="meta-item">
                  <span class="meta-label">{ "Timezone" }</span>
                  <span class="meta-value">{ face.timezone.clone() }</span>
              </div>
              <div class="meta-item">
                  <span class="meta-label">{ "UTC Offset" }</span>
                  <span class="meta-value">{ face.utc_offset.clone() }</span>
              </div>
          </div>
      </section>
  }
}
