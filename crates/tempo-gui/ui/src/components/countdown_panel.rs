use chrono::{
  Local,
  NaiveDateTime
};
use tempo_core::config::CountdownConfig;
use tempo_core::countdown::CountdownStatus;
use tempo_core::{
  Countdown,
  Notice
};
use web_sys::{
  HtmlInputElement,
  InputEvent
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
  use_mut_ref
};

use crate::storage::LocalStorage;
use crate::ticking::use_ticking;

fn local_now() -> NaiveDateTime {
  Local::now().naive_local()
}

#[derive(Properties, PartialEq)]
pub struct CountdownPanelProps {
  pub config:    CountdownConfig,
  pub notice_ms: u32,
  pub on_notice: Callback<Notice>
}

#[function_component(CountdownPanel)]
pub fn countdown_panel(
  props: &CountdownPanelProps
) -> Html {
  let countdown = use_mut_ref(|| {
    Countdown::load(LocalStorage, local_now())
  });
  let refresh = use_force_update();

  let on_tick = {
    let countdown = countdown.clone();
    let refresh = refresh.clone();
    let on_notice = props.on_notice.clone();
    let finished_ms =
      props.config.finished_notice_ms;
    Callback::from(move |()| {
      let event = countdown
        .borrow_mut()
        .tick(local_now());
      if let Some(event) = event {
        on_notice.emit(Notice::for_countdown(
          event,
          finished_ms
        ));
      }
      refresh.force_update();
    })
  };

  let running = countdown.borrow().is_running();
  use_ticking(
    "countdown",
    running,
    props.config.tick_ms,
    on_tick
  );

  let on_target_input = {
    let countdown = countdown.clone();
    let refresh = refresh.clone();
    let on_notice = props.on_notice.clone();
    let notice_ms = props.notice_ms;
    Callback::from(move |event: InputEvent| {
      let value = event
        .target_unchecked_into::<HtmlInputElement>()
        .value();
      let result = countdown
        .borrow_mut()
        .set_target_input(&value, local_now());
      if let Err(error) = result {
        tracing::warn!(%error, "rejected countdown target");
        on_notice.emit(Notice::for_validation(
          &error, false, notice_ms
        ));
      }
      refresh.force_update();
    })
  };

  let on_start = {
    let countdown = countdown.clone();
    let refresh = refresh.clone();
    let on_notice = props.on_notice.clone();
    let notice_ms = props.notice_ms;
    Callback::from(move |_: MouseEvent| {
      let result = countdown.borrow_mut().start();
      if let Err(error) = result {
        on_notice.emit(Notice::for_validation(
          &error, false, notice_ms
        ));
      }
      refresh.force_update();
    })
  };

  let on_pause = {
    let countdown = countdown.clone();
    let refresh = refresh.clone();
    Callback::from(move |_: MouseEvent| {
      countdown.borrow_mut().pause();
      refresh.force_update();
    })
  };

  let on_reset = {
    let countdown = countdown.clone();
    let refresh = refresh.clone();
    Callback::from(move |_: MouseEvent| {
      countdown.borrow_mut().reset();
      refresh.force_update();
    })
  };

  let snapshot = countdown.borrow();
  let digits = snapshot.time_left().digits();
  let status = match snapshot.status() {
    | CountdownStatus::Idle => "idle",
    | CountdownStatus::Running => "running",
    | CountdownStatus::Finished => "finished"
  };
  let units = [
    (digits.days, "Days"),
    (digits.hours, "Hours"),
    (digits.minutes, "Minutes"),
    (digits.seconds, "Seconds")
  ];

  html! {
      <section class={format!("panel countdown {status}")}>
          <div class="panel-header">
              <h2>{ "Countdown Timer" }</h2>
              <p>{ "Set your target date and time" }</p>
          </div>
          <label class="field">
              <span>{ "Target Date & Time" }</span>
              <input
                  type="datetime-local"
                  value={snapshot.target_input()}
                  oninput={on_target_input}
              />
          </label>
          <div class="time-units">
              {
                  for units.into_iter().map(|(value, label)| html! {
                      <div class="time-unit" key={label}>
                          <div class="time-value">{ value }</div>
                          <div class="time-label">{ label }</div>
                      </div>
                  })
              }
          </div>
          <div class="actions">
              {
                  if snapshot.is_running() {
                      html! { <button class="btn warning" onclick={on_pause}>{ "Pause" }</button> }
                  } else {
                      html! { <button class="btn primary" onclick={on_start}>{ "Start" }</button> }
                  }
              }
              <button class="btn" onclick={on_reset}>{ "Reset" }</button>
          </div>
      </section>
  }
}
