use chrono::Utc;
use tempo_core::Stopwatch;
use tempo_core::config::StopwatchConfig;
use tempo_core::format::format_stopwatch;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html,
  use_force_update,
  use_mut_ref
};

use super::LapList;
use crate::storage::LocalStorage;
use crate::ticking::use_ticking;

#[derive(Properties, PartialEq)]
pub struct StopwatchPanelProps {
  pub config: StopwatchConfig
}

#[function_component(StopwatchPanel)]
pub fn stopwatch_panel(
  props: &StopwatchPanelProps
) -> Html {
  let step_ms = props.config.step_ms;
  let stopwatch = use_mut_ref(move || {
    Stopwatch::load(LocalStorage, step_ms)
  });
  let refresh = use_force_update();

  let on_tick = {
    let stopwatch = stopwatch.clone();
    let refresh = refresh.clone();
    Callback::from(move |()| {
      stopwatch.borrow_mut().tick();
      refresh.force_update();
    })
  };

  let running = stopwatch.borrow().is_running();
  use_ticking(
    "stopwatch",
    running,
    props.config.tick_ms,
    on_tick
  );

  let on_start = {
    let stopwatch = stopwatch.clone();
    let refresh = refresh.clone();
    Callback::from(move |_: MouseEvent| {
      stopwatch.borrow_mut().start();
      refresh.force_update();
    })
  };

  let on_pause = {
    let stopwatch = stopwatch.clone();
    let refresh = refresh.clone();
    Callback::from(move |_: MouseEvent| {
      stopwatch.borrow_mut().pause();
      refresh.force_update();
    })
  };

  let on_reset = {
    let stopwatch = stopwatch.clone();
    let refresh = refresh.clone();
    Callback::from(move |_: MouseEvent| {
      stopwatch.borrow_mut().reset();
      refresh.force_update();
    })
  };

  let on_lap = {
    let stopwatch = stopwatch.clone();
    let refresh = refresh.clone();
    Callback::from(move |_: MouseEvent| {
      let lap = stopwatch
        .borrow_mut()
        .lap(Utc::now().timestamp_millis());
      if lap.is_none() {
        tracing::debug!("lap ignored while stopwatch is at zero");
      }
      refresh.force_update();
    })
  };

  let snapshot = stopwatch.borrow();
  let digits =
    format_stopwatch(snapshot.elapsed_ms());
  let numbered = snapshot
    .laps()
    .iter()
    .enumerate()
    .map(|(index, lap)| {
      (snapshot.lap_number(index), *lap)
    })
    .collect::<Vec<_>>();
  let fastest =
    snapshot.fastest_lap().map(|lap| lap.id);
  let slowest =
    snapshot.slowest_lap().map(|lap| lap.id);

  html! {
      <section class="panel stopwatch">
          <div class="panel-header">
              <h2>{ "Stopwatch" }</h2>
              <p>{ "Precision timing with laps" }</p>
          </div>
          <div class="stopwatch-readout">
              <span class="time-value">{ digits.minutes }</span>
              <span class="separator">{ ":" }</span>
              <span class="time-value">{ digits.seconds }</span>
              <span class="separator">{ "." }</span>
              <span class="time-value centis">{ digits.centiseconds }</span>
          </div>
          <div class="actions">
              {
                  if snapshot.is_running() {
                      html! { <button class="btn warning" onclick={on_pause}>{ "Pause" }</button> }
                  } else {
                      html! { <button class="btn primary" onclick={on_start}>{ "Start" }</button> }
                  }
              }
              <button class="btn" onclick={on_lap} disabled={!snapshot.can_lap()}>{ "Lap" }</button>
              <button class="btn" onclick={on_reset}>{ "Reset" }</button>
          </div>
          <LapList laps={numbered} fastest={fastest} slowest={slowest} />
      </section>
  }
}
