use tempo_core::Lap;
use tempo_core::format::format_stopwatch;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct LapListProps {
  /// `(display number, lap)` pairs, newest first.
  pub laps:    Vec<(usize, Lap)>,
  pub fastest: Option<i64>,
  pub slowest: Option<i64>
}

#[function_component(LapList)]
pub fn lap_list(
  props: &LapListProps
) -> Html {
  if props.laps.is_empty() {
    return html! {};
  }

  html! {
      <div class="lap-list">
          <div class="lap-header">
              <span>{ "Lap" }</span>
              <span>{ "Split" }</span>
              <span>{ "Total" }</span>
          </div>
          {
              for props.laps.iter().map(|(number, lap)| {
                  let marker = if props.fastest == Some(lap.id) {
                      Some("fastest")
                  } else if props.slowest == Some(lap.id) {
                      Some("slowest")
                  } else {
                      None
                  };
                  html! {
                      <div key={lap.id.to_string()} class={classes!("lap-row", marker)}>
                          <span>{ format!("Lap {number}") }</span>
                          <span>{ format!("+{}", format_stopwatch(lap.diff)) }</span>
                          <span>{ format_stopwatch(lap.time).to_string() }</span>
                      </div>
                  }
              })
          }
      </div>
  }
}
