use gloo::timers::callback::Interval;
use tempo_core::{
  TickHandle,
  TickSlot
};
use yew::{
  Callback,
  hook,
  use_effect_with
};

pub struct IntervalHandle(Interval);

impl IntervalHandle {
  pub fn every(
    period_ms: u32,
    on_tick: Callback<()>
  ) -> Self {
    Self(Interval::new(period_ms, move || {
      on_tick.emit(());
    }))
  }
}

impl TickHandle for IntervalHandle {
  fn stop(self) {
    let _ = self.0.cancel();
  }
}

/// Keeps one interval live while `running`. The interval is stopped in the
/// effect cleanup, so it never outlives a pause, a reset or the component.
#[hook]
pub fn use_ticking(
  label: &'static str,
  running: bool,
  period_ms: u32,
  on_tick: Callback<()>
) {
  use_effect_with(
    (running, period_ms),
    move |(running, period_ms)| {
      let mut slot =
        TickSlot::<IntervalHandle>::new(
          label
        );
      let period_ms = *period_ms;
      slot.sync(*running, || {
        IntervalHandle::every(
          period_ms, on_tick
        )
      });
      tracing::debug!(
        ticker = label,
        running = *running,
        period_ms,
        "ticker synced"
      );

      move || {
        slot.stop();
      }
    }
  );
}
