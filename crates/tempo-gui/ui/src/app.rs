use std::rc::Rc;

use gloo::console::log;
use gloo::timers::callback::Timeout;
use tempo_core::{
  Notice,
  SuiteConfig,
  Tab
};
use yew::{
  Callback,
  Html,
  Reducible,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_reducer,
  use_state
};

use crate::components::{
  ClockPanel,
  CountdownPanel,
  StopwatchPanel,
  TabNav,
  ToastStack,
  TodoPanel
};

const SUITE_CONFIG_TOML: &str =
  include_str!("../assets/suite.toml");

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
  pub id:     u64,
  pub notice: Notice
}

#[derive(Clone, PartialEq, Default)]
pub struct ToastState {
  pub toasts: Vec<Toast>
}

pub enum ToastAction {
  Push(Toast),
  Dismiss(u64)
}

impl Reducible for ToastState {
  type Action = ToastAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut toasts = self.toasts.clone();
    match action {
      | ToastAction::Push(toast) => {
        toasts.push(toast);
      }
      | ToastAction::Dismiss(id) => {
        toasts.retain(|toast| toast.id != id);
      }
    }
    Rc::new(Self { toasts })
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config = use_state(|| {
    SuiteConfig::from_toml_str(
      SUITE_CONFIG_TOML
    )
  });
  let active_tab =
    use_state(Tab::default);
  let toasts =
    use_reducer(ToastState::default);
  let next_toast_id =
    use_mut_ref(|| 0_u64);

  {
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "frontend mounted and hooks \
         initialized"
      );
      || ()
    });
  }

  {
    use_effect_with(
      *active_tab,
      move |tab| {
        tracing::debug!(
          tab = tab.key(),
          "switched tab"
        );
        || ()
      }
    );
  }

  let on_notice = {
    let toasts = toasts.dispatcher();
    let next_toast_id =
      next_toast_id.clone();
    Callback::from(
      move |notice: Notice| {
        let id = {
          let mut next =
            next_toast_id.borrow_mut();
          *next = next.wrapping_add(1);
          *next
        };
        tracing::info!(
          toast_id = id,
          title = %notice.title,
          "showing notice"
        );

        let duration_ms = notice.duration_ms;
        toasts.dispatch(ToastAction::Push(
          Toast { id, notice }
        ));

        let toasts = toasts.clone();
        Timeout::new(duration_ms, move || {
          toasts.dispatch(
            ToastAction::Dismiss(id)
          );
        })
        .forget();
      }
    )
  };

  let on_dismiss = {
    let toasts = toasts.dispatcher();
    Callback::from(move |id: u64| {
      toasts.dispatch(
        ToastAction::Dismiss(id)
      );
    })
  };

  let on_select_tab = {
    let active_tab = active_tab.clone();
    Callback::from(move |tab: Tab| {
      active_tab.set(tab);
    })
  };

  let notice_ms = config.notices.duration_ms;
  let content = match *active_tab {
    | Tab::Countdown => html! {
        <CountdownPanel
            config={config.countdown.clone()}
            notice_ms={notice_ms}
            on_notice={on_notice.clone()}
        />
    },
    | Tab::Todo => html! {
        <TodoPanel
            config={config.tasks.clone()}
            notice_ms={notice_ms}
            on_notice={on_notice.clone()}
        />
    },
    | Tab::Stopwatch => html! {
        <StopwatchPanel config={config.stopwatch.clone()} />
    },
    | Tab::Clock => html! {
        <ClockPanel config={config.clock.clone()} />
    }
  };

  html! {
      <div class="suite">
          <header class="suite-header">
              <div class="suite-kicker">{ "Productivity Suite" }</div>
              <h1>{ "Time & Task Manager" }</h1>
          </header>
          <TabNav active={*active_tab} on_select={on_select_tab} />
          <main key={active_tab.key()} class="suite-content">
              { content }
          </main>
          <footer class="suite-footer">
              <p>{ "Data stored locally" }</p>
          </footer>
          <ToastStack toasts={toasts.toasts.clone()} on_dismiss={on_dismiss} />
      </div>
  }
}

pub fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}

#[cfg(test)]
mod tests {
  use std::rc::Rc;

  use tempo_core::Notice;
  use yew::Reducible;

  use super::{
    Toast,
    ToastAction,
    ToastState
  };

  fn toast(id: u64, title: &str) -> Toast {
    Toast {
      id,
      notice: Notice::success(title, 3_000)
    }
  }

  #[test]
  fn toasts_stack_in_arrival_order() {
    let state = Rc::new(ToastState::default())
      .reduce(ToastAction::Push(toast(
        1,
        "Task added successfully!"
      )))
      .reduce(ToastAction::Push(toast(
        2,
        "Task completed!"
      )));

    let ids = state
      .toasts
      .iter()
      .map(|toast| toast.id)
      .collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2]);
  }

  #[test]
  fn dismiss_removes_only_the_matching_toast() {
    let state = Rc::new(ToastState {
      toasts: vec![
        toast(1, "Task deleted!"),
        toast(2, "Task updated!")
      ]
    });

    let state =
      state.reduce(ToastAction::Dismiss(1));
    assert_eq!(state.toasts, vec![toast(
      2,
      "Task updated!"
    )]);

    let state =
      state.reduce(ToastAction::Dismiss(9));
    assert_eq!(state.toasts.len(), 1);
  }
}
