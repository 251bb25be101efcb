mod clock_panel;
mod confirm_dialog;
mod countdown_panel;
mod lap_list;
mod stopwatch_panel;
mod tab_nav;
mod task_editor;
mod task_row;
mod toast_stack;
mod todo_panel;

pub use clock_panel::ClockPanel;
pub use confirm_dialog::ConfirmDialog;
pub use countdown_panel::CountdownPanel;
pub use lap_list::LapList;
pub use stopwatch_panel::StopwatchPanel;
pub use tab_nav::TabNav;
pub use task_editor::{
  CategorySelect,
  EditDraft,
  PrioritySelect,
  TaskEditor
};
pub use task_row::TaskRow;
pub use toast_stack::ToastStack;
pub use todo_panel::TodoPanel;
