//! Shared constants for the TUI to keep layout and timing in sync.

/// Interval in milliseconds between UI ticks/redraws.
pub const TUI_TICK_RATE_MS: u64 = 100;
/// Highlight symbol shown beside the selected task.
pub const TASK_LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";
/// Width percentage for the new-task form before clamping.
pub const FORM_WIDTH_PERCENT: u16 = 60;
/// Minimum width for the new-task form.
pub const FORM_MIN_WIDTH: u16 = 44;
/// Fixed height of the new-task form.
pub const FORM_HEIGHT: u16 = 14;
/// Width percentage for the delete confirmation before clamping.
pub const CONFIRM_WIDTH_PERCENT: u16 = 40;
/// Minimum width for the delete confirmation.
pub const CONFIRM_MIN_WIDTH: u16 = 30;
/// Fixed height of the delete confirmation.
pub const CONFIRM_HEIGHT: u16 = 5;
/// Width percentage for the task details popup before clamping.
pub const DETAILS_WIDTH_PERCENT: u16 = 70;
/// Minimum width for the task details popup.
pub const DETAILS_MIN_WIDTH: u16 = 50;
/// Titles longer than this many graphemes are shortened in the list.
pub const TITLE_MAX_GRAPHEMES: usize = 60;
