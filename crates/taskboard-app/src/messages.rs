//! User-facing notification texts.

/// Shown after a task was created.
pub const TASK_CREATED: &str = "Task added";
/// Shown after a task was deleted.
pub const TASK_DELETED: &str = "Task deleted";

/// Prefix for a failed list fetch.
pub const FETCH_FAILED: &str = "Failed to load tasks";
/// Prefix for a failed create.
pub const CREATE_FAILED: &str = "Failed to add task";
/// Prefix for a failed completion toggle.
pub const UPDATE_FAILED: &str = "Failed to update task";
/// Prefix for a failed delete.
pub const DELETE_FAILED: &str = "Failed to delete task";
