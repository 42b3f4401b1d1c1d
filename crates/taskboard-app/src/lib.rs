//! Application layer for taskboard.
//!
//! Holds the state behind the task list view ([`TaskBoard`]) and the small
//! utilities it is composed of: debounced input, a busy flag, a single-slot
//! notification holder and configuration shared by the CLI and TUI.

pub mod board;
pub mod config;
pub mod debounce;
pub mod error_handler;
pub mod loading;
pub mod messages;
pub mod notification;
pub mod task_api;
pub mod upload;

// Re-exports for convenience
pub use board::{FetchRequest, TaskBoard};
pub use config::{AppConfig, ApiConfig, ENV_API_URL, FilterConfig, ListConfig, NotificationConfig};
pub use debounce::Debouncer;
pub use error_handler::report;
pub use loading::LoadingState;
pub use notification::{Notification, NotificationCenter, Severity};
pub use task_api::TaskApi;
pub use upload::{UploadError, UploadPolicy};
