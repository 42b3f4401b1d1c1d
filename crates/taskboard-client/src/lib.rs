//! HTTP client for the taskboard REST backend.
//!
//! [`ApiClient`] is the single point that sends requests and classifies
//! failures into [`AppError`]; [`TasksClient`] builds the query strings and
//! bodies for the task endpoints on top of it.

mod error;
mod tasks;
mod transport;
mod upload;

pub use error::{AppError, ErrorKind};
pub use tasks::{IMAGE_FIELD, TASKS_PATH, TasksClient, create_form, list_query};
pub use transport::{ApiClient, ClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use upload::ImageUpload;

/// URL type used for origin validation.
pub use reqwest::Url;
