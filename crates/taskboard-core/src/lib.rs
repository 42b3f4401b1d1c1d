//! Domain types shared by the taskboard client, application layer and UI.

/// Identifier types.
pub mod id;
/// Pagination snapshot and display helpers.
pub mod pagination;

pub use crate::id::{AttachmentId, TaskId};
pub use crate::pagination::{DEFAULT_PER_PAGE, MAX_VISIBLE_PAGES, PaginationInfo};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Task priority as understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal work.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Every priority, highest first.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Wire value used in query strings and form fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a priority string is not one of `low`, `medium`, `high`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority '{0}' (expected low, medium or high)")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(s.to_owned())),
        }
    }
}

/// Image stored by the backend and attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Attachment identifier.
    pub id: AttachmentId,
    /// Retrieval URL.
    pub url: String,
    /// Original file name.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// Size in bytes.
    pub byte_size: u64,
}

/// A task as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier of the task.
    pub id: TaskId,
    /// Human-readable title, never empty.
    pub title: String,
    /// Optional free text.
    #[serde(default)]
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Priority bucket.
    pub priority: Priority,
    /// Creation timestamp assigned by the server.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last update timestamp assigned by the server.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Attached images in upload order.
    #[serde(default)]
    pub images: Vec<ImageAttachment>,
}

/// Transient constraints applied to the task list query.
///
/// A `None` field means "no constraint", never "match empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilters {
    /// Substring the title must contain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Exact completion state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskFilters {
    /// Replace the search constraint.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Replace the priority constraint.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replace the completion constraint.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Search text that actually constrains the query.
    ///
    /// An empty string is treated like an absent search.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }

    /// True when no field constrains the query.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none() && self.priority.is_none() && self.completed.is_none()
    }
}

/// One page of tasks with its pagination snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksPage {
    /// Tasks on this page in server order.
    pub tasks: Vec<Task>,
    /// Pagination for the query that produced `tasks`.
    pub pagination: PaginationInfo,
}

/// Fields sent when creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Title, required.
    pub title: String,
    /// Optional description; omitted from the request when `None`.
    pub description: Option<String>,
    /// Initial completion flag.
    pub completed: bool,
    /// Initial priority.
    pub priority: Priority,
}

impl NewTask {
    /// Build an open task, dropping an empty description.
    pub fn new(title: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        let description = description.into();
        Self {
            title: title.into(),
            description: (!description.is_empty()).then_some(description),
            completed: false,
            priority,
        }
    }
}

/// Partial update; only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl TaskUpdate {
    /// Update touching only the completion flag.
    #[must_use]
    pub const fn completion(completed: bool) -> Self {
        Self {
            title: None,
            description: None,
            completed: Some(completed),
            priority: None,
        }
    }

    /// True when the update would send no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
    }
}
