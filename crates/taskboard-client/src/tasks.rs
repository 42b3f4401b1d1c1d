//! Resource client for the `/tasks` endpoints.

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use taskboard_core::{NewTask, Task, TaskFilters, TaskId, TaskUpdate, TasksPage};

use crate::error::{AppError, ErrorKind};
use crate::transport::{ApiClient, ClientOptions};
use crate::upload::ImageUpload;

/// Collection path.
pub const TASKS_PATH: &str = "/tasks";
/// Repeated multipart field carrying image files.
pub const IMAGE_FIELD: &str = "task[images][]";

/// Query parameters for a list request.
///
/// Search uses a "contains" match and priority/completion an "equals" match;
/// absent filters and unset (or zero) page values are omitted entirely.
#[must_use]
pub fn list_query(
    filters: &TaskFilters,
    page: Option<u32>,
    per_page: Option<u32>,
) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if let Some(search) = filters.search_term() {
        params.push(("q[title_cont]".to_owned(), search.to_owned()));
    }
    if let Some(priority) = filters.priority {
        params.push(("q[priority_eq]".to_owned(), priority.as_str().to_owned()));
    }
    if let Some(completed) = filters.completed {
        params.push(("q[completed_eq]".to_owned(), completed.to_string()));
    }
    if let Some(page) = page.filter(|page| *page > 0) {
        params.push(("page".to_owned(), page.to_string()));
    }
    if let Some(per_page) = per_page.filter(|size| *size > 0) {
        params.push(("per_page".to_owned(), per_page.to_string()));
    }
    params
}

/// Multipart body for task creation.
///
/// # Errors
/// Returns a validation error when an image declares an unparseable MIME type.
pub fn create_form(task: &NewTask, images: Vec<ImageUpload>) -> Result<Form, AppError> {
    let mut form = Form::new()
        .text("task[title]", task.title.clone())
        .text("task[priority]", task.priority.as_str())
        .text("task[completed]", task.completed.to_string());
    if let Some(description) = &task.description {
        form = form.text("task[description]", description.clone());
    }
    for image in images {
        let ImageUpload {
            filename,
            content_type,
            bytes,
        } = image;
        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str(&content_type)
            .map_err(|err| {
                AppError::new(
                    ErrorKind::Validation,
                    format!("invalid image content type '{content_type}'"),
                )
                .with_source(err)
            })?;
        form = form.part(IMAGE_FIELD, part);
    }
    Ok(form)
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    task: &'a TaskUpdate,
}

/// Typed access to the task endpoints.
#[derive(Debug, Clone)]
pub struct TasksClient {
    api: ApiClient,
}

impl TasksClient {
    /// Wrap an existing transport client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Build the transport client and wrap it.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_options(options: ClientOptions) -> Result<Self, AppError> {
        ApiClient::new(options).map(Self::new)
    }

    /// Underlying transport client.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Fetch one page of tasks matching `filters`.
    ///
    /// # Errors
    /// Propagates transport errors; an empty success body is an unknown error.
    pub async fn get_tasks(
        &self,
        filters: &TaskFilters,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<TasksPage, AppError> {
        let params = list_query(filters, page, per_page);
        self.api
            .get(TASKS_PATH, &params)
            .await?
            .ok_or_else(|| AppError::empty_body("GET /tasks"))
    }

    /// Create a task, always as multipart so image parts can ride along.
    ///
    /// # Errors
    /// Propagates transport errors; a 422 arrives as a validation error.
    pub async fn create_task(
        &self,
        task: &NewTask,
        images: Vec<ImageUpload>,
    ) -> Result<Task, AppError> {
        let form = create_form(task, images)?;
        self.api
            .post_form(TASKS_PATH, form)
            .await?
            .ok_or_else(|| AppError::empty_body("POST /tasks"))
    }

    /// Send only the fields present in `update`.
    ///
    /// # Errors
    /// Propagates transport errors.
    pub async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> Result<Task, AppError> {
        let path = task_path(id);
        self.api
            .put_json(&path, &UpdateBody { task: update })
            .await?
            .ok_or_else(|| AppError::empty_body("PUT /tasks/:id"))
    }

    /// Delete a task; the backend answers with an empty body.
    ///
    /// # Errors
    /// Propagates transport errors.
    pub async fn delete_task(&self, id: TaskId) -> Result<(), AppError> {
        self.api.delete::<Value>(&task_path(id)).await.map(|_| ())
    }
}

fn task_path(id: TaskId) -> String {
    format!("{TASKS_PATH}/{id}")
}
