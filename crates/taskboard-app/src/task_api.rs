//! Seam between the orchestration holder and the backend.

use taskboard_client::{AppError, ImageUpload, TasksClient};
use taskboard_core::{NewTask, Task, TaskFilters, TaskId, TaskUpdate, TasksPage};

/// Task operations the board depends on.
///
/// [`TasksClient`] is the production implementation; tests substitute
/// in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait TaskApi {
    /// Fetch one page of tasks.
    ///
    /// # Errors
    /// Returns a classified backend error.
    async fn get_tasks(
        &self,
        filters: &TaskFilters,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<TasksPage, AppError>;

    /// Create a task with optional images.
    ///
    /// # Errors
    /// Returns a classified backend error.
    async fn create_task(&self, task: &NewTask, images: Vec<ImageUpload>) -> Result<Task, AppError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// Returns a classified backend error.
    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> Result<Task, AppError>;

    /// Delete a task.
    ///
    /// # Errors
    /// Returns a classified backend error.
    async fn delete_task(&self, id: TaskId) -> Result<(), AppError>;
}

impl TaskApi for TasksClient {
    async fn get_tasks(
        &self,
        filters: &TaskFilters,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<TasksPage, AppError> {
        Self::get_tasks(self, filters, page, per_page).await
    }

    async fn create_task(&self, task: &NewTask, images: Vec<ImageUpload>) -> Result<Task, AppError> {
        Self::create_task(self, task, images).await
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> Result<Task, AppError> {
        Self::update_task(self, id, update).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), AppError> {
        Self::delete_task(self, id).await
    }
}
