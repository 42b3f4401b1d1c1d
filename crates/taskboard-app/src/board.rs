//! Orchestration holder for the task list view.
//!
//! [`TaskBoard`] owns the current page of tasks together with the query that
//! produced it (filters, page, page size) and drives every fetch and mutation
//! through a [`TaskApi`]. After each successful mutation it refetches the list
//! instead of patching it locally, so the server's answer is always what is
//! shown. Failures never touch the list; they become a notification.
//!
//! List fetches carry a sequence ticket. Only the response to the most
//! recently issued ticket is applied; older responses are dropped.

use taskboard_client::{AppError, ImageUpload};
use taskboard_core::{
    NewTask, PaginationInfo, Priority, Task, TaskFilters, TaskId, TaskUpdate, TasksPage,
};
use tracing::{debug, info};

use crate::error_handler::report;
use crate::loading::LoadingState;
use crate::messages;
use crate::notification::{Notification, NotificationCenter};
use crate::task_api::TaskApi;

/// A list query captured when a fetch is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Ticket identifying this fetch; higher is newer.
    pub seq: u64,
    /// Filters in effect when the fetch was issued.
    pub filters: TaskFilters,
    /// Requested page.
    pub page: u32,
    /// Requested page size.
    pub per_page: u32,
}

/// State holder behind the task list view.
#[derive(Debug)]
pub struct TaskBoard<A> {
    api: A,
    tasks: Vec<Task>,
    filters: TaskFilters,
    pagination: PaginationInfo,
    current_page: u32,
    per_page: u32,
    loading: LoadingState,
    notifications: NotificationCenter,
    last_issued: u64,
}

impl<A: TaskApi> TaskBoard<A> {
    /// Board that has not fetched yet; it reports loading until the first
    /// fetch settles.
    pub fn new(api: A, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        Self {
            api,
            tasks: Vec::new(),
            filters: TaskFilters::default(),
            pagination: PaginationInfo {
                per_page,
                ..PaginationInfo::default()
            },
            current_page: 1,
            per_page,
            loading: LoadingState::new(true),
            notifications: NotificationCenter::new(),
            last_issued: 0,
        }
    }

    /// Build a board and load its first page.
    pub async fn mount(api: A, per_page: u32) -> Self {
        let mut board = Self::new(api, per_page);
        board.refresh().await;
        board
    }

    /// Fetch the current query and apply the result.
    ///
    /// Returns `true` when the task list was replaced.
    pub async fn refresh(&mut self) -> bool {
        let request = self.begin_fetch();
        let result = self
            .loading
            .with_loading(self.api.get_tasks(
                &request.filters,
                Some(request.page),
                Some(request.per_page),
            ))
            .await;
        self.apply_fetch(request.seq, result)
    }

    /// Issue a ticket for the current query.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.last_issued += 1;
        debug!(
            seq = self.last_issued,
            page = self.current_page,
            per_page = self.per_page,
            "fetching tasks"
        );
        FetchRequest {
            seq: self.last_issued,
            filters: self.filters.clone(),
            page: self.current_page,
            per_page: self.per_page,
        }
    }

    /// Apply the outcome of the fetch identified by `seq`.
    ///
    /// Stale outcomes are discarded without touching any state, errors
    /// included. Returns `true` when the task list was replaced.
    pub fn apply_fetch(&mut self, seq: u64, result: Result<TasksPage, AppError>) -> bool {
        if seq != self.last_issued {
            debug!(seq, latest = self.last_issued, "dropping stale task list response");
            return false;
        }
        match result {
            Ok(page) => {
                debug!(
                    seq,
                    count = page.tasks.len(),
                    total = page.pagination.total_count,
                    "task list loaded"
                );
                self.tasks = page.tasks;
                self.pagination = page.pagination;
                true
            }
            Err(err) => {
                report(&mut self.notifications, messages::FETCH_FAILED, &err);
                false
            }
        }
    }

    /// Set filters, page and page size together and fetch once.
    ///
    /// For callers that know the whole query up front; no field is reset.
    pub async fn load_query(&mut self, filters: TaskFilters, page: u32, per_page: u32) -> bool {
        self.filters = filters;
        self.current_page = page.max(1);
        self.per_page = per_page.max(1);
        self.refresh().await
    }

    /// Replace the filters wholesale and go back to the first page.
    pub async fn handle_filters_change(&mut self, filters: TaskFilters) {
        if filters == self.filters && self.current_page == 1 {
            return;
        }
        self.filters = filters;
        self.current_page = 1;
        self.refresh().await;
    }

    /// Move to `page`; filters and page size are kept. Page 0 means page 1.
    pub async fn handle_page_change(&mut self, page: u32) {
        let page = page.max(1);
        if page == self.current_page {
            return;
        }
        self.current_page = page;
        self.refresh().await;
    }

    /// Change the page size and go back to the first page. Size 0 means 1.
    pub async fn handle_per_page_change(&mut self, per_page: u32) {
        let per_page = per_page.max(1);
        if per_page == self.per_page && self.current_page == 1 {
            return;
        }
        self.per_page = per_page;
        self.current_page = 1;
        self.refresh().await;
    }

    /// Create an open task, then reload the list.
    ///
    /// Returns the created task, or `None` after reporting the failure.
    pub async fn create_task(
        &mut self,
        title: &str,
        description: &str,
        priority: Priority,
        images: Vec<ImageUpload>,
    ) -> Option<Task> {
        let task = NewTask::new(title, description, priority);
        match self.api.create_task(&task, images).await {
            Ok(created) => {
                info!(id = %created.id, images = created.images.len(), "task created");
                self.notifications.show_success(messages::TASK_CREATED, None);
                self.refresh().await;
                Some(created)
            }
            Err(err) => {
                report(&mut self.notifications, messages::CREATE_FAILED, &err);
                None
            }
        }
    }

    /// Set a task's completion flag, then reload the list.
    ///
    /// Success is silent; only failures produce a notification.
    pub async fn toggle_task(&mut self, id: TaskId, completed: bool) -> bool {
        match self
            .api
            .update_task(id, &TaskUpdate::completion(completed))
            .await
        {
            Ok(_) => {
                debug!(%id, completed, "task toggled");
                self.refresh().await;
                true
            }
            Err(err) => {
                report(&mut self.notifications, messages::UPDATE_FAILED, &err);
                false
            }
        }
    }

    /// Delete a task, then reload the list.
    pub async fn delete_task(&mut self, id: TaskId) -> bool {
        match self.api.delete_task(id).await {
            Ok(()) => {
                info!(%id, "task deleted");
                self.notifications.show_success(messages::TASK_DELETED, None);
                self.refresh().await;
                true
            }
            Err(err) => {
                report(&mut self.notifications, messages::DELETE_FAILED, &err);
                false
            }
        }
    }
}

impl<A> TaskBoard<A> {
    /// Tasks on the current page.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Task on the current page with the given id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Filters in effect.
    #[must_use]
    pub const fn filters(&self) -> &TaskFilters {
        &self.filters
    }

    /// Pagination of the last applied fetch.
    #[must_use]
    pub const fn pagination(&self) -> &PaginationInfo {
        &self.pagination
    }

    /// Page requested by the next fetch.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page size requested by the next fetch.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// True while a list fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Handle to the busy flag.
    #[must_use]
    pub const fn loading(&self) -> &LoadingState {
        &self.loading
    }

    /// Current notification, if any.
    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    /// Mutable access to the notification holder.
    pub const fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    /// Dismiss the current notification.
    pub fn clear_notification(&mut self) {
        self.notifications.clear();
    }

    /// Backend the board talks to.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }
}
