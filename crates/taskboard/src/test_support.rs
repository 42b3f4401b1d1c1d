//! In-memory backend shared by the CLI and TUI tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use taskboard_app::TaskApi;
use taskboard_client::{AppError, ImageUpload};
use taskboard_core::{
    AttachmentId, ImageAttachment, NewTask, PaginationInfo, Priority, Task, TaskFilters, TaskId,
    TaskUpdate, TasksPage,
};
use time::OffsetDateTime;

pub fn sample_task(id: u64, title: &str) -> Task {
    Task {
        id: TaskId(id),
        title: title.to_owned(),
        description: None,
        completed: false,
        priority: Priority::Medium,
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
        images: Vec::new(),
    }
}

pub fn sample_image(id: u64) -> ImageAttachment {
    ImageAttachment {
        id: AttachmentId(id),
        url: format!("http://localhost:3001/images/{id}"),
        filename: format!("{id}.png"),
        content_type: "image/png".to_owned(),
        byte_size: 4,
    }
}

/// Backend that filters and pages an in-memory task list.
#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<FakeInner>,
}

#[derive(Default)]
struct FakeInner {
    tasks: Mutex<Vec<Task>>,
    requests: Mutex<Vec<String>>,
    fail_next: Mutex<Option<AppError>>,
    next_id: Mutex<u64>,
}

impl FakeApi {
    pub fn with_titles(titles: &[&str]) -> Self {
        let api = Self::default();
        let ids = 1..=titles.len() as u64;
        *guard(&api.inner.tasks) = ids
            .zip(titles)
            .map(|(id, title)| sample_task(id, title))
            .collect();
        *guard(&api.inner.next_id) = titles.len() as u64 + 1;
        api
    }

    /// Requests seen so far, e.g. `"list page=1 per_page=10"`.
    pub fn requests(&self) -> Vec<String> {
        guard(&self.inner.requests).clone()
    }

    pub fn clear_requests(&self) {
        guard(&self.inner.requests).clear();
    }

    pub fn fail_next(&self, err: AppError) {
        *guard(&self.inner.fail_next) = Some(err);
    }

    pub fn attach_image(&self, id: TaskId, image: ImageAttachment) {
        if let Some(task) = guard(&self.inner.tasks).iter_mut().find(|task| task.id == id) {
            task.images.push(image);
        }
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        guard(&self.inner.tasks).iter().find(|task| task.id == id).cloned()
    }

    fn begin(&self, request: String) -> Result<(), AppError> {
        guard(&self.inner.requests).push(request);
        guard(&self.inner.fail_next).take().map_or(Ok(()), Err)
    }
}

impl TaskApi for FakeApi {
    async fn get_tasks(
        &self,
        filters: &TaskFilters,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<TasksPage, AppError> {
        let page = page.unwrap_or(1);
        let per_page = per_page.unwrap_or(10).max(1);
        self.begin(format!("list page={page} per_page={per_page}"))?;

        let matching: Vec<Task> = guard(&self.inner.tasks)
            .iter()
            .filter(|task| filters.search_term().is_none_or(|term| task.title.contains(term)))
            .filter(|task| filters.priority.is_none_or(|priority| task.priority == priority))
            .filter(|task| filters.completed.is_none_or(|done| task.completed == done))
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let total_pages = u32::try_from(total.div_ceil(u64::from(per_page)).max(1)).unwrap_or(1);
        let skip = (page.saturating_sub(1) * per_page) as usize;
        Ok(TasksPage {
            tasks: matching.into_iter().skip(skip).take(per_page as usize).collect(),
            pagination: PaginationInfo {
                current_page: page,
                total_pages,
                total_count: total,
                per_page,
                next_page: (page < total_pages).then_some(page + 1),
                prev_page: (page > 1).then(|| page - 1),
            },
        })
    }

    async fn create_task(&self, task: &NewTask, images: Vec<ImageUpload>) -> Result<Task, AppError> {
        self.begin(format!("create {} images={}", task.title, images.len()))?;
        let id = {
            let mut next = guard(&self.inner.next_id);
            let id = (*next).max(1);
            *next = id + 1;
            id
        };
        let mut created = sample_task(id, &task.title);
        created.description.clone_from(&task.description);
        created.priority = task.priority;
        created.images = (1..=images.len() as u64).map(sample_image).collect();
        guard(&self.inner.tasks).push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> Result<Task, AppError> {
        self.begin(format!("update {id} completed={:?}", update.completed))?;
        let mut tasks = guard(&self.inner.tasks);
        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            return Err(AppError::from_response(404, "Not Found", br#"{"error":"Not Found"}"#));
        };
        if let Some(completed) = update.completed {
            task.completed = completed;
        }
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), AppError> {
        self.begin(format!("delete {id}"))?;
        let mut tasks = guard(&self.inner.tasks);
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(AppError::from_response(404, "Not Found", br#"{"error":"Not Found"}"#));
        }
        Ok(())
    }
}

fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
