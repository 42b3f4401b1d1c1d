//! Plain-text rendering shared by the CLI and the terminal UI.

use std::borrow::Cow;

use taskboard_app::UploadPolicy;
use taskboard_client::ImageUpload;
use taskboard_core::{ImageAttachment, MAX_VISIBLE_PAGES, PaginationInfo, Task, TaskFilters};
use unicode_segmentation::UnicodeSegmentation;

/// Label for a completion constraint.
pub const fn completion_label(completed: Option<bool>) -> &'static str {
    match completed {
        None => "All",
        Some(true) => "Completed",
        Some(false) => "Open",
    }
}

/// Checkbox shown before a task title.
pub const fn status_marker(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// One-line description of the active filters.
pub fn filter_summary(filters: &TaskFilters) -> String {
    if filters.is_empty() {
        return "No filters".to_owned();
    }
    let mut parts = Vec::new();
    if let Some(search) = filters.search_term() {
        parts.push(format!("search: \"{search}\""));
    }
    if let Some(priority) = filters.priority {
        parts.push(format!("priority: {}", priority.label()));
    }
    if let Some(completed) = filters.completed {
        parts.push(format!("status: {}", completion_label(Some(completed))));
    }
    parts.join(" | ")
}

/// `"11-20 of 25 | page 2/3"`, or `"0 tasks"` for an empty result.
pub fn pagination_summary(pagination: &PaginationInfo) -> String {
    pagination.display_range().map_or_else(
        || "0 tasks".to_owned(),
        |(start, end)| {
            format!(
                "{start}-{end} of {} | page {}/{}",
                pagination.total_count, pagination.current_page, pagination.total_pages
            )
        },
    )
}

/// Page jump strip such as `"< 1 [2] 3 >"`; empty for a single page.
pub fn page_strip(pagination: &PaginationInfo) -> String {
    if !pagination.is_multi_page() {
        return String::new();
    }
    let mut parts = Vec::new();
    if pagination.prev_page.is_some() {
        parts.push("<".to_owned());
    }
    for page in pagination.page_window(MAX_VISIBLE_PAGES) {
        if page == pagination.current_page {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if pagination.next_page.is_some() {
        parts.push(">".to_owned());
    }
    parts.join(" ")
}

/// Compact single-line rendering of a task.
pub fn task_row(task: &Task) -> String {
    let images = match task.images.len() {
        0 => String::new(),
        1 => " (1 image)".to_owned(),
        n => format!(" ({n} images)"),
    };
    format!(
        "#{} {} {:<6} {}{images}",
        task.id,
        status_marker(task.completed),
        task.priority.label(),
        task.title
    )
}

/// Human-readable file size with at most one decimal: `"512 Bytes"`,
/// `"1.5 KB"`, `"3 MB"`.
pub fn format_byte_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
    const STEP: u64 = 1024;

    let mut unit = 1_u64;
    let mut label = UNITS[0];
    for &next in &UNITS[1..] {
        if bytes < unit * STEP {
            break;
        }
        unit *= STEP;
        label = next;
    }
    let tenths = (u128::from(bytes) * 10 + u128::from(unit) / 2) / u128::from(unit);
    match tenths % 10 {
        0 => format!("{} {label}", tenths / 10),
        frac => format!("{}.{frac} {label}", tenths / 10),
    }
}

/// `"cat.png (1.2 KB) http://..."`.
pub fn attachment_line(image: &ImageAttachment) -> String {
    format!(
        "{} ({}) {}",
        image.filename,
        format_byte_size(image.byte_size),
        image.url
    )
}

/// Validate a new-task submission before any request is made.
///
/// # Errors
/// Returns a user-facing reason when the title is blank or the images break
/// the upload policy.
pub fn check_new_task(
    title: &str,
    images: &[ImageUpload],
    policy: &UploadPolicy,
) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title is required".to_owned());
    }
    policy.check(images).map_err(|err| err.to_string())
}

pub fn truncate_with_ellipsis(input: &str, max_graphemes: usize) -> Cow<'_, str> {
    const ELLIPSIS: &str = "...";
    const ELLIPSIS_GRAPHEMES: usize = 3;

    if max_graphemes == 0 {
        return Cow::Owned(String::new());
    }

    let grapheme_count = input.graphemes(true).count();
    if grapheme_count <= max_graphemes {
        return Cow::Borrowed(input);
    }

    if max_graphemes <= ELLIPSIS_GRAPHEMES {
        return Cow::Owned(input.graphemes(true).take(max_graphemes).collect());
    }

    let mut truncated: String = input
        .graphemes(true)
        .take(max_graphemes - ELLIPSIS_GRAPHEMES)
        .collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}
