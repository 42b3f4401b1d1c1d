//! State of the new-task popup.

use taskboard_app::UploadPolicy;
use taskboard_client::ImageUpload;
use taskboard_core::Priority;

use crate::view::check_new_task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FormField {
    Title,
    Description,
    Priority,
    Images,
}

impl FormField {
    pub(super) const ALL: [Self; 4] = [Self::Title, Self::Description, Self::Priority, Self::Images];

    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Priority,
            Self::Priority => Self::Images,
            Self::Images => Self::Title,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Images,
            Self::Description => Self::Title,
            Self::Priority => Self::Description,
            Self::Images => Self::Priority,
        }
    }

    pub(super) const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Priority => "Priority",
            Self::Images => "Images",
        }
    }
}

/// Validated form contents, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Draft {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) priority: Priority,
    pub(super) images: Vec<ImageUpload>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct NewTaskForm {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) priority: Priority,
    /// Comma-separated image paths.
    pub(super) images: String,
    pub(super) focus: FormField,
}

impl NewTaskForm {
    pub(super) const fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            images: String::new(),
            focus: FormField::Title,
        }
    }

    pub(super) const fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub(super) const fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub(super) const fn raise_priority(&mut self) {
        self.priority = match self.priority {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        };
    }

    pub(super) const fn lower_priority(&mut self) {
        self.priority = match self.priority {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        };
    }

    pub(super) fn input(&mut self, ch: char) {
        match self.focus {
            FormField::Title => self.title.push(ch),
            FormField::Description => self.description.push(ch),
            FormField::Images => self.images.push(ch),
            FormField::Priority if ch == ' ' => self.raise_priority(),
            FormField::Priority => {}
        }
    }

    pub(super) fn backspace(&mut self) {
        match self.focus {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Images => {
                self.images.pop();
            }
            FormField::Priority => {}
        }
    }

    /// Text shown for `field`.
    pub(super) fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Priority => self.priority.label(),
            FormField::Images => &self.images,
        }
    }

    fn image_paths(&self) -> impl Iterator<Item = &str> {
        self.images.split(',').map(str::trim).filter(|path| !path.is_empty())
    }

    /// Read the listed images and check the submission against `policy`.
    ///
    /// Nothing is sent when this fails; the error is the reason to show.
    pub(super) fn submit(&self, policy: &UploadPolicy) -> Result<Draft, String> {
        let images = self
            .image_paths()
            .map(|path| {
                ImageUpload::from_path_within(path, policy.max_file_size)
                    .map_err(|err| format!("Could not read {path}: {err}"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        check_new_task(&self.title, &images, policy)?;
        Ok(Draft {
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            priority: self.priority,
            images,
        })
    }
}
