use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use taskboard_client::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, Url};
use taskboard_core::DEFAULT_PER_PAGE;

use crate::notification::Severity;
use crate::upload::UploadPolicy;

const CONFIG_DIR: &str = "taskboard";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable selecting the backend origin.
pub const ENV_API_URL: &str = "TASKBOARD_API_URL";

/// Top-level configuration loaded from `<config dir>/taskboard/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Backend access.
    #[serde(default)]
    pub api: ApiConfig,
    /// List paging.
    #[serde(default)]
    pub list: ListConfig,
    /// Filter input behaviour.
    #[serde(default)]
    pub filter: FilterConfig,
    /// Toast display times.
    #[serde(default)]
    pub notification: NotificationConfig,
    /// Image upload limits.
    #[serde(default)]
    pub upload: UploadPolicy,
}

impl AppConfig {
    /// Default location of the configuration file.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load configuration, apply `TASKBOARD_API_URL` and then `api_url`.
    ///
    /// An explicit `path` must exist; the default location may be missing, in
    /// which case built-in defaults are used.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or parsed, or when the
    /// resulting configuration is invalid.
    pub fn load(path: Option<&Path>, api_url: Option<&str>) -> Result<Self> {
        let mut fetch = |key: &'static str| env::var(key).ok();
        Self::resolve(path, Self::default_path(), api_url, &mut fetch)
    }

    fn resolve(
        path: Option<&Path>,
        default_path: Option<PathBuf>,
        api_url: Option<&str>,
        fetch: &mut impl FnMut(&'static str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = match (path, default_path) {
            (Some(path), _) => Self::from_path(path)?,
            (None, Some(path)) if path.exists() => Self::from_path(&path)?,
            (None, _) => Self::default(),
        };
        if let Some(url) = fetch(ENV_API_URL).filter(|url| !url.trim().is_empty()) {
            config.api.base_url = url.trim().to_owned();
        }
        if let Some(url) = api_url {
            config.api.base_url = url.trim().to_owned();
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file without applying overrides or validation.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or is not valid TOML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    /// Returns the first constraint violated.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.list.validate()?;
        if self.filter.debounce_ms == 0 {
            bail!("filter.debounce_ms must be greater than zero");
        }
        if self.upload.max_images == 0 {
            bail!("upload.max_images must be greater than zero");
        }
        if self.upload.max_file_size == 0 {
            bail!("upload.max_file_size must be greater than zero");
        }
        if self.upload.allowed_types.is_empty() {
            bail!("upload.allowed_types must not be empty");
        }
        Ok(())
    }
}

/// `[api]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend origin.
    pub base_url: String,
    /// Whole-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_ms: u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl ApiConfig {
    /// Options for building the HTTP client.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }

    fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .with_context(|| format!("api.base_url '{}' is not a valid URL", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api.base_url must use http or https, got '{}'", url.scheme());
        }
        if url.host_str().is_none() {
            bail!("api.base_url '{}' has no host", self.base_url);
        }
        if self.timeout_ms == 0 {
            bail!("api.timeout_ms must be greater than zero");
        }
        Ok(())
    }
}

/// `[list]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Initial page size.
    pub per_page: u32,
    /// Page sizes offered in the UI.
    pub per_page_options: Vec<u32>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            per_page_options: vec![10, 20, 50],
        }
    }
}

impl ListConfig {
    /// Page size after `current` in the offered list, wrapping around.
    ///
    /// A size not in the list moves to the first option.
    #[must_use]
    pub fn next_per_page(&self, current: u32) -> u32 {
        self.step_per_page(current, 1)
    }

    /// Page size before `current` in the offered list, wrapping around.
    #[must_use]
    pub fn prev_per_page(&self, current: u32) -> u32 {
        self.step_per_page(current, self.per_page_options.len().saturating_sub(1))
    }

    fn step_per_page(&self, current: u32, offset: usize) -> u32 {
        let options = &self.per_page_options;
        if options.is_empty() {
            return current;
        }
        options
            .iter()
            .position(|size| *size == current)
            .map_or(options[0], |index| options[(index + offset) % options.len()])
    }

    fn validate(&self) -> Result<()> {
        if self.per_page_options.is_empty() {
            bail!("list.per_page_options must not be empty");
        }
        if self.per_page_options.contains(&0) {
            bail!("list.per_page_options must not contain zero");
        }
        if self.per_page == 0 {
            bail!("list.per_page must be greater than zero");
        }
        if !self.per_page_options.contains(&self.per_page) {
            bail!(
                "list.per_page {} is not one of list.per_page_options {:?}",
                self.per_page,
                self.per_page_options
            );
        }
        Ok(())
    }
}

/// `[filter]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Quiet time before search input is applied, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

impl FilterConfig {
    /// Debounce window.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// `[notification]` section: default display time per severity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Success toasts, in milliseconds.
    pub success_ms: u64,
    /// Error toasts, in milliseconds.
    pub error_ms: u64,
    /// Warning toasts, in milliseconds.
    pub warning_ms: u64,
    /// Info toasts, in milliseconds.
    pub info_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            success_ms: 3000,
            error_ms: 6000,
            warning_ms: 5000,
            info_ms: 4000,
        }
    }
}

impl NotificationConfig {
    /// Default display time for `severity`.
    #[must_use]
    pub const fn duration_for(&self, severity: Severity) -> Duration {
        let millis = match severity {
            Severity::Success => self.success_ms,
            Severity::Error => self.error_ms,
            Severity::Warning => self.warning_ms,
            Severity::Info => self.info_ms,
        };
        Duration::from_millis(millis)
    }
}
