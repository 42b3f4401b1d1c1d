//! Converts failed backend calls into notifications.

use taskboard_client::AppError;
use tracing::{error, warn};

use crate::notification::NotificationCenter;

/// Log `err` with its operation context and surface it to the user.
///
/// Validation failures become warnings; every other kind becomes an error.
/// The notification reads `"<context>: <user message>"`.
pub fn report(notifications: &mut NotificationCenter, context: &str, err: &AppError) {
    let text = format!("{context}: {}", err.user_message());
    if err.is_validation() {
        warn!(context, kind = %err.kind(), status = err.status(), error = %err, "request rejected");
        notifications.show_warning(text, None);
    } else {
        error!(context, kind = %err.kind(), status = err.status(), error = %err, "request failed");
        notifications.show_error(text, None);
    }
}
