//! Blocking browser dialogs used for server errors and destructive actions.

pub fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

/// `false` when there is no window or the user cancels.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Reports a failed mutation: logged to the console, shown to the user.
pub fn alert_error(action: &str, error: &str) {
    log::warn!("{} failed: {}", action, error);
    alert(&format!("Error: {}", error));
}
