//! User Notices
//!
//! Blocking messages shown to the shopper.

/// Where user-facing messages go
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Browser `alert()` dialog
#[derive(Clone, Copy, Debug, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}
