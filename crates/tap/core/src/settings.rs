//! App-level open settings.

/// Preferences controlling what a notification tap does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpenSettings {
    /// Bring the app to the foreground when a notification is tapped.
    #[serde(default = "default_open_app")]
    pub open_app_on_notification_click: bool,
    /// Never open a notification's launch URL in a browser.
    #[serde(default)]
    pub suppress_launch_url: bool,
}

fn default_open_app() -> bool {
    true
}

impl Default for OpenSettings {
    fn default() -> Self {
        Self {
            open_app_on_notification_click: default_open_app(),
            suppress_launch_url: false,
        }
    }
}
