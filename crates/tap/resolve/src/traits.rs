//! Collaborator traits.

use tap_core::{LaunchUrl, OpenSettings, PushPayload};

/// Read access to the app's open settings.
pub trait SettingsSource: Send + Sync {
    /// Whether tapping a notification brings the app to the foreground.
    fn open_app_on_click(&self) -> bool;

    /// Whether launch URLs are never opened.
    fn suppress_launch_url(&self) -> bool;

    /// Read both settings at once.
    fn snapshot(&self) -> OpenSettings {
        OpenSettings {
            open_app_on_notification_click: self.open_app_on_click(),
            suppress_launch_url: self.suppress_launch_url(),
        }
    }
}

impl SettingsSource for OpenSettings {
    fn open_app_on_click(&self) -> bool {
        self.open_app_on_notification_click
    }

    fn suppress_launch_url(&self) -> bool {
        self.suppress_launch_url
    }

    fn snapshot(&self) -> OpenSettings {
        *self
    }
}

impl<T: SettingsSource + ?Sized> SettingsSource for &T {
    fn open_app_on_click(&self) -> bool {
        (**self).open_app_on_click()
    }

    fn suppress_launch_url(&self) -> bool {
        (**self).suppress_launch_url()
    }

    fn snapshot(&self) -> OpenSettings {
        (**self).snapshot()
    }
}

impl<T: SettingsSource + ?Sized> SettingsSource for std::sync::Arc<T> {
    fn open_app_on_click(&self) -> bool {
        (**self).open_app_on_click()
    }

    fn suppress_launch_url(&self) -> bool {
        (**self).suppress_launch_url()
    }

    fn snapshot(&self) -> OpenSettings {
        (**self).snapshot()
    }
}

/// Detects preview notifications, which always open the app.
pub trait PreviewDetector: Send + Sync {
    /// Check if a payload is a preview notification.
    fn is_preview(&self, payload: &PushPayload) -> bool;
}

impl<F> PreviewDetector for F
where
    F: Fn(&PushPayload) -> bool + Send + Sync,
{
    fn is_preview(&self, payload: &PushPayload) -> bool {
        self(payload)
    }
}

/// Carries out an open-action decision.
#[trait_variant::make(Send)]
pub trait Dispatcher: Send + Sync {
    /// Bring the host application to the foreground.
    async fn open_app(&self) -> color_eyre::eyre::Result<()>;

    /// Open a URL in an external browser.
    async fn open_browser(&self, url: &LaunchUrl) -> color_eyre::eyre::Result<()>;
}
