//! Open-action resolution.

use tap_core::{LaunchUrl, OpenAction, OpenSettings, PushPayload};

use crate::{PreviewDetector, SettingsSource};

/// Detects in-app message preview pushes by their additional-data marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct InAppPreviewDetector;

impl PreviewDetector for InAppPreviewDetector {
    fn is_preview(&self, payload: &PushPayload) -> bool {
        payload.custom_data().is_in_app_preview()
    }
}

/// Resolves payloads against a settings source.
#[derive(Debug, Clone)]
pub struct OpenResolver<S, D = InAppPreviewDetector> {
    settings: S,
    detector: D,
}

impl<S> OpenResolver<S>
where
    S: SettingsSource,
{
    /// Create a resolver using the in-app preview marker.
    pub fn new(settings: S) -> Self {
        Self {
            settings,
            detector: InAppPreviewDetector,
        }
    }
}

impl<S, D> OpenResolver<S, D>
where
    S: SettingsSource,
    D: PreviewDetector,
{
    /// Create a resolver with a custom preview detector.
    pub fn with_detector(settings: S, detector: D) -> Self {
        Self { settings, detector }
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Decide what tapping this notification does.
    ///
    /// Settings are read once per call.
    pub fn resolve(&self, payload: &PushPayload) -> OpenAction {
        resolve_with(payload, &self.settings.snapshot(), &self.detector)
    }
}

/// Decide what tapping a notification does, using the in-app preview marker.
pub fn resolve(payload: &PushPayload, settings: &OpenSettings) -> OpenAction {
    resolve_with(payload, settings, &InAppPreviewDetector)
}

/// Decide what tapping a notification does.
///
/// Never fails: malformed payload fields resolve to no browser URL.
pub fn resolve_with<D>(payload: &PushPayload, settings: &OpenSettings, detector: &D) -> OpenAction
where
    D: PreviewDetector + ?Sized,
{
    // Previews exist to show in-app content, so they open the app regardless.
    let should_open_app = detector.is_preview(payload) || settings.open_app_on_notification_click;
    let browser_url = browser_url(payload, settings);

    tracing::trace!(should_open_app, browser_url = ?browser_url, "resolved open action");

    OpenAction::new(should_open_app, browser_url)
}

fn browser_url(payload: &PushPayload, settings: &OpenSettings) -> Option<LaunchUrl> {
    if settings.suppress_launch_url {
        return None;
    }
    payload.custom_data().launch_url()
}
