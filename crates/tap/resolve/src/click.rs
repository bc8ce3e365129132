//! Notification tap handling.

use color_eyre::eyre::WrapErr as _;
use tap_core::{OpenAction, PushPayload};

use crate::{Dispatcher, InAppPreviewDetector, OpenResolver, PreviewDetector, SettingsSource};

/// Resolves taps and carries out the decision.
pub struct ClickHandler<S, X, D = InAppPreviewDetector> {
    resolver: OpenResolver<S, D>,
    dispatcher: X,
}

impl<S, X, D> ClickHandler<S, X, D>
where
    S: SettingsSource,
    X: Dispatcher,
    D: PreviewDetector,
{
    /// Create a new click handler.
    pub fn new(resolver: OpenResolver<S, D>, dispatcher: X) -> Self {
        Self {
            resolver,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &X {
        &self.dispatcher
    }

    /// Handle a tap on the notification carrying `payload`.
    ///
    /// The browser is opened before the app is brought forward so the
    /// browser ends up on top.
    pub async fn handle(&self, payload: &PushPayload) -> color_eyre::eyre::Result<OpenAction> {
        let action = self.resolver.resolve(payload);
        let custom = payload.custom_data();

        tracing::info!(
            notification_id = custom.notification_id(),
            open_app = action.should_open_app,
            browser_url = action.browser_url.as_ref().map(|u| u.as_str()),
            "notification opened"
        );

        if let Some(url) = &action.browser_url {
            self.dispatcher
                .open_browser(url)
                .await
                .wrap_err_with(|| format!("failed to open {url} in browser"))?;
        }

        if action.should_open_app {
            self.dispatcher
                .open_app()
                .await
                .wrap_err("failed to open app")?;
        }

        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tap_core::{LaunchUrl, OpenSettings};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Dispatched {
        OpenApp,
        OpenBrowser(String),
    }

    #[derive(Default)]
    struct RecordingDispatcher {
        calls: Mutex<Vec<Dispatched>>,
        fail_browser: bool,
        fail_app: bool,
    }

    impl RecordingDispatcher {
        fn calls(&self) -> Vec<Dispatched> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Dispatcher for RecordingDispatcher {
        async fn open_app(&self) -> color_eyre::eyre::Result<()> {
            if self.fail_app {
                color_eyre::eyre::bail!("launcher unavailable");
            }
            self.calls.lock().unwrap().push(Dispatched::OpenApp);
            Ok(())
        }

        async fn open_browser(&self, url: &LaunchUrl) -> color_eyre::eyre::Result<()> {
            if self.fail_browser {
                color_eyre::eyre::bail!("no browser installed");
            }
            self.calls
                .lock()
                .unwrap()
                .push(Dispatched::OpenBrowser(url.to_string()));
            Ok(())
        }
    }

    fn handler(
        open_app: bool,
        suppress: bool,
        dispatcher: RecordingDispatcher,
    ) -> ClickHandler<OpenSettings, RecordingDispatcher> {
        let settings = OpenSettings {
            open_app_on_notification_click: open_app,
            suppress_launch_url: suppress,
        };
        ClickHandler::new(OpenResolver::new(settings), dispatcher)
    }

    fn url_payload() -> PushPayload {
        serde_json::from_value(serde_json::json!({
            "custom": r#"{"i":"n-1","u":"https://example.com"}"#,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_dispatches_browser_then_app() {
        let handler = handler(true, false, RecordingDispatcher::default());
        let action = handler.handle(&url_payload()).await.unwrap();

        assert!(action.should_open_app);
        assert_eq!(
            handler.dispatcher().calls(),
            vec![
                Dispatched::OpenBrowser("https://example.com".into()),
                Dispatched::OpenApp,
            ]
        );
    }

    #[tokio::test]
    async fn test_dispatches_nothing_for_noop() {
        let handler = handler(false, true, RecordingDispatcher::default());
        let action = handler.handle(&url_payload()).await.unwrap();

        assert!(action.is_noop());
        assert!(handler.dispatcher().calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payload_opens_app_only() {
        let handler = handler(true, false, RecordingDispatcher::default());
        let payload: PushPayload =
            serde_json::from_value(serde_json::json!({ "custom": "{oops" })).unwrap();
        handler.handle(&payload).await.unwrap();

        assert_eq!(handler.dispatcher().calls(), vec![Dispatched::OpenApp]);
    }

    #[tokio::test]
    async fn test_dispatcher_error_propagates() {
        let dispatcher = RecordingDispatcher {
            fail_browser: true,
            ..Default::default()
        };
        let handler = handler(true, false, dispatcher);
        let err = handler.handle(&url_payload()).await.unwrap_err();

        assert!(format!("{err:#}").contains("no browser installed"));
        assert!(handler.dispatcher().calls().is_empty());
    }

    #[tokio::test]
    async fn test_open_app_error_propagates() {
        let dispatcher = RecordingDispatcher {
            fail_app: true,
            ..Default::default()
        };
        let handler = handler(true, false, dispatcher);
        let err = handler.handle(&url_payload()).await.unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("failed to open app"));
        assert!(message.contains("launcher unavailable"));
        // the browser was already opened before the app failed
        assert_eq!(
            handler.dispatcher().calls(),
            vec![Dispatched::OpenBrowser("https://example.com".into())]
        );
    }
}
