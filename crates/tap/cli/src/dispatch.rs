//! Dispatcher that prints the actions it would take.

use tap_core::{BrowserKind, LaunchUrl};
use tap_resolve::Dispatcher;

const OPEN_APP_LINE: &str = "open-app";

/// Writes each dispatched action to stdout, one per line.
pub struct PrintDispatcher;

impl Dispatcher for PrintDispatcher {
    async fn open_app(&self) -> color_eyre::eyre::Result<()> {
        println!("{OPEN_APP_LINE}");
        Ok(())
    }

    async fn open_browser(&self, url: &LaunchUrl) -> color_eyre::eyre::Result<()> {
        println!("{}", browser_line(url));
        Ok(())
    }
}

fn browser_line(url: &LaunchUrl) -> String {
    let intent = url.browser_intent();
    let kind = match intent.kind {
        BrowserKind::View => "view",
        BrowserKind::AppBrowser => "app-browser",
    };
    format!("open-browser {kind} {}", intent.url)
}

#[cfg(test)]
mod tests {
    use tap_core::{OpenSettings, PushPayload};
    use tap_resolve::{ClickHandler, OpenResolver};

    use super::*;

    #[test]
    fn test_browser_line() {
        let line = |s: &str| browser_line(&LaunchUrl::parse(s).unwrap());
        assert_eq!(line("example.com/a"), "open-browser view http://example.com/a");
        assert_eq!(line("https://example.com"), "open-browser view https://example.com");
        assert_eq!(
            line("data:text/plain,hi"),
            "open-browser app-browser data:text/plain,hi"
        );
    }

    #[tokio::test]
    async fn test_print_dispatcher_handles_tap() {
        let handler = ClickHandler::new(OpenResolver::new(OpenSettings::default()), PrintDispatcher);
        let payload =
            PushPayload::from_json_str(r#"{"custom":"{\"u\":\"example.com\"}"}"#).unwrap();

        let action = handler.handle(&payload).await.unwrap();
        assert!(action.should_open_app);
        assert_eq!(action.browser_url.unwrap().as_str(), "example.com");
    }
}
