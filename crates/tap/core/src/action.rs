//! Open-action decision types.

/// What to do when the user taps a notification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpenAction {
    /// Bring the host application to the foreground.
    pub should_open_app: bool,
    /// URL to open in an external browser.
    pub browser_url: Option<LaunchUrl>,
}

impl OpenAction {
    /// Create a decision.
    pub fn new(should_open_app: bool, browser_url: Option<LaunchUrl>) -> Self {
        Self {
            should_open_app,
            browser_url,
        }
    }

    /// Check if the tap triggers nothing.
    pub fn is_noop(&self) -> bool {
        !self.should_open_app && self.browser_url.is_none()
    }
}

/// A non-blank URL taken from a notification payload.
///
/// Parsing is lenient: any string with content left after trimming is kept.
/// Whether it is navigable is up to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LaunchUrl(String);

impl LaunchUrl {
    /// Trim a raw URL string, returning `None` if nothing is left.
    ///
    /// Only characters up to and including ASCII space are trimmed.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim_matches(|c: char| c <= ' ');
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URI scheme, if the URL has one.
    pub fn scheme(&self) -> Option<&str> {
        let end = self.0.find([':', '/', '?', '#'])?;
        if end == 0 || !self.0[end..].starts_with(':') {
            return None;
        }
        Some(&self.0[..end])
    }

    /// Browser invocation for this URL.
    ///
    /// URLs without a scheme are opened as `http://`. `data:` URLs go to the
    /// default browser app directly since they cannot be resolved by a view
    /// handler.
    pub fn browser_intent(&self) -> BrowserIntent {
        let scheme = self.scheme().map(str::to_ascii_lowercase);
        match scheme.as_deref() {
            Some("data") => BrowserIntent {
                kind: BrowserKind::AppBrowser,
                url: self.0.clone(),
            },
            Some(_) => BrowserIntent {
                kind: BrowserKind::View,
                url: self.0.clone(),
            },
            None if self.0.contains("://") => BrowserIntent {
                kind: BrowserKind::View,
                url: self.0.clone(),
            },
            None => BrowserIntent {
                kind: BrowserKind::View,
                url: format!("http://{}", self.0),
            },
        }
    }
}

impl std::fmt::Display for LaunchUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LaunchUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How a browser should be launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserKind {
    /// Hand the URL to whatever handles viewing it.
    View,
    /// Launch the default browser app with the URL.
    AppBrowser,
}

/// Navigable browser invocation derived from a [`LaunchUrl`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BrowserIntent {
    pub kind: BrowserKind,
    pub url: String,
}
