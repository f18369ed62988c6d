// packages/kodegen-helicone-session/src/config.rs
use crate::{ClientError, SessionFetch, SessionTracker, tracker::DEFAULT_FALLBACK_PREFIX};
use reqwest::Url;
use std::time::Duration;

/// Provider id under which the host routes requests through the Helicone gateway
pub const PROVIDER_ID: &str = "helicone";

/// Default Helicone gateway for Anthropic-compatible requests
pub const DEFAULT_BASE_URL: &str = "https://anthropic.helicone.ai";

/// Default request timeout applied to the underlying HTTP client
///
/// LLM completions routinely stream for well over a minute, so this is generous.
/// Use [`HeliconeSessionBuilder::timeout`] for tighter limits.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Builder for a Helicone-bound HTTP client with session tracking
///
/// # Example
///
/// ```ignore
/// use kodegen_helicone_session::HeliconeSessionBuilder;
/// use std::time::Duration;
///
/// let helicone = HeliconeSessionBuilder::new()
///     .base_url("https://oai.helicone.ai")
///     .timeout(Duration::from_secs(60))
///     .fallback_prefix("Agent run")
///     .build()?;
///
/// // Forward host session events
/// helicone.tracker().handle_host_event(&event)?;
///
/// // Every request through `fetch()` now carries the session headers
/// let url = helicone.endpoint("v1/messages")?;
/// ```
#[derive(Debug, Clone)]
pub struct HeliconeSessionBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    fallback_prefix: String,
    tracker: Option<SessionTracker>,
}

impl Default for HeliconeSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeliconeSessionBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            fallback_prefix: DEFAULT_FALLBACK_PREFIX.to_string(),
            tracker: None,
        }
    }

    /// Set the Helicone gateway base URL
    ///
    /// Default is `https://anthropic.helicone.ai`.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout on the underlying HTTP client
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom `User-Agent`
    ///
    /// Default is "kodegen-helicone-session/<version>".
    #[must_use]
    pub fn user_agent(mut self, name: impl Into<String>) -> Self {
        self.user_agent = Some(name.into());
        self
    }

    /// Prefix for generated session names when a session has no title
    ///
    /// Ignored when an existing tracker is supplied via [`Self::tracker`].
    #[must_use]
    pub fn fallback_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.fallback_prefix = prefix.into();
        self
    }

    /// Share an existing tracker instead of creating a new one
    #[must_use]
    pub fn tracker(mut self, tracker: SessionTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Build the session-tracking client
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if:
    /// - The base URL cannot be parsed
    /// - The base URL scheme is not `http` or `https`
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<HeliconeSession, ClientError> {
        let base_url = Url::parse(self.base_url.trim()).map_err(|e| ClientError::Config {
            message: format!("Invalid Helicone base URL: {e}"),
            value: Some(self.base_url.clone()),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::Config {
                message: format!(
                    "Unsupported scheme '{}' for Helicone base URL, expected http or https",
                    base_url.scheme()
                ),
                value: Some(self.base_url),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.unwrap_or_else(|| {
                format!("kodegen-helicone-session/{}", env!("CARGO_PKG_VERSION"))
            }))
            .build()?;

        let tracker = self
            .tracker
            .unwrap_or_else(|| SessionTracker::with_fallback_prefix(self.fallback_prefix));

        Ok(HeliconeSession {
            base_url,
            fetch: SessionFetch::new(client, tracker),
        })
    }
}

/// Helicone gateway client with session tracking
///
/// Cheap to clone: the HTTP client and the tracker are both shared handles.
#[derive(Debug, Clone)]
pub struct HeliconeSession {
    base_url: Url,
    fetch: SessionFetch,
}

impl HeliconeSession {
    /// Builder with default configuration
    pub fn builder() -> HeliconeSessionBuilder {
        HeliconeSessionBuilder::new()
    }

    /// Tracker to feed host session events into
    #[must_use]
    pub fn tracker(&self) -> &SessionTracker {
        self.fetch.tracker()
    }

    /// Header-injecting transport to hand to the provider integration
    #[must_use]
    pub fn fetch(&self) -> &SessionFetch {
        &self.fetch
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` against the gateway base URL
    ///
    /// The base URL is treated as a directory, so `https://host/proxy` joined
    /// with `v1/messages` gives `https://host/proxy/v1/messages`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Config {
                message: format!("Invalid Helicone endpoint path: {e}"),
                value: Some(path.to_string()),
            })
    }
}
