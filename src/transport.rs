// packages/kodegen-helicone-session/src/transport.rs
use crate::{ClientError, SessionTracker};
use reqwest::{Body, Method, Request, Response, Url, header::HeaderMap};
use std::future::Future;
use tracing::debug;

/// Request executor with a fixed `(request) -> response` shape
///
/// Implemented for [`reqwest::Client`]. [`SessionFetch`] implements it as well, so
/// decorators can be stacked and handed to anything expecting a transport.
pub trait Transport: Send + Sync {
    /// Send `request` and return the response
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, reqwest::Error>> + Send;
}

impl Transport for reqwest::Client {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, reqwest::Error>> + Send {
        reqwest::Client::execute(self, request)
    }
}

/// Method, headers and body of a request, without the target URL
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    /// Options for a request with the given method and no headers or body
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Transport decorator that tags requests with Helicone session headers
///
/// Every request passing through gets `Helicone-Session-Id` and
/// `Helicone-Session-Name` from the tracker's latest snapshot, unless the caller
/// already set them. URL, method and body are forwarded untouched.
///
/// # Example
///
/// ```ignore
/// let tracker = SessionTracker::new();
/// let fetch = SessionFetch::new(reqwest::Client::new(), tracker.clone());
///
/// tracker.handle_event(SessionEvent::created(Session::new("ses_123").with_title("Fix CI")));
/// let response = fetch.fetch(url, RequestOptions::new(Method::POST).body(payload)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SessionFetch<T = reqwest::Client> {
    inner: T,
    tracker: SessionTracker,
}

impl<T: Transport> SessionFetch<T> {
    pub fn new(inner: T, tracker: SessionTracker) -> Self {
        Self { inner, tracker }
    }

    #[must_use]
    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    #[must_use]
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Send a request to `url` described by `options`
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` with the underlying transport error unchanged.
    pub async fn fetch(&self, url: Url, options: RequestOptions) -> Result<Response, ClientError> {
        let RequestOptions {
            method,
            headers,
            body,
        } = options;

        let mut request = Request::new(method, url);
        *request.headers_mut() = headers;
        if let Some(body) = body {
            *request.body_mut() = Some(Body::from(body));
        }

        Transport::execute(self, request)
            .await
            .map_err(ClientError::from)
    }
}

impl<T: Transport> Transport for SessionFetch<T> {
    fn execute(
        &self,
        mut request: Request,
    ) -> impl Future<Output = Result<Response, reqwest::Error>> + Send {
        self.tracker.apply_headers(request.headers_mut());
        debug!(
            method = %request.method(),
            url = %request.url(),
            "Sending request with Helicone session headers"
        );
        self.inner.execute(request)
    }
}
