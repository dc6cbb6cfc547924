//! Transport-neutral request snapshot

use super::ip_resolver::ClientIpResolver;
use conditionlet_core::{ContextError, RequestContext};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

/// Header map with case-insensitive names
///
/// Names are stored lower-cased. Inserting a name twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.inner
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Request attributes captured by the host before evaluation
///
/// # Example
///
/// ```rust
/// use conditionlet_core::RequestContext;
/// use conditionlet_runtime::HttpRequestContext;
///
/// let ctx = HttpRequestContext::new()
///     .with_peer_addr("10.0.0.9".parse().unwrap())
///     .with_header("X-Forwarded-For", "203.0.113.7, 10.0.0.9")
///     .with_url("https://example.com/products");
///
/// assert_eq!(ctx.resolve_client_ip().unwrap().to_string(), "203.0.113.7");
/// assert_eq!(ctx.header("x-forwarded-for"), Some("203.0.113.7, 10.0.0.9"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpRequestContext {
    peer_addr: Option<IpAddr>,
    headers: Headers,
    url: Option<String>,
    resolver: Arc<ClientIpResolver>,
}

impl HttpRequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address of the connected peer
    pub fn with_peer_addr(mut self, addr: IpAddr) -> Self {
        self.peer_addr = Some(addr);
        self
    }

    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Use a resolver configured with different forwarding headers
    pub fn with_resolver(mut self, resolver: Arc<ClientIpResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}

impl RequestContext for HttpRequestContext {
    fn resolve_client_ip(&self) -> Result<IpAddr, ContextError> {
        self.resolver.resolve(&self.headers, self.peer_addr)
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    fn request_url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
