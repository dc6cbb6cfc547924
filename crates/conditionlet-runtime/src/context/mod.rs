//! Request context implementations
//!
//! - [`ClientIpResolver`] - finds the client address behind proxies
//! - [`HttpRequestContext`] - a transport-neutral request snapshot

mod http;
mod ip_resolver;

pub use http::{Headers, HttpRequestContext};
pub use ip_resolver::{canonical_ip, ClientIpResolver, DEFAULT_IP_HEADERS};
