//! Request context capability
//!
//! Conditionlets never see the transport's request type. The host wraps its
//! request in something implementing [`RequestContext`], which keeps the
//! engine testable with synthetic contexts.

use crate::error::ContextError;
use std::net::IpAddr;

/// Request-time attributes a conditionlet may inspect
pub trait RequestContext: Send + Sync {
    /// Resolve the address of the client that issued the request
    fn resolve_client_ip(&self) -> Result<IpAddr, ContextError>;

    /// Look up a header by name (case-insensitive)
    fn header(&self, name: &str) -> Option<&str>;

    /// Request URL, used only to enrich diagnostics
    fn request_url(&self) -> Option<&str> {
        None
    }
}
