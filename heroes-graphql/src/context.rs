//! Per-operation state shared by every resolver of one GraphQL operation.
use std::sync::Arc;

use http::HeaderMap;
use http::HeaderName;
use http::HeaderValue;
use http::request::Parts;
use parking_lot::Mutex;

/// Headers of the real outbound HTTP response.
///
/// The transport keeps a clone and copies the headers onto the HTTP response
/// once the operation has resolved.
#[derive(Clone, Debug, Default)]
pub struct OutboundResponse {
    headers: Arc<Mutex<HeaderMap>>,
}

impl OutboundResponse {
    /// A snapshot of the headers written so far.
    pub fn headers(&self) -> HeaderMap {
        self.headers.lock().clone()
    }

    fn insert(&self, name: HeaderName, value: HeaderValue) {
        self.headers.lock().insert(name, value);
    }
}

/// Context of one GraphQL operation.
///
/// Downstream calls report the cache TTL they suggest through
/// [`merge_cache_ttl`](Self::merge_cache_ttl); the context keeps the lowest one
/// and mirrors it on the outbound response.
#[derive(Debug)]
pub struct RequestContext {
    request: Parts,
    response: OutboundResponse,
    cache_ttl: Mutex<Option<u64>>,
    cache_ttl_header: HeaderName,
}

impl RequestContext {
    pub fn new(request: Parts, response: OutboundResponse, cache_ttl_header: HeaderName) -> Self {
        Self {
            request,
            response,
            cache_ttl: Mutex::new(None),
            cache_ttl_header,
        }
    }

    /// The inbound HTTP request.
    pub fn request(&self) -> &Parts {
        &self.request
    }

    /// The outbound HTTP response.
    pub fn response(&self) -> &OutboundResponse {
        &self.response
    }

    /// Name of the header carrying the TTL signal, both from controllers and to clients.
    pub fn cache_ttl_header(&self) -> &HeaderName {
        &self.cache_ttl_header
    }

    /// The lowest TTL merged so far.
    pub fn cache_ttl(&self) -> Option<u64> {
        *self.cache_ttl.lock()
    }

    /// Keeps the smallest cache TTL across all downstream calls.
    ///
    /// Missing or malformed values are ignored: a broken caching signal must
    /// never fail the operation.
    pub fn merge_cache_ttl(&self, ttl_header: Option<&str>) {
        let Some(ttl_header) = ttl_header else {
            return;
        };
        let Some(ttl) = parse_ttl(ttl_header) else {
            tracing::warn!(
                header = %self.cache_ttl_header,
                value = ttl_header,
                "ignoring malformed cache TTL"
            );
            return;
        };

        let mut cache_ttl = self.cache_ttl.lock();
        if cache_ttl.is_none_or(|current| ttl < current) {
            tracing::debug!(ttl, previous = ?*cache_ttl, "lowering response cache TTL");
            *cache_ttl = Some(ttl);
            self.response
                .insert(self.cache_ttl_header.clone(), HeaderValue::from(ttl));
        }
    }
}

fn parse_ttl(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}
