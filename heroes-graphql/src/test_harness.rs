//! In-memory controllers and fixtures, so resolvers can be exercised without a backend.
//!
//! Example running one query against canned controllers:
//!
//! ```ignore
//! let list_heroes = Arc::new(FakeController::<ListHeroesParams>::returning(json!([
//!     test_harness::hero_short_payload(HeroKey::Ana, Role::Support),
//! ])));
//! let get_hero = Arc::new(FakeController::<GetHeroParams>::failing("not used"));
//! let schema = graphql::schema(Controllers::new(list_heroes, get_hero), Locale::EnglishUs)?;
//! let response = schema
//!     .execute(async_graphql::Request::new("{ heroes { key } }").data(test_harness::request_context()))
//!     .await;
//! ```
use http::HeaderName;
use http::HeaderValue;
use http::request::Parts;
use parking_lot::Mutex;
use serde_json::Value;
use serde_json::json;
use tower::BoxError;

use crate::configuration::DEFAULT_CACHE_TTL_HEADER;
use crate::context::OutboundResponse;
use crate::context::RequestContext;
use crate::controllers::Controller;
use crate::domain::HeroKey;
use crate::domain::Role;
use crate::domain::ValueCode;

/// The default TTL header, as a [`HeaderName`].
pub const CACHE_TTL_HEADER: HeaderName = HeaderName::from_static(DEFAULT_CACHE_TTL_HEADER);

type Responder<P> = Box<dyn Fn(&P) -> Result<http::Response<Value>, BoxError> + Send + Sync>;

/// A controller answering from a closure and recording every call it receives.
///
/// Headers of the response built by the closure are copied onto the response
/// handed to the controller, so the closure decides which TTL is suggested.
pub struct FakeController<P> {
    responder: Responder<P>,
    calls: Mutex<Vec<P>>,
}

impl<P> FakeController<P>
where
    P: Clone + Send + Sync + 'static,
{
    pub fn new(
        responder: impl Fn(&P) -> Result<http::Response<Value>, BoxError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always returns `payload`, without suggesting a TTL.
    pub fn returning(payload: Value) -> Self {
        Self::new(move |_| Ok(http::Response::new(payload.clone())))
    }

    /// Always returns `payload`, suggesting `ttl` through the default TTL header.
    pub fn returning_with_ttl(payload: Value, ttl: &'static str) -> Self {
        Self::new(move |_| Ok(with_ttl(payload.clone(), ttl)))
    }

    /// Always fails with `message`.
    pub fn failing(message: &'static str) -> Self {
        Self::new(move |_| Err(message.into()))
    }

    /// Parameters of every call received so far.
    pub fn calls(&self) -> Vec<P> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait::async_trait]
impl<P> Controller<P> for FakeController<P>
where
    P: Clone + Send + Sync + 'static,
{
    async fn process_request(
        &self,
        _request: &Parts,
        response: &mut http::Response<()>,
        params: P,
    ) -> Result<Value, BoxError> {
        self.calls.lock().push(params.clone());
        let (parts, payload) = (self.responder)(&params)?.into_parts();
        response.headers_mut().extend(parts.headers);
        Ok(payload)
    }
}

/// A controller response carrying `payload` and suggesting `ttl`.
pub fn with_ttl(payload: Value, ttl: &'static str) -> http::Response<Value> {
    let mut response = http::Response::new(payload);
    response
        .headers_mut()
        .insert(CACHE_TTL_HEADER, HeaderValue::from_static(ttl));
    response
}

/// A fresh context for one operation, using the default TTL header.
pub fn request_context() -> RequestContext {
    let (request, ()) = http::Request::new(()).into_parts();
    RequestContext::new(request, OutboundResponse::default(), CACHE_TTL_HEADER)
}

/// A list controller item for `key`.
pub fn hero_short_payload(key: HeroKey, role: Role) -> Value {
    json!({
        "key": key.code(),
        "name": format!("{key:?}"),
        "portrait": format!("https://example.com/{}.png", key.code()),
        "role": role.code(),
    })
}

/// A detail controller payload for `key`.
pub fn hero_detail_payload(key: HeroKey, role: Role) -> Value {
    json!({
        "name": format!("{key:?}"),
        "description": "Support sniper",
        "portrait": format!("https://example.com/{}-detail.png", key.code()),
        "role": role.code(),
        "location": "Cairo, Egypt",
        "age": 60,
        "birthday": "1 Jan",
        "hitpoints": {
            "health": 200,
            "armor": 0,
            "shields": 0,
            "total": 200,
        },
        "abilities": [
            {
                "name": "Biotic Rifle",
                "description": "Shoots darts.",
                "icon": "https://example.com/biotic-rifle.png",
                "video": {
                    "thumbnail": "https://example.com/biotic-thumb.jpg",
                    "link": {
                        "mp4": "https://example.com/biotic.mp4",
                        "webm": "https://example.com/biotic.webm",
                    },
                },
            }
        ],
        "story": {
            "summary": "Ana supporting the overwatch taskforce.",
            "media": {
                "type": "video",
                "link": "https://youtu.be/example",
            },
            "chapters": [
                {
                    "title": "Origins",
                    "content": "Ana's origin story.",
                    "picture": "https://example.com/origins.jpg",
                }
            ],
        },
    })
}
