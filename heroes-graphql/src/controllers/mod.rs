//! Bridge between resolvers and the downstream controllers.
//!
//! Controllers never see the real outbound response. Each invocation gets a
//! scratch response; the TTL header the controller leaves on it is merged into
//! the [`RequestContext`] once the call succeeds.

mod rest;

use std::sync::Arc;

use http::request::Parts;
use serde_json::Value;
use strum_macros::Display;
use tower::BoxError;
use tracing::Instrument;

pub use self::rest::RestBackend;
use crate::context::RequestContext;
use crate::domain::HeroKey;
use crate::domain::Locale;
use crate::domain::Role;

/// The downstream controllers the façade knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ControllerKind {
    ListHeroes,
    GetHero,
}

/// Parameters of the list controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListHeroesParams {
    pub role: Option<Role>,
    pub locale: Locale,
}

/// Parameters of the detail controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetHeroParams {
    pub key: HeroKey,
    pub locale: Locale,
}

/// A downstream request/response controller.
///
/// A controller may suggest a cache lifetime by setting the configured TTL
/// header on `response`.
#[async_trait::async_trait]
pub trait Controller<P>: Send + Sync
where
    P: Send + 'static,
{
    async fn process_request(
        &self,
        request: &Parts,
        response: &mut http::Response<()>,
        params: P,
    ) -> Result<Value, BoxError>;
}

/// The controllers resolvers dispatch to.
#[derive(Clone)]
pub struct Controllers {
    list_heroes: Arc<dyn Controller<ListHeroesParams>>,
    get_hero: Arc<dyn Controller<GetHeroParams>>,
}

impl Controllers {
    pub fn new(
        list_heroes: Arc<dyn Controller<ListHeroesParams>>,
        get_hero: Arc<dyn Controller<GetHeroParams>>,
    ) -> Self {
        Self {
            list_heroes,
            get_hero,
        }
    }

    pub async fn list_heroes(
        &self,
        context: &RequestContext,
        params: ListHeroesParams,
    ) -> Result<Value, BoxError> {
        invoke(
            context,
            ControllerKind::ListHeroes,
            self.list_heroes.as_ref(),
            params,
        )
        .await
    }

    pub async fn get_hero(
        &self,
        context: &RequestContext,
        params: GetHeroParams,
    ) -> Result<Value, BoxError> {
        invoke(
            context,
            ControllerKind::GetHero,
            self.get_hero.as_ref(),
            params,
        )
        .await
    }
}

/// Runs a controller and merges the TTL it suggests into the context.
///
/// Errors are returned as raised by the controller; a failed call merges nothing.
pub async fn invoke<P>(
    context: &RequestContext,
    kind: ControllerKind,
    controller: &dyn Controller<P>,
    params: P,
) -> Result<Value, BoxError>
where
    P: Send + 'static,
{
    let mut scratch = http::Response::new(());
    let payload = controller
        .process_request(context.request(), &mut scratch, params)
        .instrument(tracing::debug_span!("controller", controller = %kind))
        .await?;

    let ttl_header = scratch
        .headers()
        .get(context.cache_ttl_header())
        .and_then(|value| value.to_str().ok());
    context.merge_cache_ttl(ttl_header);

    Ok(payload)
}
