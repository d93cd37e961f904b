use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::Context;
use async_graphql::ErrorExtensions;
use async_graphql::Object;
use parking_lot::Mutex;
use tokio::sync::OnceCell;

use super::crosswalk::Crosswalk;
use super::types::HeroDetails;
use super::types::HeroKeyEnum;
use super::types::LocaleEnum;
use super::types::RoleEnum;
use crate::context::RequestContext;
use crate::controllers::ControllerKind;
use crate::controllers::Controllers;
use crate::controllers::GetHeroParams;
use crate::controllers::ListHeroesParams;
use crate::domain::Hero;
use crate::domain::HeroKey;
use crate::domain::HeroShort;
use crate::error::HeroesError;

/// Shared by every operation of a schema: where resolvers send their calls.
pub struct HeroesResolver {
    controllers: Controllers,
    default_locale: LocaleEnum,
}

impl HeroesResolver {
    pub fn new(controllers: Controllers, default_locale: LocaleEnum) -> Self {
        Self {
            controllers,
            default_locale,
        }
    }

    /// Lists heroes, keeping only `keys` (in the given order) when it is not empty.
    pub async fn list(
        &self,
        context: &RequestContext,
        role: Option<RoleEnum>,
        locale: Option<LocaleEnum>,
        keys: &[HeroKeyEnum],
    ) -> Result<Vec<HeroNode>, HeroesError> {
        let params = ListHeroesParams {
            role: role.map(Crosswalk::to_domain),
            locale: locale.unwrap_or(self.default_locale).to_domain(),
        };
        let payload = self
            .controllers
            .list_heroes(context, params)
            .await
            .map_err(HeroesError::downstream(ControllerKind::ListHeroes))?;

        let heroes = HeroShort::parse_list(payload)?
            .into_iter()
            .map(Arc::new)
            .collect();
        let keys: Vec<HeroKey> = keys.iter().map(|key| key.to_domain()).collect();

        Ok(filter_by_keys(heroes, &keys)
            .into_iter()
            .map(HeroNode::new)
            .collect())
    }

    /// Details of `node` in `locale`, fetched at most once per node and locale.
    pub async fn details(
        &self,
        context: &RequestContext,
        node: &HeroNode,
        locale: Option<LocaleEnum>,
    ) -> Result<Arc<Hero>, HeroesError> {
        node.get_details(
            context,
            &self.controllers,
            locale.unwrap_or(self.default_locale),
        )
        .await
    }
}

/// Keeps the heroes whose key is in `keys`, in the order of `keys`.
///
/// Unknown keys are skipped and repeated keys yield the hero once per repetition.
/// An empty `keys` keeps everything in downstream order.
fn filter_by_keys(heroes: Vec<Arc<HeroShort>>, keys: &[HeroKey]) -> Vec<Arc<HeroShort>> {
    if keys.is_empty() {
        return heroes;
    }

    // last write wins on duplicate downstream keys
    let by_key: HashMap<HeroKey, Arc<HeroShort>> =
        heroes.into_iter().map(|hero| (hero.key, hero)).collect();
    keys.iter()
        .filter_map(|key| by_key.get(key).cloned())
        .collect()
}

pub struct Query;

#[Object]
impl Query {
    /// List heroes, optionally filtering by role or key.
    async fn heroes(
        &self,
        ctx: &Context<'_>,
        role: Option<RoleEnum>,
        #[graphql(desc = "Locale of the returned texts. Omitted or null means the configured default locale.")]
        locale: Option<LocaleEnum>,
        keys: Option<Vec<HeroKeyEnum>>,
    ) -> async_graphql::Result<Vec<HeroNode>> {
        let context = ctx.data::<RequestContext>()?;
        let resolver = ctx.data::<HeroesResolver>()?;
        resolver
            .list(context, role, locale, keys.as_deref().unwrap_or_default())
            .await
            .map_err(|error| error.extend())
    }
}

/// A hero in a `heroes` result.
///
/// Details are fetched lazily and memoized per locale on this node only.
pub struct HeroNode {
    hero: Arc<HeroShort>,
    details: Mutex<HashMap<LocaleEnum, Arc<OnceCell<Arc<Hero>>>>>,
}

impl HeroNode {
    pub fn new(hero: Arc<HeroShort>) -> Self {
        Self {
            hero,
            details: Mutex::new(HashMap::new()),
        }
    }

    /// Details of this hero in `locale`.
    ///
    /// A cached entry is returned as is, without calling the controller nor
    /// touching `context`.
    pub async fn get_details(
        &self,
        context: &RequestContext,
        controllers: &Controllers,
        locale: LocaleEnum,
    ) -> Result<Arc<Hero>, HeroesError> {
        // one cell per locale: aliases of a locale share a fetch, other locales do not wait
        let cell = self.details.lock().entry(locale).or_default().clone();
        if let Some(hero) = cell.get() {
            tracing::debug!(hero = %self.hero.key, ?locale, "hero details cache hit");
            return Ok(hero.clone());
        }

        let hero = cell
            .get_or_try_init(|| async {
                let params = GetHeroParams {
                    key: self.hero.key,
                    locale: locale.to_domain(),
                };
                let payload = controllers
                    .get_hero(context, params)
                    .await
                    .map_err(HeroesError::downstream(ControllerKind::GetHero))?;
                Ok::<_, HeroesError>(Arc::new(Hero::parse(payload)?))
            })
            .await?;
        Ok(hero.clone())
    }
}

#[Object]
impl HeroNode {
    async fn key(&self) -> HeroKeyEnum {
        HeroKeyEnum::from_domain(self.hero.key)
    }

    async fn name(&self) -> &str {
        &self.hero.name
    }

    async fn portrait(&self) -> String {
        self.hero.portrait.to_string()
    }

    async fn role(&self) -> RoleEnum {
        RoleEnum::from_domain(self.hero.role)
    }

    /// Full hero payload, fetched on demand. Null when the fetch failed.
    async fn details(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Locale of the returned texts. Omitted or null means the configured default locale.")]
        locale: Option<LocaleEnum>,
    ) -> async_graphql::Result<Option<HeroDetails>> {
        let context = ctx.data::<RequestContext>()?;
        let resolver = ctx.data::<HeroesResolver>()?;
        match resolver.details(context, self, locale).await {
            Ok(hero) => Ok(Some(HeroDetails::from(hero.as_ref()))),
            Err(error) => {
                // reported here so the field itself resolves to an explicit null
                ctx.add_error(ctx.set_error_path(error.extend().into_server_error(ctx.item.pos)));
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::controllers::Controller;
    use crate::domain::Locale;
    use crate::domain::Role;
    use crate::test_harness;
    use crate::test_harness::FakeController;

    fn short(key: HeroKey, role: Role) -> Arc<HeroShort> {
        Arc::new(
            serde_json::from_value(test_harness::hero_short_payload(key, role)).unwrap(),
        )
    }

    fn keys_of(heroes: &[Arc<HeroShort>]) -> Vec<HeroKey> {
        heroes.iter().map(|hero| hero.key).collect()
    }

    fn resolver(
        list_heroes: FakeController<ListHeroesParams>,
        get_hero: FakeController<GetHeroParams>,
    ) -> (
        HeroesResolver,
        Arc<FakeController<ListHeroesParams>>,
        Arc<FakeController<GetHeroParams>>,
    ) {
        let list_heroes = Arc::new(list_heroes);
        let get_hero = Arc::new(get_hero);
        let resolver = HeroesResolver::new(
            Controllers::new(list_heroes.clone(), get_hero.clone()),
            LocaleEnum::EnglishUs,
        );
        (resolver, list_heroes, get_hero)
    }

    #[test]
    fn filter_follows_the_caller_order() {
        let (a, b, c) = (
            short(HeroKey::Ana, Role::Support),
            short(HeroKey::Baptiste, Role::Support),
            short(HeroKey::Cassidy, Role::Damage),
        );
        let filtered = filter_by_keys(
            vec![a.clone(), b, c.clone()],
            &[HeroKey::Cassidy, HeroKey::Ana, HeroKey::Cassidy],
        );

        assert_eq!(
            keys_of(&filtered),
            vec![HeroKey::Cassidy, HeroKey::Ana, HeroKey::Cassidy]
        );
        assert!(Arc::ptr_eq(&filtered[0], &c));
        assert!(Arc::ptr_eq(&filtered[1], &a));
        assert!(Arc::ptr_eq(&filtered[0], &filtered[2]));
    }

    #[test]
    fn filter_skips_missing_keys() {
        let filtered = filter_by_keys(
            vec![short(HeroKey::Ana, Role::Support)],
            &[HeroKey::Ana, HeroKey::Zarya],
        );
        assert_eq!(keys_of(&filtered), vec![HeroKey::Ana]);
    }

    #[test]
    fn empty_filter_keeps_downstream_order() {
        let filtered = filter_by_keys(
            vec![
                short(HeroKey::Zenyatta, Role::Support),
                short(HeroKey::Ana, Role::Support),
            ],
            &[],
        );
        assert_eq!(keys_of(&filtered), vec![HeroKey::Zenyatta, HeroKey::Ana]);
    }

    #[test]
    fn filter_keeps_the_last_duplicate() {
        let first = short(HeroKey::Ana, Role::Support);
        let last = short(HeroKey::Ana, Role::Damage);
        let filtered = filter_by_keys(vec![first, last.clone()], &[HeroKey::Ana]);
        assert_eq!(filtered.len(), 1);
        assert!(Arc::ptr_eq(&filtered[0], &last));
    }

    #[tokio::test]
    async fn list_converts_parameters() {
        let (resolver, list_heroes, _) = resolver(
            FakeController::returning(json!([test_harness::hero_short_payload(
                HeroKey::Ana,
                Role::Support
            )])),
            FakeController::failing("not called"),
        );
        let context = test_harness::request_context();

        resolver
            .list(&context, Some(RoleEnum::Support), None, &[])
            .await
            .unwrap();
        resolver
            .list(&context, None, Some(LocaleEnum::SpanishLatin), &[])
            .await
            .unwrap();

        assert_eq!(
            list_heroes.calls(),
            vec![
                ListHeroesParams {
                    role: Some(Role::Support),
                    locale: Locale::EnglishUs,
                },
                ListHeroesParams {
                    role: None,
                    locale: Locale::SpanishLatin,
                },
            ]
        );
    }

    #[tokio::test]
    async fn list_reports_invalid_payloads() {
        let (resolver, _, _) = resolver(
            FakeController::returning(json!({ "heroes": [] })),
            FakeController::failing("not called"),
        );
        let error = resolver
            .list(&test_harness::request_context(), None, None, &[])
            .await
            .err()
            .unwrap();
        assert_eq!(error.extension_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn details_are_memoized_per_locale() {
        let (resolver, _, get_hero) = resolver(
            FakeController::failing("not called"),
            FakeController::returning_with_ttl(
                test_harness::hero_detail_payload(HeroKey::Ana, Role::Support),
                "120",
            ),
        );
        let context = test_harness::request_context();
        let node = HeroNode::new(short(HeroKey::Ana, Role::Support));

        let first = resolver
            .details(&context, &node, Some(LocaleEnum::EnglishUs))
            .await
            .unwrap();
        let second = resolver.details(&context, &node, None).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(get_hero.call_count(), 1);

        resolver
            .details(&context, &node, Some(LocaleEnum::French))
            .await
            .unwrap();
        assert_eq!(
            get_hero.calls(),
            vec![
                GetHeroParams {
                    key: HeroKey::Ana,
                    locale: Locale::EnglishUs,
                },
                GetHeroParams {
                    key: HeroKey::Ana,
                    locale: Locale::French,
                },
            ]
        );
    }

    #[tokio::test]
    async fn cache_hits_leave_the_context_alone() {
        let controllers = Controllers::new(
            Arc::new(FakeController::<ListHeroesParams>::failing("not called")),
            Arc::new(FakeController::<GetHeroParams>::returning_with_ttl(
                test_harness::hero_detail_payload(HeroKey::Ana, Role::Support),
                "120",
            )),
        );
        let node = HeroNode::new(short(HeroKey::Ana, Role::Support));

        let first_operation = test_harness::request_context();
        node.get_details(&first_operation, &controllers, LocaleEnum::EnglishUs)
            .await
            .unwrap();
        assert_eq!(first_operation.cache_ttl(), Some(120));

        let other = test_harness::request_context();
        node.get_details(&other, &controllers, LocaleEnum::EnglishUs)
            .await
            .unwrap();
        assert_eq!(other.cache_ttl(), None);
    }

    #[tokio::test]
    async fn nodes_do_not_share_details() {
        let (resolver, _, get_hero) = resolver(
            FakeController::failing("not called"),
            FakeController::returning(test_harness::hero_detail_payload(
                HeroKey::Ana,
                Role::Support,
            )),
        );
        let context = test_harness::request_context();
        let hero = short(HeroKey::Ana, Role::Support);
        let (first, second) = (HeroNode::new(hero.clone()), HeroNode::new(hero));

        resolver.details(&context, &first, None).await.unwrap();
        resolver.details(&context, &second, None).await.unwrap();
        assert_eq!(get_hero.call_count(), 2);
    }

    /// Holds English fetches until a French fetch has gone through.
    struct FrenchFirst {
        french_done: tokio::sync::Notify,
    }

    #[async_trait::async_trait]
    impl Controller<GetHeroParams> for FrenchFirst {
        async fn process_request(
            &self,
            _request: &http::request::Parts,
            _response: &mut http::Response<()>,
            params: GetHeroParams,
        ) -> Result<serde_json::Value, tower::BoxError> {
            match params.locale {
                Locale::French => self.french_done.notify_one(),
                _ => self.french_done.notified().await,
            }
            Ok(test_harness::hero_detail_payload(params.key, Role::Support))
        }
    }

    #[tokio::test]
    async fn locales_of_one_node_fetch_independently() {
        let controllers = Controllers::new(
            Arc::new(FakeController::<ListHeroesParams>::failing("not called")),
            Arc::new(FrenchFirst {
                french_done: tokio::sync::Notify::new(),
            }),
        );
        let context = test_harness::request_context();
        let node = HeroNode::new(short(HeroKey::Ana, Role::Support));

        let (english, french) = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            tokio::join!(
                node.get_details(&context, &controllers, LocaleEnum::EnglishUs),
                node.get_details(&context, &controllers, LocaleEnum::French),
            )
        })
        .await
        .expect("an English fetch must not block a French one");

        english.unwrap();
        french.unwrap();
    }

    #[tokio::test]
    async fn failed_details_are_not_cached() {
        let (resolver, _, get_hero) = resolver(
            FakeController::failing("not called"),
            FakeController::returning(json!({ "name": "Ana" })),
        );
        let context = test_harness::request_context();
        let node = HeroNode::new(short(HeroKey::Ana, Role::Support));

        for _ in 0..2 {
            let error = resolver.details(&context, &node, None).await.unwrap_err();
            assert!(matches!(error, HeroesError::Validation { model: "Hero", .. }));
        }
        assert_eq!(get_hero.call_count(), 2);
    }
}
