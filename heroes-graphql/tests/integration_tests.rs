use std::sync::Arc;

use heroes_graphql::HeroesSchema;
use heroes_graphql::OutboundResponse;
use heroes_graphql::RequestContext;
use heroes_graphql::controllers::Controllers;
use heroes_graphql::controllers::GetHeroParams;
use heroes_graphql::controllers::ListHeroesParams;
use heroes_graphql::domain::HeroKey;
use heroes_graphql::domain::Locale;
use heroes_graphql::domain::Role;
use heroes_graphql::graphql;
use heroes_graphql::test_harness;
use heroes_graphql::test_harness::CACHE_TTL_HEADER;
use heroes_graphql::test_harness::FakeController;
use pretty_assertions::assert_eq;
use serde_json::Value;
use serde_json::json;

fn two_heroes() -> Value {
    json!([
        test_harness::hero_short_payload(HeroKey::Ana, Role::Support),
        test_harness::hero_short_payload(HeroKey::Sojourn, Role::Damage),
    ])
}

struct Harness {
    schema: HeroesSchema,
    list_heroes: Arc<FakeController<ListHeroesParams>>,
    get_hero: Arc<FakeController<GetHeroParams>>,
}

impl Harness {
    fn new(
        list_heroes: FakeController<ListHeroesParams>,
        get_hero: FakeController<GetHeroParams>,
    ) -> Self {
        let list_heroes = Arc::new(list_heroes);
        let get_hero = Arc::new(get_hero);
        let schema = graphql::schema(
            Controllers::new(list_heroes.clone(), get_hero.clone()),
            Locale::EnglishUs,
        )
        .unwrap();
        Self {
            schema,
            list_heroes,
            get_hero,
        }
    }

    /// Runs `query` in a fresh operation, returning the serialized response and
    /// the headers left on the outbound response.
    async fn execute(&self, query: &str) -> (Value, http::HeaderMap) {
        let (request, ()) = http::Request::new(()).into_parts();
        let outbound = OutboundResponse::default();
        let context = RequestContext::new(request, outbound.clone(), CACHE_TTL_HEADER);
        let response = self
            .schema
            .execute(async_graphql::Request::new(query).data(context))
            .await;
        (serde_json::to_value(&response).unwrap(), outbound.headers())
    }
}

#[tokio::test]
async fn fetches_details_only_for_the_requested_keys() {
    let harness = Harness::new(
        FakeController::returning(two_heroes()),
        FakeController::new(|params: &GetHeroParams| match params.key {
            HeroKey::Ana => Ok(http::Response::new(test_harness::hero_detail_payload(
                HeroKey::Ana,
                Role::Support,
            ))),
            other => Err(format!("no details for {other}").into()),
        }),
    );

    let (response, _) = harness
        .execute("{ heroes(keys: [ANA]) { key details { description } } }")
        .await;

    assert!(response.get("errors").is_none());
    assert_eq!(
        response["data"],
        json!({
            "heroes": [{ "key": "ANA", "details": { "description": "Support sniper" } }]
        })
    );
    assert_eq!(
        harness.get_hero.calls(),
        vec![GetHeroParams {
            key: HeroKey::Ana,
            locale: Locale::EnglishUs,
        }]
    );
}

#[tokio::test]
async fn lists_everything_without_keys() {
    let harness = Harness::new(
        FakeController::returning(two_heroes()),
        FakeController::failing("not called"),
    );

    let (response, _) = harness
        .execute("{ heroes(role: SUPPORT, locale: JAPANESE) { key name role } }")
        .await;

    assert_eq!(
        response["data"],
        json!({
            "heroes": [
                { "key": "ANA", "name": "Ana", "role": "SUPPORT" },
                { "key": "SOJOURN", "name": "Sojourn", "role": "DAMAGE" },
            ]
        })
    );
    assert_eq!(
        harness.list_heroes.calls(),
        vec![ListHeroesParams {
            role: Some(Role::Support),
            locale: Locale::Japanese,
        }]
    );
    assert_eq!(harness.get_hero.call_count(), 0);
}

#[tokio::test]
async fn null_locale_means_the_default_locale() {
    let harness = Harness::new(
        FakeController::returning(two_heroes()),
        FakeController::returning(test_harness::hero_detail_payload(
            HeroKey::Ana,
            Role::Support,
        )),
    );

    let (response, _) = harness
        .execute("{ heroes(locale: null, keys: [ANA]) { details(locale: null) { name } } }")
        .await;

    assert!(response.get("errors").is_none());
    assert_eq!(harness.list_heroes.calls()[0].locale, Locale::EnglishUs);
    assert_eq!(harness.get_hero.calls()[0].locale, Locale::EnglishUs);
}

#[tokio::test]
async fn keys_drive_order_and_repetition() {
    let harness = Harness::new(
        FakeController::returning(json!([
            test_harness::hero_short_payload(HeroKey::Ana, Role::Support),
            test_harness::hero_short_payload(HeroKey::Cassidy, Role::Damage),
            test_harness::hero_short_payload(HeroKey::Zarya, Role::Tank),
        ])),
        FakeController::failing("not called"),
    );

    let (response, _) = harness
        .execute("{ heroes(keys: [CASSIDY, ANA, CASSIDY, MERCY]) { key } }")
        .await;

    assert_eq!(
        response["data"],
        json!({
            "heroes": [{ "key": "CASSIDY" }, { "key": "ANA" }, { "key": "CASSIDY" }]
        })
    );
}

#[tokio::test]
async fn aliased_details_share_one_fetch() {
    let harness = Harness::new(
        FakeController::returning(two_heroes()),
        FakeController::returning(test_harness::hero_detail_payload(
            HeroKey::Ana,
            Role::Support,
        )),
    );

    let (response, _) = harness
        .execute(
            r#"{
                heroes(keys: [ANA]) {
                    first: details { name }
                    second: details { description }
                    french: details(locale: FRENCH) { name }
                }
            }"#,
        )
        .await;

    assert_eq!(
        response["data"]["heroes"][0]["second"]["description"],
        "Support sniper"
    );
    let mut locales: Vec<Locale> = harness
        .get_hero
        .calls()
        .into_iter()
        .map(|params| params.locale)
        .collect();
    locales.sort_by_key(|locale| locale.to_string());
    assert_eq!(locales, vec![Locale::EnglishUs, Locale::French]);
}

#[tokio::test]
async fn failing_details_do_not_affect_siblings() {
    let harness = Harness::new(
        FakeController::returning(two_heroes()),
        FakeController::new(|params: &GetHeroParams| match params.key {
            HeroKey::Ana => Ok(http::Response::new(test_harness::hero_detail_payload(
                HeroKey::Ana,
                Role::Support,
            ))),
            _ => Err("backend unavailable".into()),
        }),
    );

    let (response, _) = harness
        .execute("{ heroes { key details { name } } }")
        .await;

    assert_eq!(
        response["data"],
        json!({
            "heroes": [
                { "key": "ANA", "details": { "name": "Ana" } },
                { "key": "SOJOURN", "details": null },
            ]
        })
    );
    let errors = response["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["message"], "backend unavailable");
    assert_eq!(errors[0]["path"], json!(["heroes", 1, "details"]));
    assert_eq!(
        errors[0]["extensions"],
        json!({ "code": "DOWNSTREAM_ERROR", "controller": "get_hero" })
    );
}

#[tokio::test]
async fn failing_list_nulls_the_data() {
    let harness = Harness::new(
        FakeController::failing("list unavailable"),
        FakeController::failing("not called"),
    );

    let (response, headers) = harness.execute("{ heroes { key } }").await;

    assert_eq!(response["data"], Value::Null);
    assert_eq!(response["errors"][0]["message"], "list unavailable");
    assert_eq!(
        response["errors"][0]["extensions"]["controller"],
        "list_heroes"
    );
    assert!(headers.is_empty());
}

#[tokio::test]
async fn invalid_list_payload_is_a_validation_error() {
    let harness = Harness::new(
        FakeController::returning(json!([{ "key": "ana", "name": "Ana" }])),
        FakeController::failing("not called"),
    );

    let (response, _) = harness.execute("{ heroes { key } }").await;

    assert_eq!(response["data"], Value::Null);
    assert_eq!(
        response["errors"][0]["extensions"],
        json!({ "code": "VALIDATION_ERROR", "model": "HeroShort" })
    );
}

#[tokio::test]
async fn response_ttl_is_the_lowest_suggestion() {
    let harness = Harness::new(
        FakeController::returning_with_ttl(two_heroes(), "300"),
        FakeController::new(|params: &GetHeroParams| {
            let (role, ttl) = match params.key {
                HeroKey::Ana => (Role::Support, "120"),
                _ => (Role::Damage, "60"),
            };
            Ok(test_harness::with_ttl(
                test_harness::hero_detail_payload(params.key, role),
                ttl,
            ))
        }),
    );

    let (_, without_details) = harness.execute("{ heroes { key } }").await;
    assert_eq!(without_details.get(&CACHE_TTL_HEADER).unwrap(), "300");

    let (response, with_details) = harness
        .execute("{ heroes { key details { name } } }")
        .await;
    assert!(response.get("errors").is_none());
    assert_eq!(with_details.get(&CACHE_TTL_HEADER).unwrap(), "60");
}

#[tokio::test]
async fn malformed_ttl_is_ignored() {
    let harness = Harness::new(
        FakeController::returning_with_ttl(two_heroes(), "a while"),
        FakeController::returning_with_ttl(
            test_harness::hero_detail_payload(HeroKey::Ana, Role::Support),
            "90",
        ),
    );

    let (response, headers) = harness
        .execute("{ heroes(keys: [ANA]) { details { name } } }")
        .await;

    assert!(response.get("errors").is_none());
    assert_eq!(headers.get(&CACHE_TTL_HEADER).unwrap(), "90");
}
