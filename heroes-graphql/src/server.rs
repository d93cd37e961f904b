//! Axum HTTP transport for the heroes schema.
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQLRequest;
use async_graphql_axum::GraphQLResponse;
use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::routing::post;
use http::HeaderMap;
use http::HeaderName;
use http::request::Parts;
use tower_http::trace::TraceLayer;

use crate::configuration::Configuration;
use crate::context::OutboundResponse;
use crate::context::RequestContext;
use crate::graphql::HeroesSchema;

#[derive(Clone)]
struct GraphQLState {
    schema: HeroesSchema,
    cache_ttl_header: HeaderName,
    graphql_path: String,
}

/// Routes serving `schema` on the configured endpoint.
///
/// `POST` executes operations. `GET` serves GraphiQL when enabled.
pub fn router(configuration: &Configuration, schema: HeroesSchema) -> Router {
    let state = GraphQLState {
        schema,
        cache_ttl_header: configuration.cache_ttl_header.clone(),
        graphql_path: configuration.server.graphql_path.clone(),
    };

    let mut endpoint = post(handle_post);
    if configuration.server.graphiql {
        endpoint = endpoint.get(graphiql);
    }

    Router::new()
        .route(&configuration.server.graphql_path, endpoint)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_post(
    State(state): State<GraphQLState>,
    parts: Parts,
    request: GraphQLRequest,
) -> (HeaderMap, GraphQLResponse) {
    let response = OutboundResponse::default();
    let context = RequestContext::new(parts, response.clone(), state.cache_ttl_header);

    let graphql_response = state
        .schema
        .execute(request.into_inner().data(context))
        .await;
    if graphql_response.is_err() {
        tracing::debug!(errors = ?graphql_response.errors, "operation resolved with errors");
    }

    (response.headers(), graphql_response.into())
}

async fn graphiql(State(state): State<GraphQLState>) -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint(&state.graphql_path)
            .finish(),
    )
}
