use http::HeaderName;
use http::request::Parts;
use serde_json::Value;
use tower::BoxError;
use url::Url;

use super::Controller;
use super::GetHeroParams;
use super::ListHeroesParams;
use crate::configuration::Backend;
use crate::domain::ValueCode;

/// Both heroes controllers, served by a REST backend.
///
/// * list: `GET {url}/heroes?locale={locale}[&role={role}]`
/// * detail: `GET {url}/heroes/{key}?locale={locale}`
///
/// The backend's TTL header is copied onto the response handed to the controller.
#[derive(Clone, Debug)]
pub struct RestBackend {
    client: reqwest::Client,
    url: Url,
    cache_ttl_header: HeaderName,
}

impl RestBackend {
    pub fn new(backend: &Backend, cache_ttl_header: HeaderName) -> Result<Self, BoxError> {
        let client = reqwest::Client::builder()
            .timeout(backend.timeout)
            .build()?;
        Ok(Self {
            client,
            url: backend.url.clone(),
            cache_ttl_header,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BoxError> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| format!("backend url '{}' cannot be a base", self.url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch(
        &self,
        url: Url,
        query: &[(&str, &str)],
        response: &mut http::Response<()>,
    ) -> Result<Value, BoxError> {
        tracing::debug!(%url, ?query, "calling heroes backend");
        let upstream = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        if let Some(ttl) = upstream.headers().get(&self.cache_ttl_header) {
            response
                .headers_mut()
                .insert(self.cache_ttl_header.clone(), ttl.clone());
        }

        Ok(upstream.json().await?)
    }
}

#[async_trait::async_trait]
impl Controller<ListHeroesParams> for RestBackend {
    async fn process_request(
        &self,
        _request: &Parts,
        response: &mut http::Response<()>,
        params: ListHeroesParams,
    ) -> Result<Value, BoxError> {
        let mut query = vec![("locale", params.locale.code())];
        if let Some(role) = params.role {
            query.push(("role", role.code()));
        }
        self.fetch(self.endpoint(&["heroes"])?, &query, response)
            .await
    }
}

#[async_trait::async_trait]
impl Controller<GetHeroParams> for RestBackend {
    async fn process_request(
        &self,
        _request: &Parts,
        response: &mut http::Response<()>,
        params: GetHeroParams,
    ) -> Result<Value, BoxError> {
        self.fetch(
            self.endpoint(&["heroes", params.key.code()])?,
            &[("locale", params.locale.code())],
            response,
        )
        .await
    }
}
