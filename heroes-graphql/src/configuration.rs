//! Logic for loading configuration in to an object model
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use displaydoc::Display;
use http::HeaderName;
use schemars::JsonSchema;
use schemars::schema::RootSchema;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;
use url::Url;

use crate::domain::Locale;
use crate::domain::ValueCode;
use crate::error::HeroesError;

/// Name of the header controllers use to suggest a cache TTL, unless configured otherwise.
pub const DEFAULT_CACHE_TTL_HEADER: &str = "x-cache-ttl";

/// Configuration error.
#[derive(Debug, Error, Display)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// could not read configuration file '{path}': {error}
    CannotReadFile {
        path: String,
        error: std::io::Error,
    },
    /// could not deserialize configuration: {0}
    DeserializeConfigError(serde_yaml::Error),
    /// {message}: {error}
    InvalidConfiguration {
        message: &'static str,
        error: String,
    },
}

/// The configuration of the façade.
///
/// Can be created through `serde::Deserialize` from various formats,
/// or from a YAML document with [`Configuration::from_str`].
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Configuration options pertaining to the http server component.
    #[serde(default)]
    pub server: Server,

    /// Header carrying the cache TTL suggested by controllers, and the aggregated
    /// TTL sent back to clients.
    #[serde(
        default = "default_cache_ttl_header",
        deserialize_with = "deserialize_header_name",
        serialize_with = "serialize_header_name"
    )]
    #[schemars(with = "String")]
    pub cache_ttl_header: HeaderName,

    /// Locale used when a query does not specify one (for example `en-us`).
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// The REST backend serving the heroes controllers.
    #[serde(default)]
    pub backend: Backend,
}

/// Configuration options pertaining to the http server component.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Server {
    /// The socket address and port to listen on.
    /// Defaults to 127.0.0.1:4000
    #[serde(default = "default_listen")]
    #[schemars(with = "String")]
    pub listen: SocketAddr,

    /// The HTTP path on which GraphQL requests will be served.
    /// Defaults to "/graphql".
    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,

    /// Serve the GraphiQL IDE on GET requests to the GraphQL path.
    #[serde(default)]
    pub graphiql: bool,
}

/// The REST backend serving the heroes controllers.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Backend {
    /// Base URL of the backend.
    #[serde(default = "default_backend_url")]
    #[schemars(with = "String")]
    pub url: Url,

    /// Timeout of a single backend call, for example `10s`.
    #[serde(default = "default_backend_timeout", with = "humantime_serde")]
    #[schemars(with = "String")]
    pub timeout: Duration,
}

fn default_cache_ttl_header() -> HeaderName {
    HeaderName::from_static(DEFAULT_CACHE_TTL_HEADER)
}

fn deserialize_header_name<'de, D>(deserializer: D) -> Result<HeaderName, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    HeaderName::try_from(name).map_err(serde::de::Error::custom)
}

fn serialize_header_name<S>(name: &HeaderName, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(name.as_str())
}

fn default_locale() -> String {
    Locale::EnglishUs.code().to_string()
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 4000))
}

fn default_graphql_path() -> String {
    String::from("/graphql")
}

fn default_backend_url() -> Url {
    Url::parse("http://127.0.0.1:8000").expect("default backend url must be valid")
}

fn default_backend_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            server: Server::default(),
            cache_ttl_header: default_cache_ttl_header(),
            default_locale: default_locale(),
            backend: Backend::default(),
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            graphql_path: default_graphql_path(),
            graphiql: false,
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout: default_backend_timeout(),
        }
    }
}

impl Configuration {
    /// Reads and validates a YAML configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let content =
            std::fs::read_to_string(path).map_err(|error| ConfigurationError::CannotReadFile {
                path: path.display().to_string(),
                error,
            })?;
        content.parse()
    }

    /// The locale used when a query does not specify one.
    pub fn locale(&self) -> Result<Locale, HeroesError> {
        Locale::from_code(&self.default_locale)
    }

    fn validate(self) -> Result<Self, ConfigurationError> {
        if !self.server.graphql_path.starts_with('/') {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "graphql_path must start with '/'",
                error: self.server.graphql_path,
            });
        }
        if self.backend.url.cannot_be_a_base() {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "backend url cannot be a base",
                error: self.backend.url.to_string(),
            });
        }
        self.locale()
            .map_err(|error| ConfigurationError::InvalidConfiguration {
                message: "invalid default_locale",
                error: error.to_string(),
            })?;
        Ok(self)
    }
}

impl FromStr for Configuration {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let configuration: Configuration = if s.trim().is_empty() {
            Configuration::default()
        } else {
            serde_yaml::from_str(s).map_err(ConfigurationError::DeserializeConfigError)?
        };
        configuration.validate()
    }
}

/// Generate a JSON schema for the configuration.
pub fn generate_config_schema() -> RootSchema {
    schemars::schema_for!(Configuration)
}
