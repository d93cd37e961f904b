use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::HeroKey;
use super::MediaType;
use super::Role;
use crate::error::HeroesError;

/// A hero as listed by the list controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroShort {
    pub key: HeroKey,
    pub name: String,
    pub portrait: Url,
    pub role: Role,
}

/// A hero as returned by the detail controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub portrait: Option<Url>,
    pub role: Role,
    pub location: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub hitpoints: Option<HitPoints>,
    pub abilities: Vec<Ability>,
    pub story: HeroStory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitPoints {
    pub health: u32,
    pub armor: u32,
    pub shields: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub description: String,
    pub icon: Url,
    pub video: AbilityVideo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityVideo {
    pub thumbnail: Url,
    pub link: VideoLink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoLink {
    pub mp4: Url,
    pub webm: Url,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroStory {
    pub summary: String,
    #[serde(default)]
    pub media: Option<Media>,
    pub chapters: Vec<StoryChapter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaType,
    pub link: Url,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryChapter {
    pub title: String,
    pub content: String,
    pub picture: Url,
}

impl HeroShort {
    /// Validates a list controller payload, keeping the downstream order.
    pub fn parse_list(payload: Value) -> Result<Vec<HeroShort>, HeroesError> {
        match payload {
            Value::Array(items) => items.into_iter().map(validate).collect(),
            other => Err(HeroesError::Validation {
                model: "HeroShort",
                reason: format!("expected a list of heroes, got {}", kind_of(&other)),
            }),
        }
    }
}

impl Hero {
    /// Validates a detail controller payload.
    pub fn parse(payload: Value) -> Result<Hero, HeroesError> {
        validate(payload)
    }
}

fn validate<T: DeserializeOwned>(payload: Value) -> Result<T, HeroesError> {
    serde_json::from_value(payload).map_err(|error| HeroesError::Validation {
        model: short_type_name::<T>(),
        reason: error.to_string(),
    })
}

fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
