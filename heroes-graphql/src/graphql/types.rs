//! GraphQL enums and object types of the heroes schema.
use async_graphql::Enum;
use async_graphql::SimpleObject;
use strum_macros::EnumIter;

use super::crosswalk::Crosswalk;
use crate::domain;

/// Hero role.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[graphql(name = "Role")]
pub enum RoleEnum {
    Damage,
    Support,
    Tank,
}

/// Locale of the returned texts.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[graphql(name = "Locale")]
pub enum LocaleEnum {
    #[graphql(name = "GERMAN")]
    German,
    #[graphql(name = "ENGLISH_EU")]
    EnglishEu,
    #[graphql(name = "ENGLISH_US")]
    EnglishUs,
    #[graphql(name = "SPANISH_EU")]
    SpanishEu,
    #[graphql(name = "SPANISH_LATIN")]
    SpanishLatin,
    #[graphql(name = "FRENCH")]
    French,
    #[graphql(name = "ITALIAN")]
    Italian,
    #[graphql(name = "JAPANESE")]
    Japanese,
    #[graphql(name = "KOREAN")]
    Korean,
    #[graphql(name = "POLISH")]
    Polish,
    #[graphql(name = "PORTUGUESE_BRAZIL")]
    PortugueseBrazil,
    #[graphql(name = "RUSSIAN")]
    Russian,
    #[graphql(name = "CHINESE_TAIWAN")]
    ChineseTaiwan,
}

/// Key identifying a hero.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[graphql(name = "HeroKey")]
pub enum HeroKeyEnum {
    Ana,
    Ashe,
    Baptiste,
    Bastion,
    Brigitte,
    Cassidy,
    Doomfist,
    Dva,
    Echo,
    Freja,
    Genji,
    Hanzo,
    Hazard,
    Illari,
    #[graphql(name = "JUNKER_QUEEN")]
    JunkerQueen,
    Junkrat,
    Juno,
    Kiriko,
    Lifeweaver,
    Lucio,
    Mauga,
    Mei,
    Mercy,
    Moira,
    Orisa,
    Pharah,
    Ramattra,
    Reaper,
    Reinhardt,
    Roadhog,
    Sigma,
    Sojourn,
    #[graphql(name = "SOLDIER_76")]
    Soldier76,
    Sombra,
    Symmetra,
    Torbjorn,
    Tracer,
    Venture,
    Widowmaker,
    Winston,
    #[graphql(name = "WRECKING_BALL")]
    WreckingBall,
    Zarya,
    Zenyatta,
}

/// Kind of media attached to a hero story.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[graphql(name = "MediaType")]
pub enum MediaTypeEnum {
    Video,
    #[graphql(name = "SHORT_STORY")]
    ShortStory,
    Comic,
}

/// Full hero payload, matching the backend `Hero` model.
#[derive(SimpleObject, Debug, Clone)]
pub struct HeroDetails {
    pub name: String,
    pub description: String,
    pub portrait: Option<String>,
    pub role: RoleEnum,
    pub location: String,
    pub age: Option<u32>,
    pub birthday: Option<String>,
    pub hitpoints: Option<HitPoints>,
    pub abilities: Vec<Ability>,
    pub story: HeroStory,
}

/// Health, armor and shields of a hero.
#[derive(SimpleObject, Debug, Clone)]
pub struct HitPoints {
    pub health: u32,
    pub armor: u32,
    pub shields: u32,
    pub total: u32,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct Ability {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub video: AbilityVideo,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct AbilityVideo {
    pub thumbnail: String,
    pub link: VideoLink,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct VideoLink {
    pub mp4: String,
    pub webm: String,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct HeroStory {
    pub summary: String,
    pub media: Option<Media>,
    pub chapters: Vec<StoryChapter>,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct Media {
    #[graphql(name = "type")]
    pub kind: MediaTypeEnum,
    pub link: String,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct StoryChapter {
    pub title: String,
    pub content: String,
    pub picture: String,
}

impl From<&domain::Hero> for HeroDetails {
    fn from(hero: &domain::Hero) -> Self {
        Self {
            name: hero.name.clone(),
            description: hero.description.clone(),
            portrait: hero.portrait.as_ref().map(ToString::to_string),
            role: RoleEnum::from_domain(hero.role),
            location: hero.location.clone(),
            age: hero.age,
            birthday: hero.birthday.clone(),
            hitpoints: hero.hitpoints.as_ref().map(|hitpoints| HitPoints {
                health: hitpoints.health,
                armor: hitpoints.armor,
                shields: hitpoints.shields,
                total: hitpoints.total,
            }),
            abilities: hero.abilities.iter().map(Ability::from).collect(),
            story: HeroStory {
                summary: hero.story.summary.clone(),
                media: hero.story.media.as_ref().map(|media| Media {
                    kind: MediaTypeEnum::from_domain(media.kind),
                    link: media.link.to_string(),
                }),
                chapters: hero
                    .story
                    .chapters
                    .iter()
                    .map(|chapter| StoryChapter {
                        title: chapter.title.clone(),
                        content: chapter.content.clone(),
                        picture: chapter.picture.to_string(),
                    })
                    .collect(),
            },
        }
    }
}

impl From<&domain::Ability> for Ability {
    fn from(ability: &domain::Ability) -> Self {
        Self {
            name: ability.name.clone(),
            description: ability.description.clone(),
            icon: ability.icon.to_string(),
            video: AbilityVideo {
                thumbnail: ability.video.thumbnail.to_string(),
                link: VideoLink {
                    mp4: ability.video.link.mp4.to_string(),
                    webm: ability.video.link.webm.to_string(),
                },
            },
        }
    }
}
