use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::EnumString;
use strum_macros::IntoStaticStr;

/// Hero role.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Role {
    Damage,
    Support,
    Tank,
}

/// Locale of the texts returned by the backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Locale {
    #[serde(rename = "de-de")]
    #[strum(serialize = "de-de")]
    German,
    #[serde(rename = "en-gb")]
    #[strum(serialize = "en-gb")]
    EnglishEu,
    #[serde(rename = "en-us")]
    #[strum(serialize = "en-us")]
    EnglishUs,
    #[serde(rename = "es-es")]
    #[strum(serialize = "es-es")]
    SpanishEu,
    #[serde(rename = "es-mx")]
    #[strum(serialize = "es-mx")]
    SpanishLatin,
    #[serde(rename = "fr-fr")]
    #[strum(serialize = "fr-fr")]
    French,
    #[serde(rename = "it-it")]
    #[strum(serialize = "it-it")]
    Italian,
    #[serde(rename = "ja-jp")]
    #[strum(serialize = "ja-jp")]
    Japanese,
    #[serde(rename = "ko-kr")]
    #[strum(serialize = "ko-kr")]
    Korean,
    #[serde(rename = "pl-pl")]
    #[strum(serialize = "pl-pl")]
    Polish,
    #[serde(rename = "pt-br")]
    #[strum(serialize = "pt-br")]
    PortugueseBrazil,
    #[serde(rename = "ru-ru")]
    #[strum(serialize = "ru-ru")]
    Russian,
    #[serde(rename = "zh-tw")]
    #[strum(serialize = "zh-tw")]
    ChineseTaiwan,
}

/// Key identifying a hero in the catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum HeroKey {
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
    #[serde(rename = "soldier-76")]
    #[strum(serialize = "soldier-76")]
    Soldier76,
    Sombra,
    Symmetra,
    Torbjorn,
    Tracer,
    Venture,
    Widowmaker,
    Winston,
    WreckingBall,
    Zarya,
    Zenyatta,
}

/// Kind of media attached to a hero story.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MediaType {
    Video,
    ShortStory,
    Comic,
}
