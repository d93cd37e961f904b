//! Mapping between the GraphQL enums and the domain enums.
//!
//! Each pair is declared once, as a table. Both directions are generated from
//! that table as exhaustive matches, and [`verify_all`] checks at startup that
//! every table is a bijection.
use strum::IntoEnumIterator;

use super::types::HeroKeyEnum;
use super::types::LocaleEnum;
use super::types::MediaTypeEnum;
use super::types::RoleEnum;
use crate::domain::HeroKey;
use crate::domain::Locale;
use crate::domain::MediaType;
use crate::domain::Role;
use crate::domain::ValueCode;
use crate::error::HeroesError;

/// A GraphQL enum paired with the domain enum it stands for.
pub trait Crosswalk: Copy + Eq + IntoEnumIterator + 'static {
    type Domain: ValueCode;

    /// The domain member this wire member stands for.
    fn to_domain(self) -> Self::Domain;

    /// The wire member standing for `domain`.
    fn from_domain(domain: Self::Domain) -> Self;

    /// Looks a wire member up by the value code of its domain counterpart.
    fn from_code(code: &str) -> Result<Self, HeroesError> {
        Self::Domain::from_code(code).map(Self::from_domain)
    }
}

/// Generate both directions from one table, so they cannot drift apart.
macro_rules! crosswalk {
    ( $wire:ident <=> $domain:ident { $( $wire_member:ident <=> $domain_member:ident, )* } ) => {
        impl Crosswalk for $wire {
            type Domain = $domain;

            fn to_domain(self) -> $domain {
                match self {
                    $( $wire::$wire_member => $domain::$domain_member, )*
                }
            }

            fn from_domain(domain: $domain) -> Self {
                match domain {
                    $( $domain::$domain_member => $wire::$wire_member, )*
                }
            }
        }
    };
}

crosswalk!(RoleEnum <=> Role {
    Damage <=> Damage,
    Support <=> Support,
    Tank <=> Tank,
});

crosswalk!(LocaleEnum <=> Locale {
    German <=> German,
    EnglishEu <=> EnglishEu,
    EnglishUs <=> EnglishUs,
    SpanishEu <=> SpanishEu,
    SpanishLatin <=> SpanishLatin,
    French <=> French,
    Italian <=> Italian,
    Japanese <=> Japanese,
    Korean <=> Korean,
    Polish <=> Polish,
    PortugueseBrazil <=> PortugueseBrazil,
    Russian <=> Russian,
    ChineseTaiwan <=> ChineseTaiwan,
});

crosswalk!(MediaTypeEnum <=> MediaType {
    Video <=> Video,
    ShortStory <=> ShortStory,
    Comic <=> Comic,
});

crosswalk!(HeroKeyEnum <=> HeroKey {
    Ana <=> Ana,
    Ashe <=> Ashe,
    Baptiste <=> Baptiste,
    Bastion <=> Bastion,
    Brigitte <=> Brigitte,
    Cassidy <=> Cassidy,
    Doomfist <=> Doomfist,
    Dva <=> Dva,
    Echo <=> Echo,
    Freja <=> Freja,
    Genji <=> Genji,
    Hanzo <=> Hanzo,
    Hazard <=> Hazard,
    Illari <=> Illari,
    JunkerQueen <=> JunkerQueen,
    Junkrat <=> Junkrat,
    Juno <=> Juno,
    Kiriko <=> Kiriko,
    Lifeweaver <=> Lifeweaver,
    Lucio <=> Lucio,
    Mauga <=> Mauga,
    Mei <=> Mei,
    Mercy <=> Mercy,
    Moira <=> Moira,
    Orisa <=> Orisa,
    Pharah <=> Pharah,
    Ramattra <=> Ramattra,
    Reaper <=> Reaper,
    Reinhardt <=> Reinhardt,
    Roadhog <=> Roadhog,
    Sigma <=> Sigma,
    Sojourn <=> Sojourn,
    Soldier76 <=> Soldier76,
    Sombra <=> Sombra,
    Symmetra <=> Symmetra,
    Torbjorn <=> Torbjorn,
    Tracer <=> Tracer,
    Venture <=> Venture,
    Widowmaker <=> Widowmaker,
    Winston <=> Winston,
    WreckingBall <=> WreckingBall,
    Zarya <=> Zarya,
    Zenyatta <=> Zenyatta,
});

/// Checks that every wire member maps to a distinct domain member and back.
pub(crate) fn verify<W: Crosswalk>() -> Result<(), HeroesError> {
    for wire in <W as IntoEnumIterator>::iter() {
        let domain = wire.to_domain();
        if W::from_domain(domain) != wire {
            return Err(HeroesError::unknown_enum_value(
                W::Domain::NAME,
                domain.code(),
            ));
        }
    }
    for domain in <W::Domain as IntoEnumIterator>::iter() {
        if W::from_domain(domain).to_domain() != domain {
            return Err(HeroesError::unknown_enum_value(
                W::Domain::NAME,
                domain.code(),
            ));
        }
    }
    Ok(())
}

/// Checks every enum pair exposed by the schema.
pub fn verify_all() -> Result<(), HeroesError> {
    verify::<RoleEnum>()?;
    verify::<LocaleEnum>()?;
    verify::<HeroKeyEnum>()?;
    verify::<MediaTypeEnum>()?;
    Ok(())
}
