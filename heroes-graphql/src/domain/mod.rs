//! The backend's own vocabulary: the enums and models the controllers speak.

mod enums;
mod models;

use std::str::FromStr;

use strum::IntoEnumIterator;

pub use self::enums::HeroKey;
pub use self::enums::Locale;
pub use self::enums::MediaType;
pub use self::enums::Role;
pub use self::models::Ability;
pub use self::models::AbilityVideo;
pub use self::models::Hero;
pub use self::models::HeroShort;
pub use self::models::HeroStory;
pub use self::models::HitPoints;
pub use self::models::Media;
pub use self::models::StoryChapter;
pub use self::models::VideoLink;
use crate::error::HeroesError;

/// A domain enum identified on the wire by a string value code such as `en-us`.
pub trait ValueCode:
    Copy + Eq + FromStr + Into<&'static str> + IntoEnumIterator + Send + Sync + 'static
{
    /// Name used when reporting unknown values.
    const NAME: &'static str;

    /// The value code of this member.
    fn code(self) -> &'static str {
        self.into()
    }

    /// Looks a member up by its value code.
    fn from_code(code: &str) -> Result<Self, HeroesError> {
        code.parse()
            .map_err(|_| HeroesError::unknown_enum_value(Self::NAME, code))
    }
}

impl ValueCode for Role {
    const NAME: &'static str = "Role";
}

impl ValueCode for Locale {
    const NAME: &'static str = "Locale";
}

impl ValueCode for HeroKey {
    const NAME: &'static str = "HeroKey";
}

impl ValueCode for MediaType {
    const NAME: &'static str = "MediaType";
}
