//! The GraphQL schema exposed to clients.

mod crosswalk;
mod query;
mod types;

use async_graphql::EmptyMutation;
use async_graphql::EmptySubscription;
use async_graphql::Schema;

pub use self::crosswalk::Crosswalk;
pub use self::crosswalk::verify_all;
pub use self::query::HeroNode;
pub use self::query::HeroesResolver;
pub use self::query::Query;
pub use self::types::Ability;
pub use self::types::AbilityVideo;
pub use self::types::HeroDetails;
pub use self::types::HeroKeyEnum;
pub use self::types::HeroStory;
pub use self::types::HitPoints;
pub use self::types::LocaleEnum;
pub use self::types::Media;
pub use self::types::MediaTypeEnum;
pub use self::types::RoleEnum;
pub use self::types::StoryChapter;
pub use self::types::VideoLink;
use crate::controllers::Controllers;
use crate::domain::Locale;
use crate::error::HeroesError;

pub type HeroesSchema = Schema<Query, EmptyMutation, EmptySubscription>;

/// Builds the heroes schema.
///
/// Each operation executed against it must carry its own
/// [`RequestContext`](crate::RequestContext) as request data.
pub fn schema(
    controllers: Controllers,
    default_locale: Locale,
) -> Result<HeroesSchema, HeroesError> {
    verify_all()?;
    Ok(Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(HeroesResolver::new(
            controllers,
            LocaleEnum::from_domain(default_locale),
        ))
        .finish())
}
