//! A GraphQL façade over the heroes controllers.
//!
//! Every GraphQL operation gets its own [`RequestContext`]. Resolvers reach the
//! downstream controllers through [`controllers::Controllers`], which records the
//! cache TTL each controller suggests so the whole response can advertise the
//! smallest one.

#![warn(unreachable_pub)]

pub mod configuration;
pub mod context;
pub mod controllers;
pub mod domain;
pub mod error;
mod executable;
pub mod graphql;
pub mod server;
pub mod test_harness;

pub use configuration::Configuration;
pub use context::OutboundResponse;
pub use context::RequestContext;
pub use error::HeroesError;
pub use executable::main;
pub use graphql::HeroesSchema;
