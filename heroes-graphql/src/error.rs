//! Resolver errors.
use async_graphql::ErrorExtensions;
use displaydoc::Display;
use thiserror::Error;
use tower::BoxError;

use crate::controllers::ControllerKind;

/// Errors raised while resolving a heroes field.
///
/// They are local to the field that raised them: the GraphQL engine turns them
/// into an entry of the response `errors` array and keeps resolving siblings.
#[derive(Error, Display, Debug)]
#[non_exhaustive]
pub enum HeroesError {
    /// unknown {enum_name} value: '{value}'
    UnknownEnumValue {
        /// The enum the value was checked against.
        enum_name: &'static str,
        /// The offending value code.
        value: String,
    },

    /// invalid {model} payload: {reason}
    Validation {
        /// The model the payload was validated against.
        model: &'static str,
        /// Why validation failed.
        reason: String,
    },

    /// {reason}
    Downstream {
        /// The controller that failed.
        controller: ControllerKind,
        /// The error raised by the controller, untouched.
        reason: BoxError,
    },
}

impl HeroesError {
    pub(crate) fn unknown_enum_value(enum_name: &'static str, value: impl Into<String>) -> Self {
        HeroesError::UnknownEnumValue {
            enum_name,
            value: value.into(),
        }
    }

    pub(crate) fn downstream(controller: ControllerKind) -> impl FnOnce(BoxError) -> Self {
        move |reason| HeroesError::Downstream { controller, reason }
    }

    /// The `extensions.code` reported to GraphQL clients.
    pub fn extension_code(&self) -> &'static str {
        match self {
            HeroesError::UnknownEnumValue { .. } => "UNKNOWN_ENUM_VALUE",
            HeroesError::Validation { .. } => "VALIDATION_ERROR",
            HeroesError::Downstream { .. } => "DOWNSTREAM_ERROR",
        }
    }
}

impl ErrorExtensions for HeroesError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, extensions| {
            extensions.set("code", self.extension_code().to_string());
            match self {
                HeroesError::UnknownEnumValue { enum_name, .. } => {
                    extensions.set("enum", enum_name.to_string());
                }
                HeroesError::Validation { model, .. } => {
                    extensions.set("model", model.to_string());
                }
                HeroesError::Downstream { controller, .. } => {
                    extensions.set("controller", controller.to_string());
                }
            }
        })
    }
}
