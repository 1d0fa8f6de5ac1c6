//! Introspection errors

use stresstest_types::{TypeError, TypeId};
use thiserror::Error;

/// Errors raised by introspectors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntrospectionError {
    /// The subject type is not registered
    #[error("Cannot introspect unknown type: {id}")]
    UnknownType {
        /// Requested id
        id: TypeId,
    },

    /// No type is registered under the requested name
    #[error("Cannot introspect undefined type: {name}")]
    UnknownTypeName {
        /// Requested name
        name: String,
    },

    /// The host type system failed to answer a query
    #[error(transparent)]
    Type(#[from] TypeError),
}
