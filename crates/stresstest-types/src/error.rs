//! Type system errors

use thiserror::Error;

use crate::modifiers::Modifiers;
use crate::ty::TypeId;

/// Errors raised while defining types or querying their metadata
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    /// No type is registered under this id
    #[error("Unknown type: {id}")]
    UnknownType {
        /// Id that was not found
        id: TypeId,
    },

    /// No type is registered under this name
    #[error("Undefined type: {name}")]
    UndefinedType {
        /// Type name that was not found
        name: String,
    },

    /// A type with the same name is already registered
    #[error("Type already defined: {name}")]
    DuplicateType {
        /// Conflicting type name
        name: String,
    },

    /// Two members with the same identity declared on one type
    #[error("Duplicate member {member} in {type_name}")]
    DuplicateMember {
        /// Declaring type
        type_name: String,
        /// Member signature
        member: String,
    },

    /// The requested parent cannot be extended
    #[error("{type_name} cannot extend {parent}")]
    InvalidParent {
        /// Type being defined
        type_name: String,
        /// Rejected parent type
        parent: String,
    },

    /// An implemented type is not an interface
    #[error("{type_name} cannot implement {interface}: not an interface")]
    InvalidInterface {
        /// Type being defined
        type_name: String,
        /// Rejected type
        interface: String,
    },

    /// The host refuses to enumerate this type's members
    #[error("Members of {name} cannot be enumerated")]
    NotReflectable {
        /// Type whose members were requested
        name: String,
    },

    /// More than one of public, protected and private is set
    #[error("Conflicting visibility on {member} in {type_name}: {modifiers}")]
    ConflictingVisibility {
        /// Declaring type
        type_name: String,
        /// Offending member, or the type name for the type itself
        member: String,
        /// Modifiers as declared
        modifiers: Modifiers,
    },

    /// Unrecognized modifier keyword
    #[error("Invalid modifier: {keyword}")]
    InvalidModifier {
        /// Keyword as written
        keyword: String,
    },
}
