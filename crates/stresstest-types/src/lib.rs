//! Stresstest Type System
//!
//! Precomputed metadata for the types a stress test can generate: type
//! descriptors, declared members, modifier flags, and the nominal subtype
//! relation between types.
//!
//! Every [`TypeRegistry`] starts out holding the universal root type
//! (`Object`). Classes registered without an explicit parent extend it.

#![warn(missing_docs)]

pub mod definition;
pub mod error;
pub mod member;
pub mod modifiers;
pub mod registry;
pub mod subtyping;
pub mod table;
pub mod ty;

pub use definition::{ConstructorDefinition, FieldDefinition, MethodDefinition, TypeDefinition};
pub use error::TypeError;
pub use member::{ConstructorInfo, FieldInfo, Member, MemberKey, MethodInfo, CONSTRUCTOR_NAME};
pub use modifiers::Modifiers;
pub use registry::{TypeRegistry, ROOT_TYPE_NAME};
pub use subtyping::SubtypingContext;
pub use table::{ConstructorDecl, FieldDecl, MethodDecl, TableError, TypeDecl, TypeTable};
pub use ty::{TypeDescriptor, TypeId, TypeKind};
