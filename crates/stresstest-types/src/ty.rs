//! Core type descriptors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::member::{ConstructorInfo, FieldInfo, MethodInfo};
use crate::modifiers::Modifiers;

/// Unique identifier for a type in a [`TypeRegistry`](crate::TypeRegistry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// Id of the universal root type, present in every registry
    pub const ROOT: TypeId = TypeId(0);

    /// Check if this is the universal root type
    pub const fn is_root(&self) -> bool {
        self.0 == Self::ROOT.0
    }

    /// Position of the type in its registry
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Type kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Class (single inheritance)
    #[default]
    Class,
    /// Interface (no parent, may extend other interfaces)
    Interface,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
        }
    }
}

/// Metadata for one registered type
///
/// Member lists are not exposed directly; they are read through the
/// registry, which enforces reflectability.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub(crate) id: TypeId,
    pub(crate) name: String,
    pub(crate) kind: TypeKind,
    pub(crate) modifiers: Modifiers,
    pub(crate) parent: Option<TypeId>,
    pub(crate) interfaces: Vec<TypeId>,
    pub(crate) fields: Vec<FieldInfo>,
    pub(crate) methods: Vec<MethodInfo>,
    pub(crate) constructors: Vec<ConstructorInfo>,
    pub(crate) reflectable: bool,
}

impl TypeDescriptor {
    /// Type id
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type kind
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Modifier flags of the type itself
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Direct parent (`None` for the root type and for interfaces)
    pub fn parent(&self) -> Option<TypeId> {
        self.parent
    }

    /// Directly implemented (or, for interfaces, extended) interfaces
    pub fn interfaces(&self) -> &[TypeId] {
        &self.interfaces
    }

    /// Check if this is an interface
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Check if this is the universal root type
    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }

    /// Whether the host allows enumerating this type's members
    pub fn is_reflectable(&self) -> bool {
        self.reflectable
    }

    /// Direct supertypes: the parent first, then interfaces in declaration order
    pub fn supertypes(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.parent.into_iter().chain(self.interfaces.iter().copied())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}
