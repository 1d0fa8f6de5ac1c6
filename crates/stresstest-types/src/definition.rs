//! Type definitions
//!
//! Builders describing a type before it is registered. A definition names
//! its parent and interfaces by [`TypeId`], so supertypes must be
//! registered first; this keeps every hierarchy acyclic.

use crate::member::{ConstructorInfo, FieldInfo, MethodInfo};
use crate::modifiers::Modifiers;
use crate::ty::{TypeId, TypeKind};

macro_rules! modifier_setters {
    () => {
        /// Make the member public
        pub fn public(mut self) -> Self {
            self.modifiers = self.modifiers.with_visibility(Modifiers::PUBLIC);
            self
        }

        /// Make the member protected
        pub fn protected(mut self) -> Self {
            self.modifiers = self.modifiers.with_visibility(Modifiers::PROTECTED);
            self
        }

        /// Make the member private
        pub fn private(mut self) -> Self {
            self.modifiers = self.modifiers.with_visibility(Modifiers::PRIVATE);
            self
        }

        /// Add modifier flags
        pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
            self.modifiers = self.modifiers.union(modifiers);
            self
        }
    };
}

/// Definition for a field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,
    /// Declared type name
    pub type_name: String,
    /// Modifier flags (package-private by default)
    pub modifiers: Modifiers,
}

impl FieldDefinition {
    /// Create a package-private field
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            modifiers: Modifiers::NONE,
        }
    }

    modifier_setters!();

    /// Mark as static field
    pub fn as_static(self) -> Self {
        self.with_modifiers(Modifiers::STATIC)
    }

    /// Mark as final field
    pub fn as_final(self) -> Self {
        self.with_modifiers(Modifiers::FINAL)
    }

    pub(crate) fn into_info(self, declaring_type: TypeId) -> FieldInfo {
        FieldInfo {
            name: self.name,
            type_name: self.type_name,
            declaring_type,
            modifiers: self.modifiers,
        }
    }
}

/// Definition for a method
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    /// Method name
    pub name: String,
    /// Parameter type names
    pub parameter_types: Vec<String>,
    /// Return type name
    pub return_type: String,
    /// Modifier flags (package-private by default)
    pub modifiers: Modifiers,
}

impl MethodDefinition {
    /// Create a package-private method taking no parameters and returning `void`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_types: Vec::new(),
            return_type: "void".to_string(),
            modifiers: Modifiers::NONE,
        }
    }

    modifier_setters!();

    /// Add a parameter
    pub fn param(mut self, type_name: impl Into<String>) -> Self {
        self.parameter_types.push(type_name.into());
        self
    }

    /// Set the return type
    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = type_name.into();
        self
    }

    /// Mark as static method
    pub fn as_static(self) -> Self {
        self.with_modifiers(Modifiers::STATIC)
    }

    /// Mark as abstract method
    pub fn as_abstract(self) -> Self {
        self.with_modifiers(Modifiers::ABSTRACT)
    }

    pub(crate) fn into_info(self, declaring_type: TypeId) -> MethodInfo {
        MethodInfo {
            name: self.name,
            parameter_types: self.parameter_types,
            return_type: self.return_type,
            declaring_type,
            modifiers: self.modifiers,
        }
    }
}

/// Definition for a constructor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstructorDefinition {
    /// Parameter type names
    pub parameter_types: Vec<String>,
    /// Modifier flags (package-private by default)
    pub modifiers: Modifiers,
}

impl ConstructorDefinition {
    /// Create a package-private no-arg constructor
    pub fn new() -> Self {
        Self::default()
    }

    modifier_setters!();

    /// Add a parameter
    pub fn param(mut self, type_name: impl Into<String>) -> Self {
        self.parameter_types.push(type_name.into());
        self
    }

    pub(crate) fn into_info(self, declaring_type: TypeId) -> ConstructorInfo {
        ConstructorInfo {
            parameter_types: self.parameter_types,
            declaring_type,
            modifiers: self.modifiers,
        }
    }
}

/// Definition for a class or interface
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    /// Type name (unique within a registry)
    pub name: String,
    /// Class or interface
    pub kind: TypeKind,
    /// Modifier flags of the type
    pub modifiers: Modifiers,
    /// Parent class; classes default to the root type
    pub parent: Option<TypeId>,
    /// Implemented interfaces (extended interfaces for an interface)
    pub interfaces: Vec<TypeId>,
    /// Declared fields
    pub fields: Vec<FieldDefinition>,
    /// Declared methods
    pub methods: Vec<MethodDefinition>,
    /// Declared constructors
    pub constructors: Vec<ConstructorDefinition>,
    /// Whether members may be enumerated
    pub reflectable: bool,
}

impl TypeDefinition {
    fn new(name: impl Into<String>, kind: TypeKind, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers,
            parent: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            reflectable: true,
        }
    }

    /// Start a package-private class
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class, Modifiers::NONE)
    }

    /// Start an interface
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(
            name,
            TypeKind::Interface,
            Modifiers::INTERFACE | Modifiers::ABSTRACT,
        )
    }

    modifier_setters!();

    /// Set the parent class
    pub fn extends(mut self, parent: TypeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Add an implemented interface
    pub fn implements(mut self, interface: TypeId) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a field
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a method
    pub fn method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a constructor
    pub fn constructor(mut self, constructor: ConstructorDefinition) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Forbid member enumeration for this type
    pub fn opaque(mut self) -> Self {
        self.reflectable = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_definition_builder() {
        let field = FieldDefinition::new("id", "long").private().as_final();
        assert!(field.modifiers.is_private());
        assert!(field.modifiers.is_final());

        let field = field.public();
        assert!(field.modifiers.is_public());
        assert!(!field.modifiers.is_private());
    }

    #[test]
    fn test_method_definition_builder() {
        let method = MethodDefinition::new("put")
            .param("String")
            .param("int")
            .returns("boolean")
            .public();
        assert_eq!(method.parameter_types, vec!["String", "int"]);
        assert_eq!(method.return_type, "boolean");
        assert!(method.modifiers.is_public());
    }

    #[test]
    fn test_interface_definition_flags() {
        let def = TypeDefinition::interface("Shape").public();
        assert_eq!(def.kind, TypeKind::Interface);
        assert!(def.modifiers.is_interface());
        assert!(def.modifiers.is_abstract());
        assert!(def.modifiers.is_public());
        assert!(def.reflectable);
        assert!(!def.opaque().reflectable);
    }
}
