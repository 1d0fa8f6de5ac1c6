//! Declarative type tables (TOML)
//!
//! A type table lists types in registration order. Parents and interfaces
//! are referenced by name and must be declared earlier in the table (or be
//! the root type, `Object`).
//!
//! ```toml
//! [[types]]
//! name = "Base"
//! modifiers = ["public"]
//!
//! [[types.fields]]
//! name = "x"
//! type = "int"
//! modifiers = ["public"]
//!
//! [[types]]
//! name = "Derived"
//! extends = "Base"
//!
//! [[types.constructors]]
//! parameters = ["int"]
//! modifiers = ["public"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::definition::{ConstructorDefinition, FieldDefinition, MethodDefinition, TypeDefinition};
use crate::error::TypeError;
use crate::modifiers::Modifiers;
use crate::registry::TypeRegistry;
use crate::ty::{TypeId, TypeKind};

/// Errors that can occur while loading a type table
#[derive(Debug, Error)]
pub enum TableError {
    /// Failed to read the table file
    #[error("Failed to read type table: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse type table: {0}")]
    Parse(#[from] toml::de::Error),

    /// A declared type was rejected by the registry
    #[error("Invalid type table: {0}")]
    Type(#[from] TypeError),
}

/// A list of type declarations
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeTable {
    /// Declared types, in registration order
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// Declaration of one type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeDecl {
    /// Type name
    pub name: String,

    /// `class` (default) or `interface`
    #[serde(default)]
    pub kind: TypeKind,

    /// Modifier keywords
    #[serde(default)]
    pub modifiers: Vec<String>,

    /// Parent class name (defaults to the root type for classes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Implemented interface names
    #[serde(default)]
    pub implements: Vec<String>,

    /// Forbid member enumeration
    #[serde(default)]
    pub opaque: bool,

    /// Declared fields
    #[serde(default)]
    pub fields: Vec<FieldDecl>,

    /// Declared methods
    #[serde(default)]
    pub methods: Vec<MethodDecl>,

    /// Declared constructors
    #[serde(default)]
    pub constructors: Vec<ConstructorDecl>,
}

/// Declaration of a field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDecl {
    /// Field name
    pub name: String,

    /// Declared type name
    #[serde(rename = "type")]
    pub type_name: String,

    /// Modifier keywords
    #[serde(default)]
    pub modifiers: Vec<String>,
}

/// Declaration of a method
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodDecl {
    /// Method name
    pub name: String,

    /// Parameter type names
    #[serde(default)]
    pub parameters: Vec<String>,

    /// Return type name (default: "void")
    #[serde(default = "default_return_type")]
    pub returns: String,

    /// Modifier keywords
    #[serde(default)]
    pub modifiers: Vec<String>,
}

/// Declaration of a constructor
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConstructorDecl {
    /// Parameter type names
    #[serde(default)]
    pub parameters: Vec<String>,

    /// Modifier keywords
    #[serde(default)]
    pub modifiers: Vec<String>,
}

fn default_return_type() -> String {
    "void".to_string()
}

impl TypeTable {
    /// Parse a table from a file
    pub fn from_file(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a table from a string
    pub fn from_str(content: &str) -> Result<Self, TableError> {
        let table: TypeTable = toml::from_str(content)?;
        tracing::debug!(types = table.types.len(), "parsed type table");
        Ok(table)
    }

    /// Register every declared type into an existing registry
    ///
    /// Returns the ids of the new types in declaration order. Stops at the
    /// first rejected declaration; types declared before it stay registered.
    pub fn register_into(&self, registry: &mut TypeRegistry) -> Result<Vec<TypeId>, TableError> {
        let mut ids = Vec::with_capacity(self.types.len());
        for decl in &self.types {
            let definition = decl.to_definition(registry)?;
            ids.push(registry.define(definition)?);
        }
        Ok(ids)
    }

    /// Build a fresh registry holding the root type and every declared type
    pub fn into_registry(self) -> Result<TypeRegistry, TableError> {
        TypeRegistry::from_table(&self)
    }
}

impl TypeRegistry {
    /// Build a registry from a type table
    pub fn from_table(table: &TypeTable) -> Result<Self, TableError> {
        let mut registry = TypeRegistry::new();
        table.register_into(&mut registry)?;
        Ok(registry)
    }
}

impl TypeDecl {
    /// Resolve names against `registry` and build a definition
    pub fn to_definition(&self, registry: &TypeRegistry) -> Result<TypeDefinition, TypeError> {
        let mut definition = match self.kind {
            TypeKind::Class => TypeDefinition::class(&self.name),
            TypeKind::Interface => TypeDefinition::interface(&self.name),
        };
        definition = definition.with_modifiers(Modifiers::from_keywords(&self.modifiers)?);

        if let Some(parent) = &self.extends {
            definition = definition.extends(resolve(registry, parent)?);
        }
        for interface in &self.implements {
            definition = definition.implements(resolve(registry, interface)?);
        }

        for field in &self.fields {
            definition = definition.field(
                FieldDefinition::new(&field.name, &field.type_name)
                    .with_modifiers(Modifiers::from_keywords(&field.modifiers)?),
            );
        }

        for method in &self.methods {
            let mut def = MethodDefinition::new(&method.name)
                .returns(&method.returns)
                .with_modifiers(Modifiers::from_keywords(&method.modifiers)?);
            for param in &method.parameters {
                def = def.param(param);
            }
            definition = definition.method(def);
        }

        for ctor in &self.constructors {
            let mut def = ConstructorDefinition::new()
                .with_modifiers(Modifiers::from_keywords(&ctor.modifiers)?);
            for param in &ctor.parameters {
                def = def.param(param);
            }
            definition = definition.constructor(def);
        }

        if self.opaque {
            definition = definition.opaque();
        }

        Ok(definition)
    }
}

fn resolve(registry: &TypeRegistry, name: &str) -> Result<TypeId, TypeError> {
    registry.lookup(name).ok_or_else(|| TypeError::UndefinedType {
        name: name.to_string(),
    })
}
