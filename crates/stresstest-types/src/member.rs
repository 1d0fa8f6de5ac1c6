//! Member metadata: fields, methods and constructors

use std::fmt;

use crate::modifiers::Modifiers;
use crate::ty::TypeId;

/// Name reported for constructors
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Identity of a member within a registry
///
/// Two members with equal keys are the same declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberKey<'a> {
    /// Type that declares the member
    pub declaring_type: TypeId,
    /// Member name
    pub name: &'a str,
    /// Parameter types (empty for fields)
    pub parameters: &'a [String],
}

/// Common view over fields, methods and constructors
pub trait Member {
    /// Member name
    fn name(&self) -> &str;

    /// Type that declares the member
    fn declaring_type(&self) -> TypeId;

    /// Modifier flags
    fn modifiers(&self) -> Modifiers;

    /// Identity of the declaration
    fn key(&self) -> MemberKey<'_>;

    /// Check the public flag
    fn is_public(&self) -> bool {
        self.modifiers().is_public()
    }
}

/// Field metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    /// Field name
    pub name: String,
    /// Declared type name
    pub type_name: String,
    /// Declaring type
    pub declaring_type: TypeId,
    /// Modifier flags
    pub modifiers: Modifiers,
}

impl Member for FieldInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn declaring_type(&self) -> TypeId {
        self.declaring_type
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn key(&self) -> MemberKey<'_> {
        MemberKey {
            declaring_type: self.declaring_type,
            name: &self.name,
            parameters: &[],
        }
    }
}

impl fmt::Display for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_name)
    }
}

/// Method metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodInfo {
    /// Method name
    pub name: String,
    /// Parameter type names
    pub parameter_types: Vec<String>,
    /// Return type name
    pub return_type: String,
    /// Declaring type
    pub declaring_type: TypeId,
    /// Modifier flags
    pub modifiers: Modifiers,
}

impl MethodInfo {
    /// Check if both methods have the same name and parameter types
    ///
    /// A method in a subtype with the same signature overrides (or hides)
    /// the supertype's method.
    pub fn same_signature(&self, other: &MethodInfo) -> bool {
        self.name == other.name && self.parameter_types == other.parameter_types
    }
}

impl Member for MethodInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn declaring_type(&self) -> TypeId {
        self.declaring_type
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn key(&self) -> MemberKey<'_> {
        MemberKey {
            declaring_type: self.declaring_type,
            name: &self.name,
            parameters: &self.parameter_types,
        }
    }
}

impl fmt::Display for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}): {}",
            self.name,
            self.parameter_types.join(", "),
            self.return_type
        )
    }
}

/// Constructor metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstructorInfo {
    /// Parameter type names
    pub parameter_types: Vec<String>,
    /// Declaring type
    pub declaring_type: TypeId,
    /// Modifier flags
    pub modifiers: Modifiers,
}

impl Member for ConstructorInfo {
    fn name(&self) -> &str {
        CONSTRUCTOR_NAME
    }

    fn declaring_type(&self) -> TypeId {
        self.declaring_type
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn key(&self) -> MemberKey<'_> {
        MemberKey {
            declaring_type: self.declaring_type,
            name: CONSTRUCTOR_NAME,
            parameters: &self.parameter_types,
        }
    }
}

impl fmt::Display for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", CONSTRUCTOR_NAME, self.parameter_types.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, params: &[&str], declaring: u32) -> MethodInfo {
        MethodInfo {
            name: name.to_string(),
            parameter_types: params.iter().map(|p| p.to_string()).collect(),
            return_type: "void".to_string(),
            declaring_type: TypeId(declaring),
            modifiers: Modifiers::PUBLIC,
        }
    }

    #[test]
    fn test_same_signature_ignores_declaring_type() {
        let base = method("run", &["int"], 1);
        let derived = method("run", &["int"], 2);
        let overload = method("run", &["long"], 2);

        assert!(base.same_signature(&derived));
        assert!(!base.same_signature(&overload));
        assert_ne!(base.key(), derived.key());
    }

    #[test]
    fn test_member_display() {
        let field = FieldInfo {
            name: "count".to_string(),
            type_name: "int".to_string(),
            declaring_type: TypeId(1),
            modifiers: Modifiers::PRIVATE,
        };
        assert_eq!(field.to_string(), "count: int");
        assert!(!field.is_public());

        let m = method("put", &["String", "int"], 1);
        assert_eq!(m.to_string(), "put(String, int): void");

        let ctor = ConstructorInfo {
            parameter_types: vec!["int".to_string()],
            declaring_type: TypeId(1),
            modifiers: Modifiers::PUBLIC,
        };
        assert_eq!(ctor.name(), CONSTRUCTOR_NAME);
        assert_eq!(ctor.to_string(), "<init>(int)");
    }
}
