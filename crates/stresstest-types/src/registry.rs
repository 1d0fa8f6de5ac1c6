//! Type registry
//!
//! Owns every [`TypeDescriptor`] and answers the queries the introspection
//! layer needs: member lists at two granularities (declared at one level,
//! or publicly visible including inherited members), modifiers, parents,
//! and the subtype relation.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::definition::TypeDefinition;
use crate::error::TypeError;
use crate::member::{ConstructorInfo, FieldInfo, Member, MethodInfo};
use crate::modifiers::Modifiers;
use crate::subtyping::SubtypingContext;
use crate::ty::{TypeDescriptor, TypeId, TypeKind};

/// Name of the universal root type
pub const ROOT_TYPE_NAME: &str = "Object";

/// Registry of type descriptors, indexed by [`TypeId`]
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    /// Types indexed by id
    types: Vec<TypeDescriptor>,
    /// Type name to id mapping
    name_to_id: FxHashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Create a registry holding only the universal root type
    pub fn new() -> Self {
        let root = root_descriptor();
        let mut name_to_id = FxHashMap::default();
        name_to_id.insert(root.name.clone(), root.id);

        Self {
            types: vec![root],
            name_to_id,
        }
    }

    /// Register a new type
    ///
    /// Classes without a parent extend the root type. Interfaces never have
    /// a parent; they extend other interfaces through `implements`.
    pub fn define(&mut self, definition: TypeDefinition) -> Result<TypeId, TypeError> {
        if self.name_to_id.contains_key(&definition.name) {
            return Err(TypeError::DuplicateType {
                name: definition.name,
            });
        }

        let parent = match definition.kind {
            TypeKind::Class => {
                let parent_id = definition.parent.unwrap_or(TypeId::ROOT);
                let parent = self.descriptor(parent_id)?;
                if parent.is_interface() || parent.modifiers.is_final() {
                    return Err(TypeError::InvalidParent {
                        type_name: definition.name,
                        parent: parent.name.clone(),
                    });
                }
                Some(parent_id)
            }
            TypeKind::Interface => {
                if let Some(parent_id) = definition.parent {
                    return Err(TypeError::InvalidParent {
                        type_name: definition.name,
                        parent: self.descriptor(parent_id)?.name.clone(),
                    });
                }
                None
            }
        };

        for &interface_id in &definition.interfaces {
            let interface = self.descriptor(interface_id)?;
            if !interface.is_interface() {
                return Err(TypeError::InvalidInterface {
                    type_name: definition.name,
                    interface: interface.name.clone(),
                });
            }
        }

        let id = TypeId(self.types.len() as u32);
        let TypeDefinition {
            name,
            kind,
            modifiers,
            interfaces,
            fields,
            methods,
            constructors,
            reflectable,
            ..
        } = definition;

        let fields: Vec<FieldInfo> = fields.into_iter().map(|f| f.into_info(id)).collect();
        let methods: Vec<MethodInfo> = methods.into_iter().map(|m| m.into_info(id)).collect();
        let constructors: Vec<ConstructorInfo> =
            constructors.into_iter().map(|c| c.into_info(id)).collect();

        check_unique(&name, &fields, |f| f.name.clone())?;
        check_unique(&name, &methods, |m| {
            format!("{}({})", m.name, m.parameter_types.join(", "))
        })?;
        check_unique(&name, &constructors, |c| c.to_string())?;

        check_visibility(&name, &name, modifiers)?;
        for field in &fields {
            check_visibility(&name, &field.name, field.modifiers)?;
        }
        for method in &methods {
            check_visibility(&name, &method.to_string(), method.modifiers)?;
        }
        for constructor in &constructors {
            check_visibility(&name, &constructor.to_string(), constructor.modifiers)?;
        }

        tracing::debug!(
            type_name = %name,
            id = %id,
            parent = ?parent,
            fields = fields.len(),
            methods = methods.len(),
            constructors = constructors.len(),
            "registered type"
        );

        self.name_to_id.insert(name.clone(), id);
        self.types.push(TypeDescriptor {
            id,
            name,
            kind,
            modifiers,
            parent,
            interfaces,
            fields,
            methods,
            constructors,
            reflectable,
        });

        Ok(id)
    }

    /// Get type by id
    pub fn get(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.types.get(id.index())
    }

    /// Get type id by name
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.name_to_id.get(name).copied()
    }

    /// Get type by name
    pub fn get_by_name(&self, name: &str) -> Option<&TypeDescriptor> {
        self.lookup(name).and_then(|id| self.get(id))
    }

    /// Get type by id, failing for unknown ids
    pub fn descriptor(&self, id: TypeId) -> Result<&TypeDescriptor, TypeError> {
        self.get(id).ok_or(TypeError::UnknownType { id })
    }

    /// The universal root type
    pub fn root(&self) -> &TypeDescriptor {
        &self.types[TypeId::ROOT.index()]
    }

    /// Modifier flags of a type
    pub fn modifiers(&self, id: TypeId) -> Result<Modifiers, TypeError> {
        Ok(self.descriptor(id)?.modifiers)
    }

    /// Direct parent of a type
    pub fn parent(&self, id: TypeId) -> Result<Option<TypeId>, TypeError> {
        Ok(self.descriptor(id)?.parent)
    }

    /// Inheritance chain of a type
    ///
    /// The first element is the type itself, the last is its most distant
    /// ancestor (the root type for classes).
    pub fn ancestors(&self, id: TypeId) -> Result<Vec<&TypeDescriptor>, TypeError> {
        let mut chain = Vec::new();
        let mut current = Some(id);

        while let Some(id) = current {
            let ty = self.descriptor(id)?;
            chain.push(ty);
            current = ty.parent;
        }

        Ok(chain)
    }

    /// Fields declared directly on a type, in declaration order
    pub fn declared_fields(&self, id: TypeId) -> Result<&[FieldInfo], TypeError> {
        Ok(&self.reflect(id)?.fields)
    }

    /// Methods declared directly on a type, in declaration order
    pub fn declared_methods(&self, id: TypeId) -> Result<&[MethodInfo], TypeError> {
        Ok(&self.reflect(id)?.methods)
    }

    /// Constructors declared directly on a type, in declaration order
    pub fn declared_constructors(&self, id: TypeId) -> Result<&[ConstructorInfo], TypeError> {
        Ok(&self.reflect(id)?.constructors)
    }

    /// Public fields of a type, including public fields of every supertype
    ///
    /// Own fields come first, then the parent's, then each interface's.
    /// A field reachable through several supertypes is listed once.
    pub fn public_fields(&self, id: TypeId) -> Result<Vec<&FieldInfo>, TypeError> {
        let mut seen = FxHashSet::default();
        let mut fields = Vec::new();

        for ty in self.supertype_closure(id)? {
            for field in ty.fields.iter().filter(|f| f.is_public()) {
                if seen.insert(field.key()) {
                    fields.push(field);
                }
            }
        }

        Ok(fields)
    }

    /// Public methods of a type, including inherited public methods
    ///
    /// An inherited method is dropped when a method with the same signature
    /// was already collected closer to the type (it is overridden).
    pub fn public_methods(&self, id: TypeId) -> Result<Vec<&MethodInfo>, TypeError> {
        let mut signatures: FxHashSet<(&str, &[String])> = FxHashSet::default();
        let mut methods = Vec::new();

        for ty in self.supertype_closure(id)? {
            for method in ty.methods.iter().filter(|m| m.is_public()) {
                if signatures.insert((method.name.as_str(), method.parameter_types.as_slice())) {
                    methods.push(method);
                }
            }
        }

        Ok(methods)
    }

    /// Public constructors of a type (constructors are never inherited)
    pub fn public_constructors(&self, id: TypeId) -> Result<Vec<&ConstructorInfo>, TypeError> {
        Ok(self
            .reflect(id)?
            .constructors
            .iter()
            .filter(|c| c.is_public())
            .collect())
    }

    /// Check if `sub` is a subtype of `sup` (sub <: sup)
    ///
    /// Returns true if a value of type `sub` can be used where `sup` is expected.
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> Result<bool, TypeError> {
        SubtypingContext::new(self).is_subtype(sub, sup)
    }

    /// Number of registered types, the root type included
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: the root type is registered on creation
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all types in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter()
    }

    /// A type followed by every supertype reachable from it, depth first
    ///
    /// The parent is explored before the interfaces. Each type appears once,
    /// at its first discovery, and must be reflectable.
    fn supertype_closure(&self, id: TypeId) -> Result<Vec<&TypeDescriptor>, TypeError> {
        let mut visited = FxHashSet::default();
        let mut closure = Vec::new();
        let mut stack = vec![id];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }

            let ty = self.reflect(id)?;
            closure.push(ty);

            let start = stack.len();
            stack.extend(ty.supertypes().filter(|s| !visited.contains(s)));
            stack[start..].reverse();
        }

        Ok(closure)
    }

    fn reflect(&self, id: TypeId) -> Result<&TypeDescriptor, TypeError> {
        let ty = self.descriptor(id)?;
        if !ty.reflectable {
            return Err(TypeError::NotReflectable {
                name: ty.name.clone(),
            });
        }
        Ok(ty)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn check_unique<T, F>(type_name: &str, members: &[T], signature: F) -> Result<(), TypeError>
where
    F: Fn(&T) -> String,
{
    let mut seen = FxHashSet::default();
    for member in members {
        let sig = signature(member);
        if !seen.insert(sig.clone()) {
            return Err(TypeError::DuplicateMember {
                type_name: type_name.to_string(),
                member: sig,
            });
        }
    }
    Ok(())
}

fn check_visibility(type_name: &str, member: &str, modifiers: Modifiers) -> Result<(), TypeError> {
    if modifiers.has_single_visibility() {
        return Ok(());
    }
    Err(TypeError::ConflictingVisibility {
        type_name: type_name.to_string(),
        member: member.to_string(),
        modifiers,
    })
}

fn root_descriptor() -> TypeDescriptor {
    let id = TypeId::ROOT;
    let method = |name: &str, params: &[&str], returns: &str| MethodInfo {
        name: name.to_string(),
        parameter_types: params.iter().map(|p| p.to_string()).collect(),
        return_type: returns.to_string(),
        declaring_type: id,
        modifiers: Modifiers::PUBLIC,
    };

    TypeDescriptor {
        id,
        name: ROOT_TYPE_NAME.to_string(),
        kind: TypeKind::Class,
        modifiers: Modifiers::PUBLIC,
        parent: None,
        interfaces: Vec::new(),
        fields: Vec::new(),
        methods: vec![
            method("equals", &[ROOT_TYPE_NAME], "boolean"),
            method("hashCode", &[], "int"),
            method("toString", &[], "String"),
        ],
        constructors: vec![ConstructorInfo {
            parameter_types: Vec::new(),
            declaring_type: id,
            modifiers: Modifiers::PUBLIC,
        }],
        reflectable: true,
    }
}
