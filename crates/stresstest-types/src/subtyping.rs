//! Subtyping rules
//!
//! Implements the nominal subtyping relation T <: U (T is a subtype of U)
//! over registered types: reflexive, transitive through parents and
//! implemented interfaces, with the root type above everything.

use rustc_hash::FxHashSet;

use crate::error::TypeError;
use crate::registry::TypeRegistry;
use crate::ty::{TypeDescriptor, TypeId};

/// Context for checking subtyping relationships
#[derive(Debug, Clone, Copy)]
pub struct SubtypingContext<'a> {
    /// Registry for resolving types
    registry: &'a TypeRegistry,
}

impl<'a> SubtypingContext<'a> {
    /// Create a new subtyping context
    pub fn new(registry: &'a TypeRegistry) -> Self {
        SubtypingContext { registry }
    }

    /// Check if `sub` is a subtype of `sup` (sub <: sup)
    ///
    /// Returns true if a value of type `sub` can be used where `sup` is
    /// expected. Both types must be registered.
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> Result<bool, TypeError> {
        let sub_ty = self.registry.descriptor(sub)?;
        self.registry.descriptor(sup)?;

        // Reflexivity: T <: T
        if sub == sup {
            return Ok(true);
        }

        // Everything is a subtype of the root, interfaces included
        if sup.is_root() {
            return Ok(true);
        }

        Ok(self.reaches(sub_ty, sup))
    }

    /// Check if `sup` is reachable from `ty` through extends/implements edges
    ///
    /// Each supertype is visited once, so shared interfaces do not multiply
    /// the work.
    fn reaches(&self, ty: &TypeDescriptor, sup: TypeId) -> bool {
        let mut visited = FxHashSet::default();
        let mut stack: Vec<TypeId> = ty.supertypes().collect();

        while let Some(supertype) = stack.pop() {
            if supertype == sup {
                return true;
            }
            if !visited.insert(supertype) {
                continue;
            }
            if let Some(descriptor) = self.registry.get(supertype) {
                stack.extend(descriptor.supertypes().filter(|s| !visited.contains(s)));
            }
        }

        false
    }
}
