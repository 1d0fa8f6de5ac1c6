//! Extraction policies
//!
//! A policy answers one question: which members declared or visible at a
//! single type level may be used. The hierarchy walk built on top of it
//! lives in [`Introspector`](crate::Introspector).

use std::fmt;

use stresstest_types::{ConstructorInfo, FieldInfo, Member, MethodInfo, TypeError, TypeId, TypeRegistry};

/// Visibility policy of an introspector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Publicly accessible members only
    PublicOnly,
    /// Every declared member, whatever its visibility
    AllMembers,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::PublicOnly => write!(f, "public-only"),
            Visibility::AllMembers => write!(f, "all-members"),
        }
    }
}

/// Member extraction for one type level
pub trait ExtractionPolicy: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Visibility this policy implements
    const VISIBILITY: Visibility;

    /// Fields extractable at level `ty`
    fn extract_fields(registry: &TypeRegistry, ty: TypeId) -> Result<Vec<&FieldInfo>, TypeError>;

    /// Methods extractable at level `ty`
    fn extract_methods(registry: &TypeRegistry, ty: TypeId)
        -> Result<Vec<&MethodInfo>, TypeError>;

    /// Constructors of `ty`
    fn extract_constructors(
        registry: &TypeRegistry,
        ty: TypeId,
    ) -> Result<Vec<&ConstructorInfo>, TypeError>;
}

/// Public members, as the host reports them
///
/// The host's public queries already fold in public members inherited from
/// supertypes. Members declared on the root type are left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublicOnly;

impl ExtractionPolicy for PublicOnly {
    const VISIBILITY: Visibility = Visibility::PublicOnly;

    fn extract_fields(registry: &TypeRegistry, ty: TypeId) -> Result<Vec<&FieldInfo>, TypeError> {
        Ok(without_root(registry.public_fields(ty)?))
    }

    fn extract_methods(
        registry: &TypeRegistry,
        ty: TypeId,
    ) -> Result<Vec<&MethodInfo>, TypeError> {
        Ok(without_root(registry.public_methods(ty)?))
    }

    fn extract_constructors(
        registry: &TypeRegistry,
        ty: TypeId,
    ) -> Result<Vec<&ConstructorInfo>, TypeError> {
        registry.public_constructors(ty)
    }
}

/// Every member declared directly at the level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllMembers;

impl ExtractionPolicy for AllMembers {
    const VISIBILITY: Visibility = Visibility::AllMembers;

    fn extract_fields(registry: &TypeRegistry, ty: TypeId) -> Result<Vec<&FieldInfo>, TypeError> {
        Ok(registry.declared_fields(ty)?.iter().collect())
    }

    fn extract_methods(
        registry: &TypeRegistry,
        ty: TypeId,
    ) -> Result<Vec<&MethodInfo>, TypeError> {
        Ok(registry.declared_methods(ty)?.iter().collect())
    }

    fn extract_constructors(
        registry: &TypeRegistry,
        ty: TypeId,
    ) -> Result<Vec<&ConstructorInfo>, TypeError> {
        Ok(registry.declared_constructors(ty)?.iter().collect())
    }
}

fn without_root<T: Member>(members: Vec<&T>) -> Vec<&T> {
    members
        .into_iter()
        .filter(|m| !m.declaring_type().is_root())
        .collect()
}
