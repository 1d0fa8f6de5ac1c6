//! Introspector factory
//!
//! Every call builds a fresh, independent introspector; nothing is cached.

use stresstest_types::{
    ConstructorInfo, FieldInfo, MethodInfo, Modifiers, TypeDescriptor, TypeId, TypeRegistry,
};

use crate::error::IntrospectionError;
use crate::introspector::{AllMembersIntrospector, PublicIntrospector};
use crate::policy::Visibility;

/// Introspector limited to publicly accessible members of `ty`
pub fn public_introspector(
    registry: &TypeRegistry,
    ty: TypeId,
) -> Result<PublicIntrospector<'_>, IntrospectionError> {
    PublicIntrospector::new(registry, ty)
}

/// Introspector over every declared member of `ty`
pub fn all_members_introspector(
    registry: &TypeRegistry,
    ty: TypeId,
) -> Result<AllMembersIntrospector<'_>, IntrospectionError> {
    AllMembersIntrospector::new(registry, ty)
}

/// [`public_introspector`] for a type looked up by name
pub fn public_introspector_by_name<'r>(
    registry: &'r TypeRegistry,
    name: &str,
) -> Result<PublicIntrospector<'r>, IntrospectionError> {
    PublicIntrospector::by_name(registry, name)
}

/// [`all_members_introspector`] for a type looked up by name
pub fn all_members_introspector_by_name<'r>(
    registry: &'r TypeRegistry,
    name: &str,
) -> Result<AllMembersIntrospector<'r>, IntrospectionError> {
    AllMembersIntrospector::by_name(registry, name)
}

/// Introspector for `ty` with a visibility chosen at runtime
pub fn construct(
    registry: &TypeRegistry,
    ty: TypeId,
    visibility: Visibility,
) -> Result<AnyIntrospector<'_>, IntrospectionError> {
    Ok(match visibility {
        Visibility::PublicOnly => public_introspector(registry, ty)?.into(),
        Visibility::AllMembers => all_members_introspector(registry, ty)?.into(),
    })
}

/// [`construct`] for a type looked up by name
pub fn construct_by_name<'r>(
    registry: &'r TypeRegistry,
    name: &str,
    visibility: Visibility,
) -> Result<AnyIntrospector<'r>, IntrospectionError> {
    let ty = registry
        .lookup(name)
        .ok_or_else(|| IntrospectionError::UnknownTypeName {
            name: name.to_string(),
        })?;
    construct(registry, ty, visibility)
}

/// Either introspector variant, for callers choosing the policy at runtime
#[derive(Debug, Clone, Copy)]
pub enum AnyIntrospector<'r> {
    /// Public members only
    Public(PublicIntrospector<'r>),
    /// Every declared member
    AllMembers(AllMembersIntrospector<'r>),
}

macro_rules! dispatch {
    ($self:expr, $intro:ident => $body:expr) => {
        match $self {
            AnyIntrospector::Public($intro) => $body,
            AnyIntrospector::AllMembers($intro) => $body,
        }
    };
}

impl<'r> AnyIntrospector<'r> {
    /// Visibility policy
    pub fn visibility(&self) -> Visibility {
        dispatch!(self, intro => intro.visibility())
    }

    /// Subject type
    pub fn subject(&self) -> &'r TypeDescriptor {
        dispatch!(self, intro => intro.subject())
    }

    /// Subject type id
    pub fn subject_id(&self) -> TypeId {
        dispatch!(self, intro => intro.subject_id())
    }

    /// Modifier flags of the subject type
    pub fn modifiers(&self) -> Modifiers {
        dispatch!(self, intro => intro.modifiers())
    }

    /// Check if a value of `candidate` can be used where the subject is expected
    pub fn can_be_replaced_with(&self, candidate: TypeId) -> Result<bool, IntrospectionError> {
        dispatch!(self, intro => intro.can_be_replaced_with(candidate))
    }

    /// Check if a value of the subject can be used where `target` is expected
    pub fn can_replace(&self, target: TypeId) -> Result<bool, IntrospectionError> {
        dispatch!(self, intro => intro.can_replace(target))
    }

    /// Constructors of the subject only
    pub fn constructors(&self) -> Result<Vec<&'r ConstructorInfo>, IntrospectionError> {
        dispatch!(self, intro => intro.constructors())
    }

    /// Fields of the subject, then of each ancestor
    pub fn fields(&self) -> Result<Vec<&'r FieldInfo>, IntrospectionError> {
        dispatch!(self, intro => intro.fields())
    }

    /// Methods of the subject, then of each ancestor
    pub fn methods(&self) -> Result<Vec<&'r MethodInfo>, IntrospectionError> {
        dispatch!(self, intro => intro.methods())
    }

    /// Types visited by the field and method walks
    pub fn hierarchy(&self) -> Result<Vec<&'r TypeDescriptor>, IntrospectionError> {
        dispatch!(self, intro => intro.hierarchy())
    }

    /// Introspector over another type, with the same policy
    pub fn wrap(&self, ty: TypeId) -> Result<AnyIntrospector<'r>, IntrospectionError> {
        Ok(dispatch!(self, intro => intro.wrap(ty)?.into()))
    }
}

impl<'r> From<PublicIntrospector<'r>> for AnyIntrospector<'r> {
    fn from(intro: PublicIntrospector<'r>) -> Self {
        AnyIntrospector::Public(intro)
    }
}

impl<'r> From<AllMembersIntrospector<'r>> for AnyIntrospector<'r> {
    fn from(intro: AllMembersIntrospector<'r>) -> Self {
        AnyIntrospector::AllMembers(intro)
    }
}
