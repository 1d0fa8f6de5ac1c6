//! Type introspector
//!
//! An [`Introspector`] binds one subject type and one [`ExtractionPolicy`].
//! Fields and methods are aggregated by walking the subject's ancestors,
//! each level wrapped under the same policy, and stopping before the root
//! type. Constructors are never aggregated.

use std::fmt;
use std::marker::PhantomData;

use rustc_hash::FxHashSet;
use stresstest_types::{
    ConstructorInfo, FieldInfo, Member, MethodInfo, Modifiers, TypeDescriptor, TypeError, TypeId,
    TypeRegistry,
};

use crate::error::IntrospectionError;
use crate::policy::{AllMembers, ExtractionPolicy, PublicOnly, Visibility};

/// Introspector restricted to public members
pub type PublicIntrospector<'r> = Introspector<'r, PublicOnly>;

/// Introspector seeing every declared member
pub type AllMembersIntrospector<'r> = Introspector<'r, AllMembers>;

/// Read-only view of one registered type under a fixed visibility policy
///
/// The policy is part of the type, so [`wrap`](Introspector::wrap) can only
/// ever produce an introspector with the same policy.
#[derive(Clone, Copy)]
pub struct Introspector<'r, P: ExtractionPolicy> {
    registry: &'r TypeRegistry,
    subject: &'r TypeDescriptor,
    policy: PhantomData<P>,
}

impl<'r, P: ExtractionPolicy> Introspector<'r, P> {
    /// Bind an introspector to a registered type
    pub fn new(registry: &'r TypeRegistry, ty: TypeId) -> Result<Self, IntrospectionError> {
        let subject = registry
            .get(ty)
            .ok_or(IntrospectionError::UnknownType { id: ty })?;

        Ok(Self {
            registry,
            subject,
            policy: PhantomData,
        })
    }

    /// Bind an introspector to a type looked up by name
    pub fn by_name(registry: &'r TypeRegistry, name: &str) -> Result<Self, IntrospectionError> {
        let ty = registry
            .lookup(name)
            .ok_or_else(|| IntrospectionError::UnknownTypeName {
                name: name.to_string(),
            })?;
        Self::new(registry, ty)
    }

    /// Registry the subject belongs to
    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Subject type
    pub fn subject(&self) -> &'r TypeDescriptor {
        self.subject
    }

    /// Subject type id
    pub fn subject_id(&self) -> TypeId {
        self.subject.id()
    }

    /// Visibility policy
    pub fn visibility(&self) -> Visibility {
        P::VISIBILITY
    }

    /// Modifier flags of the subject type
    pub fn modifiers(&self) -> Modifiers {
        self.subject.modifiers()
    }

    /// Check if a value of `candidate` can be used where the subject is expected
    pub fn can_be_replaced_with(&self, candidate: TypeId) -> Result<bool, IntrospectionError> {
        Ok(self.registry.is_subtype(candidate, self.subject_id())?)
    }

    /// Check if a value of the subject can be used where `target` is expected
    pub fn can_replace(&self, target: TypeId) -> Result<bool, IntrospectionError> {
        Ok(self.registry.is_subtype(self.subject_id(), target)?)
    }

    /// Introspector over another type, with the same policy
    pub fn wrap(&self, ty: TypeId) -> Result<Introspector<'r, P>, IntrospectionError> {
        Introspector::new(self.registry, ty)
    }

    /// Constructors of the subject only
    pub fn constructors(&self) -> Result<Vec<&'r ConstructorInfo>, IntrospectionError> {
        Ok(P::extract_constructors(self.registry, self.subject_id())?)
    }

    /// Fields of the subject, then of each ancestor, nearest first
    pub fn fields(&self) -> Result<Vec<&'r FieldInfo>, IntrospectionError> {
        self.aggregate(P::extract_fields)
    }

    /// Methods of the subject, then of each ancestor, nearest first
    pub fn methods(&self) -> Result<Vec<&'r MethodInfo>, IntrospectionError> {
        self.aggregate(P::extract_methods)
    }

    /// Types visited by the field and method walks, subject first
    ///
    /// Empty when the subject is the root type.
    pub fn hierarchy(&self) -> Result<Vec<&'r TypeDescriptor>, IntrospectionError> {
        Ok(self.levels()?.into_iter().map(|level| level.subject).collect())
    }

    fn levels(&self) -> Result<Vec<Self>, IntrospectionError> {
        let mut levels = Vec::new();
        let mut level = (!self.subject.is_root()).then_some(*self);

        while let Some(current) = level {
            levels.push(current);
            level = match current.subject.parent() {
                Some(parent) if !parent.is_root() => Some(current.wrap(parent)?),
                _ => None,
            };
        }

        Ok(levels)
    }

    fn aggregate<T, F>(&self, extract: F) -> Result<Vec<&'r T>, IntrospectionError>
    where
        T: Member,
        F: Fn(&'r TypeRegistry, TypeId) -> Result<Vec<&'r T>, TypeError>,
    {
        let mut seen = FxHashSet::default();
        let mut members = Vec::new();

        for level in self.levels()? {
            let extracted = extract(level.registry, level.subject_id())?;
            tracing::trace!(
                subject = %self.subject.name(),
                level = %level.subject.name(),
                visibility = %P::VISIBILITY,
                extracted = extracted.len(),
                "walked type level"
            );

            // Public extraction already folds in inherited members; keep the first sighting
            for member in extracted {
                if seen.insert(member.key()) {
                    members.push(member);
                }
            }
        }

        Ok(members)
    }
}

impl<P: ExtractionPolicy> fmt::Debug for Introspector<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Introspector")
            .field("subject", &self.subject.name())
            .field("visibility", &P::VISIBILITY)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stresstest_types::{ConstructorDefinition, FieldDefinition, MethodDefinition, TypeDefinition};

    fn names<T: Member>(members: &[&T]) -> Vec<String> {
        members.iter().map(|m| m.name().to_string()).collect()
    }

    // A -> B -> C, each declaring one public and one private field and method
    fn chain() -> (TypeRegistry, TypeId, TypeId, TypeId) {
        let mut registry = TypeRegistry::new();
        let mut define = |name: &str, parent: Option<TypeId>| {
            let lower = name.to_lowercase();
            let mut def = TypeDefinition::class(name)
                .field(FieldDefinition::new(format!("{lower}_pub"), "int").public())
                .field(FieldDefinition::new(format!("{lower}_priv"), "int").private())
                .method(MethodDefinition::new(format!("{lower}_run")).public())
                .method(MethodDefinition::new(format!("{lower}_hidden")).private())
                .constructor(ConstructorDefinition::new().public());
            if let Some(parent) = parent {
                def = def.extends(parent);
            }
            registry.define(def).unwrap()
        };
        let a = define("A", None);
        let b = define("B", Some(a));
        let c = define("C", Some(b));
        (registry, a, b, c)
    }

    #[test]
    fn test_all_members_walk_order() {
        let (registry, _, _, c) = chain();
        let intro = AllMembersIntrospector::new(&registry, c).unwrap();

        assert_eq!(
            names(&intro.fields().unwrap()),
            vec!["c_pub", "c_priv", "b_pub", "b_priv", "a_pub", "a_priv"]
        );
        assert_eq!(
            names(&intro.methods().unwrap()),
            vec!["c_run", "c_hidden", "b_run", "b_hidden", "a_run", "a_hidden"]
        );
    }

    #[test]
    fn test_public_walk_order_without_duplicates() {
        let (registry, _, _, c) = chain();
        let intro = PublicIntrospector::new(&registry, c).unwrap();

        assert_eq!(names(&intro.fields().unwrap()), vec!["c_pub", "b_pub", "a_pub"]);
        assert_eq!(names(&intro.methods().unwrap()), vec!["c_run", "b_run", "a_run"]);
    }

    #[test]
    fn test_overridden_method_reported_per_level() {
        let mut registry = TypeRegistry::new();
        let base = registry
            .define(
                TypeDefinition::class("Base")
                    .method(MethodDefinition::new("run").public())
                    .method(MethodDefinition::new("stop").public()),
            )
            .unwrap();
        let derived = registry
            .define(
                TypeDefinition::class("Derived")
                    .extends(base)
                    .method(MethodDefinition::new("run").public()),
            )
            .unwrap();

        let described = |methods: Vec<&MethodInfo>| -> Vec<(String, TypeId)> {
            methods
                .iter()
                .map(|m| (m.name.clone(), m.declaring_type))
                .collect()
        };

        // The public view of Derived already carries the inherited `stop`;
        // Base's level then adds its own `run`, a distinct declaration
        let public = PublicIntrospector::new(&registry, derived).unwrap();
        assert_eq!(
            described(public.methods().unwrap()),
            vec![
                ("run".to_string(), derived),
                ("stop".to_string(), base),
                ("run".to_string(), base),
            ]
        );

        let all = AllMembersIntrospector::new(&registry, derived).unwrap();
        assert_eq!(
            described(all.methods().unwrap()),
            vec![
                ("run".to_string(), derived),
                ("run".to_string(), base),
                ("stop".to_string(), base),
            ]
        );
    }

    #[test]
    fn test_hierarchy_excludes_root() {
        let (registry, a, b, c) = chain();
        let intro = PublicIntrospector::new(&registry, c).unwrap();

        let ids: Vec<_> = intro.hierarchy().unwrap().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![c, b, a]);

        let root = intro.wrap(TypeId::ROOT).unwrap();
        assert!(root.hierarchy().unwrap().is_empty());
        assert!(root.methods().unwrap().is_empty());
        // Constructors are not walked, so the root's own constructor is reported
        assert_eq!(root.constructors().unwrap().len(), 1);
    }

    #[test]
    fn test_wrap_keeps_policy() {
        let (registry, a, _, c) = chain();
        let intro = AllMembersIntrospector::new(&registry, c).unwrap();
        let wrapped = intro.wrap(a).unwrap();

        assert_eq!(wrapped.visibility(), Visibility::AllMembers);
        assert_eq!(wrapped.subject_id(), a);
        assert_eq!(intro.subject_id(), c);
    }

    #[test]
    fn test_unknown_subject_rejected() {
        let (registry, ..) = chain();

        // An id handed out by a larger registry
        let mut other = TypeRegistry::new();
        for name in ["P", "Q", "R", "S"] {
            other.define(TypeDefinition::class(name)).unwrap();
        }
        let foreign = other.lookup("S").unwrap();

        let err = PublicIntrospector::new(&registry, foreign).unwrap_err();
        assert_eq!(err, IntrospectionError::UnknownType { id: foreign });

        let err = AllMembersIntrospector::by_name(&registry, "Missing").unwrap_err();
        assert_eq!(
            err,
            IntrospectionError::UnknownTypeName {
                name: "Missing".to_string()
            }
        );
    }

    #[test]
    fn test_debug_output() {
        let (registry, _, _, c) = chain();
        let intro = PublicIntrospector::new(&registry, c).unwrap();
        assert_eq!(
            format!("{:?}", intro),
            "Introspector { subject: \"C\", visibility: PublicOnly }"
        );
    }
}
