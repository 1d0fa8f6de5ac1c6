//! Stresstest Random Object Generation: type introspection
//!
//! Decides which constructors, fields and methods of a type a generator may
//! use, at a chosen access level, and whether one type can stand in for
//! another.
//!
//! ## Usage
//!
//! ```ignore
//! use stresstest_random::{all_members_introspector, public_introspector};
//!
//! let public = public_introspector(&registry, derived)?;
//! for field in public.fields()? {
//!     // own public fields first, then inherited ones
//! }
//!
//! let all = all_members_introspector(&registry, derived)?;
//! let ctors = all.constructors()?; // private constructors included
//! let base_view = all.wrap(base)?; // still sees every member
//! ```

pub mod error;
pub mod factory;
pub mod introspector;
pub mod policy;

pub use error::IntrospectionError;
pub use factory::{
    all_members_introspector, all_members_introspector_by_name, construct, construct_by_name,
    public_introspector, public_introspector_by_name, AnyIntrospector,
};
pub use introspector::{AllMembersIntrospector, Introspector, PublicIntrospector};
pub use policy::{AllMembers, ExtractionPolicy, PublicOnly, Visibility};
