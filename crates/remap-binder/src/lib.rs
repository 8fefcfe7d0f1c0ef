//! Constructor binding resolution for the remap mapping engine.
//!
//! Given a destination type's constructor and a source type description,
//! this crate decides whether every constructor parameter can be supplied
//! and records the per-parameter plan needed to invoke it:
//! - The resolution plan for one parameter (`ParamBinding`): source member
//!   chain, configured resolver, included-member projection, or unresolved
//! - The ordered binding set for one constructor (`CtorBindings`), with the
//!   included-member and inheritance merge algorithms
//! - Per type-pair configuration and the drivers that run resolution against
//!   it (`TypeMap`, `TypeMapRegistry`)
//! - The naming-convention seam (`ConventionMatcher`), with a default
//!   flattening matcher (`NameMatcher`)
//!
//! Resolution runs once per configured type pair, before any mapping
//! executes. Unresolved parameters are ordinary state, not errors; `BindError`
//! covers configuration mistakes only.

pub mod convention;
pub use convention::{ConventionMatcher, NameMatcher};

pub mod ctor_bindings;
pub use ctor_bindings::CtorBindings;

pub mod diagnostics;
pub use diagnostics::BindError;

pub mod param_binding;
pub use param_binding::{IncludedChain, ParamBinding};

pub mod type_map;
pub use type_map::{IncludedMember, IncludedMemberId, ResolverId, TypeMap, TypeMapId, TypeMapRegistry};
