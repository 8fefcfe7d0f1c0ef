//! Type, member and constructor model for the remap mapping engine.
//!
//! Rust has no runtime reflection, so mapping configuration works against an
//! explicit description of the participating object shapes:
//! - Id newtypes (`TypeId`, `MemberId`, `CtorId`) indexing the arenas
//! - Append-only arena of types, members and constructors (`TypeTable`)
//! - Ordered member-access chains into a source object (`MemberPath`)
//! - Runtime constants for declared parameter defaults (`Value`)

pub mod ids;
pub use ids::{CtorId, MemberId, TypeId};

pub mod table;
pub use table::{CtorDef, MemberDef, MemberPath, ParamDef, TypeDef, TypeKind, TypeTable};

pub mod value;
pub use value::Value;
