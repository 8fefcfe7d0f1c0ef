//! Append-only arena describing the object shapes mapping works against.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::ids::{CtorId, MemberId, TypeId};
use crate::value::Value;

/// An ordered member-access chain into a source object.
///
/// Empty means "not bound". Most chains are one segment; flattening
/// conventions produce two or three.
pub type MemberPath = SmallVec<[MemberId; 2]>;

/// Coarse classification of a type, used only to produce zero values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    Bool,
    Int,
    Float,
    Text,
    Object,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    pub kind: TypeKind,
    pub members: Vec<MemberId>,
    pub ctors: Vec<CtorId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemberDef {
    pub owner: TypeId,
    pub name: String,
    pub ty: TypeId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CtorDef {
    pub owner: TypeId,
    pub params: Vec<ParamDef>,
}

/// One declared constructor parameter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParamDef {
    pub name: String,
    pub ty: TypeId,
    /// Language-level default, present iff the parameter is optional.
    pub default: Option<Value>,
}

impl ParamDef {
    pub fn required(name: impl Into<String>, ty: TypeId) -> Self {
        ParamDef { name: name.into(), ty, default: None }
    }

    pub fn optional(name: impl Into<String>, ty: TypeId, default: Value) -> Self {
        ParamDef { name: name.into(), ty, default: Some(default) }
    }

    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

/// Arena of type, member and constructor descriptions.
///
/// All name correlation in the engine is case-insensitive ASCII; the table's
/// lookup helpers apply the same rule.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TypeTable {
    types: Vec<TypeDef>,
    members: Vec<MemberDef>,
    ctors: Vec<CtorDef>,
    by_name: FxHashMap<String, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&mut self, name: impl Into<String>, kind: TypeKind) -> TypeId {
        let name = name.into();
        let id = TypeId(self.types.len() as u32);
        self.by_name.insert(name.to_ascii_lowercase(), id);
        self.types.push(TypeDef { name, kind, members: Vec::new(), ctors: Vec::new() });
        id
    }

    pub fn add_member(&mut self, owner: TypeId, name: impl Into<String>, ty: TypeId) -> MemberId {
        let id = MemberId(self.members.len() as u32);
        self.members.push(MemberDef { owner, name: name.into(), ty });
        self.types[owner.index()].members.push(id);
        id
    }

    pub fn add_ctor(&mut self, owner: TypeId, params: Vec<ParamDef>) -> CtorId {
        let id = CtorId(self.ctors.len() as u32);
        self.ctors.push(CtorDef { owner, params });
        self.types[owner.index()].ctors.push(id);
        id
    }

    pub fn type_def(&self, id: TypeId) -> &TypeDef {
        &self.types[id.index()]
    }

    pub fn member(&self, id: MemberId) -> &MemberDef {
        &self.members[id.index()]
    }

    pub fn ctor(&self, id: CtorId) -> &CtorDef {
        &self.ctors[id.index()]
    }

    pub fn type_name(&self, id: TypeId) -> &str {
        &self.types[id.index()].name
    }

    pub fn find_type(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(&name.to_ascii_lowercase()).copied()
    }

    /// Case-insensitive member lookup on one type.
    pub fn find_member(&self, owner: TypeId, name: &str) -> Option<MemberId> {
        self.types[owner.index()]
            .members
            .iter()
            .copied()
            .find(|&m| self.members[m.index()].name.eq_ignore_ascii_case(name))
    }

    /// The declared type a member path ends in, or the starting type for an
    /// empty path.
    pub fn path_type(&self, start: TypeId, path: &MemberPath) -> TypeId {
        path.last().map_or(start, |&m| self.member(m).ty)
    }

    /// Dotted member-name rendering of a path, for diagnostics.
    pub fn path_names(&self, path: &MemberPath) -> String {
        let mut out = String::new();
        for (i, &m) in path.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&self.member(m).name);
        }
        out
    }

    /// The zero/empty value of a type, used when an unresolved parameter has
    /// no declared default.
    pub fn zero_value(&self, ty: TypeId) -> Value {
        match self.types[ty.index()].kind {
            TypeKind::Bool => Value::Bool(false),
            TypeKind::Int => Value::Int(0),
            TypeKind::Float => Value::Float(0.0),
            TypeKind::Text => Value::Text(String::new()),
            TypeKind::Object => Value::Null,
        }
    }
}
