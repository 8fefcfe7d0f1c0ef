//! The resolution plan for a single constructor parameter.

use remap_model::{CtorId, MemberPath, ParamDef, TypeId, TypeTable, Value};
use serde::{Deserialize, Serialize};

use crate::type_map::{IncludedMember, ResolverId, TypeMap, TypeMapId};

/// Provenance of a binding that was flattened out of an included member's
/// mapping: the nested source prefix to traverse before the binding's own
/// source chain applies, and the type map that owns the nested mapping.
///
/// Multi-level inclusion composes prefixes (outermost first); composition
/// never overwrites an inner chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncludedChain {
    pub map: TypeMapId,
    pub path: MemberPath,
}

/// One constructor parameter's binding.
///
/// Bindings are immutable values: merges replace a whole binding by
/// position, they never edit one in place. The declared parameter (name,
/// type, default) is read through the table via `(ctor, index)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamBinding {
    owner: TypeMapId,
    ctor: CtorId,
    index: u32,
    /// Source member chain; empty means "not bound by convention".
    source: MemberPath,
    resolver: Option<ResolverId>,
    included: Option<IncludedChain>,
}

impl ParamBinding {
    /// Binding for a local convention match.
    ///
    /// A resolver configured on the owning map for this parameter name takes
    /// precedence over candidate chains; otherwise the first candidate wins.
    /// With neither, the binding starts unresolved pending a later merge.
    pub(crate) fn by_convention(
        table: &TypeTable,
        owner_id: TypeMapId,
        owner: &TypeMap,
        ctor: CtorId,
        index: u32,
        chains: &[MemberPath],
    ) -> Self {
        let name = &table.ctor(ctor).params[index as usize].name;
        let resolver = owner.resolver_for(name);
        let source = if resolver.is_some() {
            MemberPath::new()
        } else {
            chains.first().cloned().unwrap_or_default()
        };
        ParamBinding { owner: owner_id, ctor, index, source, resolver, included: None }
    }

    /// Binding chained through an included member.
    ///
    /// `inner` must be resolvable (the merge checks before calling); the
    /// result composes the inclusion with any provenance `inner` already
    /// carried, so multi-level inclusion keeps the full nested prefix.
    pub(crate) fn through_included(inner: &ParamBinding, included: &IncludedMember) -> Self {
        ParamBinding {
            owner: included.map,
            ctor: inner.ctor,
            index: inner.index,
            source: inner.source.clone(),
            resolver: inner.resolver,
            included: Some(included.chain(inner.included.as_ref())),
        }
    }

    /// Binding rebased from a base mapping onto the derived mapping.
    ///
    /// `target` is the derived position being filled (its declared name and
    /// type already matched `base`'s); the resolved chain, resolver and
    /// provenance carry over from `base` as-is.
    pub(crate) fn inherited(owner: TypeMapId, target: &ParamBinding, base: &ParamBinding) -> Self {
        ParamBinding {
            owner,
            ctor: target.ctor,
            index: target.index,
            source: base.source.clone(),
            resolver: base.resolver,
            included: base.included.clone(),
        }
    }

    fn param<'t>(&self, table: &'t TypeTable) -> &'t ParamDef {
        &table.ctor(self.ctor).params[self.index as usize]
    }

    pub fn owner(&self) -> TypeMapId {
        self.owner
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn name<'t>(&self, table: &'t TypeTable) -> &'t str {
        &self.param(table).name
    }

    pub fn param_type(&self, table: &TypeTable) -> TypeId {
        self.param(table).ty
    }

    pub fn is_optional(&self, table: &TypeTable) -> bool {
        self.param(table).is_optional()
    }

    pub fn source(&self) -> &MemberPath {
        &self.source
    }

    pub fn resolver(&self) -> Option<ResolverId> {
        self.resolver
    }

    pub fn included(&self) -> Option<&IncludedChain> {
        self.included.as_ref()
    }

    /// A binding can supply its parameter iff it carries a non-empty source
    /// chain or a configured resolver.
    pub fn can_resolve(&self) -> bool {
        !self.source.is_empty() || self.resolver.is_some()
    }

    /// Fallback value for a parameter left unresolved at build time: the
    /// declared default if the parameter is optional, else the declared
    /// type's zero value.
    pub fn default_value(&self, table: &TypeTable) -> Value {
        let param = self.param(table);
        match &param.default {
            Some(value) => value.clone(),
            None => table.zero_value(param.ty),
        }
    }

    /// Diagnostic rendering, e.g. ``OrderDto constructor, parameter `total` ``.
    pub fn describe(&self, table: &TypeTable) -> String {
        format!(
            "{} constructor, parameter `{}`",
            table.type_name(table.ctor(self.ctor).owner),
            self.name(table),
        )
    }
}
