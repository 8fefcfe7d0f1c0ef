//! Per type-pair configuration and the registry drivers that run
//! constructor-binding resolution against it.

use remap_model::{CtorId, MemberPath, TypeId, TypeTable};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convention::ConventionMatcher;
use crate::ctor_bindings::CtorBindings;
use crate::diagnostics::BindError;
use crate::param_binding::IncludedChain;

/// Index of a type map in a [`TypeMapRegistry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeMapId(pub u32);

/// Index of an included member in a [`TypeMapRegistry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncludedMemberId(pub u32);

/// Opaque handle to a custom value resolver configured on a type map. The
/// binder records which resolver supplies a parameter; executing it belongs
/// to the mapping-execution layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolverId(pub u32);

impl TypeMapId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl IncludedMemberId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A configured nested-source projection: "this destination value is itself
/// populated from a nested source member's own mapping".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncludedMember {
    /// The nested source member's own type map.
    pub map: TypeMapId,
    /// Member chain from the including source object to the nested source.
    pub path: MemberPath,
}

impl IncludedMember {
    /// Composes this inclusion with a binding's existing provenance, keeping
    /// the full nested prefix (outermost first) for multi-level inclusion.
    pub fn chain(&self, inner: Option<&IncludedChain>) -> IncludedChain {
        let mut path = self.path.clone();
        if let Some(inner) = inner {
            path.extend(inner.path.iter().copied());
        }
        IncludedChain { map: self.map, path }
    }
}

/// Configuration for one (source, destination) type pair.
#[derive(Clone, Debug)]
pub struct TypeMap {
    pub source: TypeId,
    pub dest: TypeId,
    ctor_bindings: Option<CtorBindings>,
    base: Option<TypeMapId>,
    included: Vec<IncludedMemberId>,
    /// Custom resolvers keyed by lowercased parameter name.
    resolvers: FxHashMap<String, ResolverId>,
}

impl TypeMap {
    fn new(source: TypeId, dest: TypeId) -> Self {
        TypeMap {
            source,
            dest,
            ctor_bindings: None,
            base: None,
            included: Vec::new(),
            resolvers: FxHashMap::default(),
        }
    }

    pub fn ctor_bindings(&self) -> Option<&CtorBindings> {
        self.ctor_bindings.as_ref()
    }

    pub fn base(&self) -> Option<TypeMapId> {
        self.base
    }

    pub fn included_members(&self) -> &[IncludedMemberId] {
        &self.included
    }

    /// Custom resolver configured for a parameter name, case-insensitive.
    pub fn resolver_for(&self, name: &str) -> Option<ResolverId> {
        self.resolvers.get(&name.to_ascii_lowercase()).copied()
    }
}

/// Arena of type maps keyed by (source, destination) pair.
///
/// The registry owns the drivers for the resolution control flow: build the
/// binding set for a chosen constructor, pull in bindings from included
/// members or a base map, and validate the outcome. Merges read a related
/// map's finalized set and mutate only the map performing the merge; they
/// are idempotent and monotonic, so re-running them against a mapping that
/// has progressed since is always safe.
#[derive(Debug, Default)]
pub struct TypeMapRegistry {
    maps: Vec<TypeMap>,
    included: Vec<IncludedMember>,
    by_pair: FxHashMap<(TypeId, TypeId), TypeMapId>,
}

impl TypeMapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_map(&mut self, source: TypeId, dest: TypeId) -> TypeMapId {
        let id = TypeMapId(self.maps.len() as u32);
        self.maps.push(TypeMap::new(source, dest));
        self.by_pair.insert((source, dest), id);
        id
    }

    pub fn find(&self, source: TypeId, dest: TypeId) -> Option<TypeMapId> {
        self.by_pair.get(&(source, dest)).copied()
    }

    pub fn map(&self, id: TypeMapId) -> &TypeMap {
        &self.maps[id.index()]
    }

    pub fn included(&self, id: IncludedMemberId) -> &IncludedMember {
        &self.included[id.index()]
    }

    pub fn set_base(&mut self, map: TypeMapId, base: TypeMapId) {
        self.maps[map.index()].base = Some(base);
    }

    pub fn set_resolver(&mut self, map: TypeMapId, param: &str, resolver: ResolverId) {
        self.maps[map.index()]
            .resolvers
            .insert(param.to_ascii_lowercase(), resolver);
    }

    /// Registers a nested-source projection on `map`: destination values can
    /// be populated from `nested`'s mapping, reached through `path` on the
    /// including source object.
    pub fn add_included(
        &mut self,
        map: TypeMapId,
        path: MemberPath,
        nested: TypeMapId,
    ) -> IncludedMemberId {
        let id = IncludedMemberId(self.included.len() as u32);
        self.included.push(IncludedMember { map: nested, path });
        self.maps[map.index()].included.push(id);
        id
    }

    /// Resets `map`'s binding set onto `ctor` and populates one binding per
    /// declared parameter, with candidate source chains supplied by the
    /// convention matcher.
    pub fn build_ctor_bindings(
        &mut self,
        table: &TypeTable,
        map: TypeMapId,
        ctor: CtorId,
        matcher: &dyn ConventionMatcher,
    ) -> Result<(), BindError> {
        debug_assert_eq!(table.ctor(ctor).owner, self.maps[map.index()].dest);
        debug!(
            dest = table.type_name(self.maps[map.index()].dest),
            params = table.ctor(ctor).params.len(),
            "build constructor bindings"
        );
        let mut bindings = self.maps[map.index()].ctor_bindings.take().unwrap_or_default();
        bindings.reset(ctor);
        let mut result = Ok(());
        for param in &table.ctor(ctor).params {
            let owner = &self.maps[map.index()];
            let chains = matcher.match_parameter(table, owner.source, &param.name);
            if let Err(err) = bindings.add_parameter(table, map, owner, &chains) {
                result = Err(err);
                break;
            }
        }
        self.maps[map.index()].ctor_bindings = Some(bindings);
        result
    }

    /// Whether `map`'s current binding set is fully resolvable. False when
    /// no constructor has been bound yet.
    pub fn can_resolve(&mut self, map: TypeMapId) -> bool {
        self.maps[map.index()]
            .ctor_bindings
            .as_mut()
            .is_some_and(CtorBindings::can_resolve)
    }

    /// Runs the included-member merge for one configured inclusion. No-op
    /// when either side has no binding set yet.
    pub fn apply_included_member(&mut self, map: TypeMapId, included: IncludedMemberId) -> bool {
        let inclusion = self.included[included.index()].clone();
        let Some(mut bindings) = self.maps[map.index()].ctor_bindings.take() else {
            return false;
        };
        let changed = match self.maps[inclusion.map.index()].ctor_bindings.as_ref() {
            Some(nested) => bindings.apply_included_member(&inclusion, nested),
            None => false,
        };
        self.maps[map.index()].ctor_bindings = Some(bindings);
        changed
    }

    /// Runs the included-member merge for every inclusion configured on
    /// `map`, in configuration order. Returns whether any of them changed a
    /// binding.
    pub fn apply_included_members(&mut self, map: TypeMapId) -> bool {
        let mut changed = false;
        for included in self.maps[map.index()].included.clone() {
            changed |= self.apply_included_member(map, included);
        }
        changed
    }

    /// Runs the inheritance merge, pulling name-matched bindings from
    /// `base`'s set into `derived`'s. No-op when either side has no binding
    /// set yet.
    pub fn apply_inherited_map(
        &mut self,
        table: &TypeTable,
        derived: TypeMapId,
        base: TypeMapId,
    ) -> bool {
        let Some(mut bindings) = self.maps[derived.index()].ctor_bindings.take() else {
            return false;
        };
        let changed = match self.maps[base.index()].ctor_bindings.as_ref() {
            Some(base_set) => bindings.apply_inherited_map(table, base_set, derived),
            None => false,
        };
        self.maps[derived.index()].ctor_bindings = Some(bindings);
        changed
    }

    /// Inheritance merge following `map`'s configured base link.
    pub fn apply_base_map(&mut self, table: &TypeTable, map: TypeMapId) -> bool {
        match self.maps[map.index()].base {
            Some(base) => self.apply_inherited_map(table, map, base),
            None => false,
        }
    }

    /// Accepts `map`'s constructor if every parameter is resolvable, or
    /// unresolved only where the parameter carries a declared default.
    /// Otherwise reports the unresolved required parameters.
    pub fn validate_ctor(&mut self, table: &TypeTable, map: TypeMapId) -> Result<(), BindError> {
        let dest = self.maps[map.index()].dest;
        let Some(bindings) = self.maps[map.index()].ctor_bindings.as_mut() else {
            return Err(BindError::NoConstructorSelected);
        };
        if bindings.can_resolve() {
            return Ok(());
        }
        let unresolved: Vec<String> = bindings
            .params()
            .iter()
            .filter(|p| !p.can_resolve() && !p.is_optional(table))
            .map(|p| p.name(table).to_string())
            .collect();
        if unresolved.is_empty() {
            Ok(())
        } else {
            Err(BindError::UnresolvedConstructor {
                dest_type: table.type_name(dest).to_string(),
                params: unresolved,
            })
        }
    }
}
