//! The ordered binding set for one constructor and its merge algorithms.

use remap_model::{CtorId, MemberPath, TypeTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::diagnostics::BindError;
use crate::param_binding::ParamBinding;
use crate::type_map::{IncludedMember, TypeMap, TypeMapId};

/// Resolution state for one candidate constructor of a destination type.
///
/// The binding sequence is index-aligned 1:1 with the constructor's
/// parameter list. Overall resolvability is memoized (`None` = unknown) and
/// invalidated by every mutating operation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CtorBindings {
    ctor: Option<CtorId>,
    params: Vec<ParamBinding>,
    can_resolve: Option<bool>,
}

/// Equality is over the logical state only; `can_resolve` is a lazily
/// populated memo of that state, so whether it has been computed yet must
/// not distinguish two otherwise identical sets.
impl PartialEq for CtorBindings {
    fn eq(&self, other: &Self) -> bool {
        self.ctor == other.ctor && self.params == other.params
    }
}

impl CtorBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebinds the set to a new candidate constructor, discarding all
    /// parameter bindings and the memoized resolvability.
    pub fn reset(&mut self, ctor: CtorId) {
        debug!(?ctor, "reset constructor bindings");
        self.ctor = Some(ctor);
        self.params.clear();
        self.can_resolve = None;
    }

    pub fn ctor(&self) -> Option<CtorId> {
        self.ctor
    }

    pub fn params(&self) -> &[ParamBinding] {
        &self.params
    }

    /// Appends the binding for the next declared parameter, in declaration
    /// order. Candidate chains come from the convention matcher; with none,
    /// the binding starts unresolved pending a later merge or a configured
    /// resolver.
    ///
    /// A parameter whose name collides with an earlier one under
    /// case-insensitive comparison is a configuration error: name-correlated
    /// merges would silently pick one of the two.
    pub fn add_parameter(
        &mut self,
        table: &TypeTable,
        owner_id: TypeMapId,
        owner: &TypeMap,
        chains: &[MemberPath],
    ) -> Result<(), BindError> {
        let Some(ctor) = self.ctor else {
            return Err(BindError::NoConstructorSelected);
        };
        let index = self.params.len();
        debug_assert!(index < table.ctor(ctor).params.len());
        let name = &table.ctor(ctor).params[index].name;
        if self.param_by_name(table, name).is_some() {
            return Err(BindError::DuplicateParameterName { name: name.clone() });
        }
        trace!(index, name = name.as_str(), candidates = chains.len(), "add constructor parameter");
        self.can_resolve = None;
        self.params
            .push(ParamBinding::by_convention(table, owner_id, owner, ctor, index as u32, chains));
        Ok(())
    }

    /// Whether every parameter binding is resolvable. Lazily computed in
    /// index order and cached until the next invalidating change. A set with
    /// zero parameters is vacuously resolvable.
    pub fn can_resolve(&mut self) -> bool {
        if let Some(known) = self.can_resolve {
            return known;
        }
        let resolvable = self.params.iter().all(ParamBinding::can_resolve);
        self.can_resolve = Some(resolvable);
        resolvable
    }

    /// The binding whose declared parameter name matches, case-insensitive.
    ///
    /// Inheritance merges correlate by name, not position: a derived
    /// constructor need not declare parameters in the base's order.
    pub fn param_by_name<'a>(&'a self, table: &TypeTable, name: &str) -> Option<&'a ParamBinding> {
        self.params.iter().find(|p| p.name(table).eq_ignore_ascii_case(name))
    }

    /// Merges resolvable bindings from an included member's own set into
    /// this one, positionally.
    ///
    /// No-op unless the included set is bound to the *same* constructor (the
    /// merge proceeds by position) and this set still has unresolved
    /// positions. Only positions that are unresolvable here and resolvable
    /// in the included set change; each replacement chains the included
    /// binding through `included` and invalidates the cache. Returns whether
    /// anything changed.
    pub fn apply_included_member(
        &mut self,
        included: &IncludedMember,
        included_set: &CtorBindings,
    ) -> bool {
        if self.can_resolve() || self.ctor.is_none() || included_set.ctor != self.ctor {
            return false;
        }
        let mut changed = false;
        for index in 0..self.params.len() {
            let Some(inner) = included_set.params.get(index) else {
                break;
            };
            if !inner.can_resolve() || self.params[index].can_resolve() {
                continue;
            }
            trace!(index, "chain parameter binding through included member");
            self.can_resolve = None;
            self.params[index] = ParamBinding::through_included(inner, included);
            changed = true;
        }
        changed
    }

    /// Merges resolvable bindings from a base mapping's set into this one,
    /// correlated by parameter name.
    ///
    /// An unresolved position stays unresolved when the base set has no
    /// parameter of that name, its binding is itself unresolvable, or the
    /// declared types differ (exact match, no widening). Those positions are
    /// left for the owning configuration's validation, not treated as
    /// failures here.
    /// Resolvability is recomputed directly from the scan's outcome, so a
    /// fully successful merge marks the set resolvable without another pass.
    /// Returns whether anything changed.
    pub fn apply_inherited_map(
        &mut self,
        table: &TypeTable,
        base_set: &CtorBindings,
        this_map: TypeMapId,
    ) -> bool {
        if self.can_resolve() {
            return false;
        }
        let mut changed = false;
        let mut resolved = true;
        for index in 0..self.params.len() {
            if self.params[index].can_resolve() {
                continue;
            }
            let name = self.params[index].name(table);
            let ty = self.params[index].param_type(table);
            match base_set.param_by_name(table, name) {
                Some(base) if base.can_resolve() && base.param_type(table) == ty => {
                    trace!(index, name, "reuse inherited parameter binding");
                    let binding = ParamBinding::inherited(this_map, &self.params[index], base);
                    self.params[index] = binding;
                    changed = true;
                }
                _ => resolved = false,
            }
        }
        self.can_resolve = Some(resolved);
        changed
    }

    /// Names of parameters still unresolved, in declaration order.
    pub fn unresolved_names<'t>(&self, table: &'t TypeTable) -> Vec<&'t str> {
        self.params
            .iter()
            .filter(|p| !p.can_resolve())
            .map(|p| p.name(table))
            .collect()
    }
}
