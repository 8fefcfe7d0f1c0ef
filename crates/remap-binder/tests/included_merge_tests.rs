use remap_binder::{NameMatcher, TypeMapId, TypeMapRegistry};
use remap_model::{CtorId, ParamDef, TypeKind, TypeTable};
use smallvec::smallvec;

/// Source has `name` and a nested `address` whose type has `city`; the
/// destination constructor wants both `name` and `city`. The outer map
/// resolves `name` by convention, the nested `Address -> Dto` map resolves
/// `city`, and the included-member merge flattens the two together.
struct Fixture {
    table: TypeTable,
    registry: TypeMapRegistry,
    outer: TypeMapId,
    nested: TypeMapId,
    ctor: CtorId,
}

fn fixture() -> Fixture {
    let mut table = TypeTable::new();
    let text = table.add_type("Text", TypeKind::Text);
    let address = table.add_type("Address", TypeKind::Object);
    table.add_member(address, "city", text);
    let person = table.add_type("Person", TypeKind::Object);
    table.add_member(person, "name", text);
    table.add_member(person, "address", address);
    let dto = table.add_type("ContactDto", TypeKind::Object);
    let ctor = table.add_ctor(
        dto,
        vec![ParamDef::required("name", text), ParamDef::required("city", text)],
    );

    let mut registry = TypeMapRegistry::new();
    let outer = registry.add_map(person, dto);
    let nested = registry.add_map(address, dto);
    let address_member = table.find_member(person, "address").unwrap();
    registry.add_included(outer, smallvec![address_member], nested);

    Fixture { table, registry, outer, nested, ctor }
}

#[test]
fn merge_fills_unresolved_positions_from_the_included_map() {
    let Fixture { table, mut registry, outer, nested, ctor } = fixture();
    registry.build_ctor_bindings(&table, outer, ctor, &NameMatcher).unwrap();
    registry.build_ctor_bindings(&table, nested, ctor, &NameMatcher).unwrap();
    assert!(!registry.can_resolve(outer));

    let inclusion = registry.map(outer).included_members()[0];
    assert_eq!(registry.included(inclusion).map, nested);

    assert!(registry.apply_included_members(outer));
    assert!(registry.can_resolve(outer));

    let bindings = registry.map(outer).ctor_bindings().unwrap();
    let city = bindings.param_by_name(&table, "city").unwrap();
    assert!(city.can_resolve());
    assert_eq!(table.path_names(city.source()), "city");
    let chain = city.included().unwrap();
    assert_eq!(chain.map, nested);
    assert_eq!(table.path_names(&chain.path), "address");
}

#[test]
fn already_resolved_positions_are_left_untouched() {
    let Fixture { table, mut registry, outer, nested, ctor } = fixture();
    registry.build_ctor_bindings(&table, outer, ctor, &NameMatcher).unwrap();
    registry.build_ctor_bindings(&table, nested, ctor, &NameMatcher).unwrap();

    let name_before = registry.map(outer).ctor_bindings().unwrap().params()[0].clone();
    registry.apply_included_members(outer);
    let name_after = &registry.map(outer).ctor_bindings().unwrap().params()[0];
    assert_eq!(name_after, &name_before);
    assert!(name_after.included().is_none());
}

#[test]
fn merge_is_idempotent() {
    let Fixture { table, mut registry, outer, nested, ctor } = fixture();
    registry.build_ctor_bindings(&table, outer, ctor, &NameMatcher).unwrap();
    registry.build_ctor_bindings(&table, nested, ctor, &NameMatcher).unwrap();

    assert!(registry.apply_included_members(outer));
    let snapshot = registry.map(outer).ctor_bindings().unwrap().clone();
    assert!(!registry.apply_included_members(outer));
    assert_eq!(registry.map(outer).ctor_bindings().unwrap(), &snapshot);
}

#[test]
fn merge_requires_the_same_constructor() {
    let Fixture { mut table, mut registry, outer, nested, ctor } = fixture();
    let dto = table.find_type("ContactDto").unwrap();
    let text = table.find_type("Text").unwrap();
    // Same shape, different constructor: the positional merge must refuse.
    let other = table.add_ctor(
        dto,
        vec![ParamDef::required("name", text), ParamDef::required("city", text)],
    );
    registry.build_ctor_bindings(&table, outer, ctor, &NameMatcher).unwrap();
    registry.build_ctor_bindings(&table, nested, other, &NameMatcher).unwrap();

    let before = registry.map(outer).ctor_bindings().unwrap().clone();
    assert!(!registry.apply_included_members(outer));
    assert_eq!(registry.map(outer).ctor_bindings().unwrap(), &before);
    assert!(!registry.can_resolve(outer));
}

#[test]
fn merge_tolerates_an_unbuilt_included_map() {
    let Fixture { table, mut registry, outer, nested: _, ctor } = fixture();
    registry.build_ctor_bindings(&table, outer, ctor, &NameMatcher).unwrap();

    // The nested map has no binding set yet; re-running later converges.
    assert!(!registry.apply_included_members(outer));
    assert!(!registry.can_resolve(outer));
}

#[test]
fn multi_level_inclusion_composes_provenance() {
    let mut table = TypeTable::new();
    let text = table.add_type("Text", TypeKind::Text);
    let geo = table.add_type("Geo", TypeKind::Object);
    table.add_member(geo, "city", text);
    let address = table.add_type("Address", TypeKind::Object);
    let geo_member = table.add_member(address, "geo", geo);
    let person = table.add_type("Person", TypeKind::Object);
    let address_member = table.add_member(person, "address", address);
    let dto = table.add_type("CityDto", TypeKind::Object);
    let ctor = table.add_ctor(dto, vec![ParamDef::required("city", text)]);

    let mut registry = TypeMapRegistry::new();
    let outer = registry.add_map(person, dto);
    let mid = registry.add_map(address, dto);
    let inner = registry.add_map(geo, dto);
    registry.add_included(outer, smallvec![address_member], mid);
    registry.add_included(mid, smallvec![geo_member], inner);

    registry.build_ctor_bindings(&table, outer, ctor, &NameMatcher).unwrap();
    registry.build_ctor_bindings(&table, mid, ctor, &NameMatcher).unwrap();
    registry.build_ctor_bindings(&table, inner, ctor, &NameMatcher).unwrap();

    // Resolve the middle map first, then flatten it into the outer one.
    assert!(registry.apply_included_members(mid));
    assert!(registry.apply_included_members(outer));
    assert!(registry.can_resolve(outer));

    let bindings = registry.map(outer).ctor_bindings().unwrap();
    let chain = bindings.params()[0].included().unwrap();
    assert_eq!(chain.map, mid);
    assert_eq!(table.path_names(&chain.path), "address.geo");
}
