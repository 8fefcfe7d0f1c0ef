use remap_model::{MemberPath, ParamDef, TypeKind, TypeTable, Value};
use smallvec::smallvec;

fn fixture() -> TypeTable {
    let mut table = TypeTable::new();
    let text = table.add_type("Text", TypeKind::Text);
    let int = table.add_type("Int", TypeKind::Int);
    let address = table.add_type("Address", TypeKind::Object);
    table.add_member(address, "city", text);
    let person = table.add_type("Person", TypeKind::Object);
    table.add_member(person, "name", text);
    table.add_member(person, "age", int);
    table.add_member(person, "address", address);
    table
}

#[test]
fn find_type_is_case_insensitive() {
    let table = fixture();
    let person = table.find_type("person").unwrap();
    assert_eq!(table.type_name(person), "Person");
    assert_eq!(table.find_type("PERSON"), Some(person));
    assert_eq!(table.find_type("nosuch"), None);
}

#[test]
fn find_member_is_case_insensitive() {
    let table = fixture();
    let person = table.find_type("Person").unwrap();
    let name = table.find_member(person, "NAME").unwrap();
    assert_eq!(table.member(name).name, "name");
    assert!(table.find_member(person, "city").is_none());
}

#[test]
fn members_keep_declaration_order() {
    let table = fixture();
    let person = table.find_type("Person").unwrap();
    let names: Vec<&str> = table
        .type_def(person)
        .members
        .iter()
        .map(|&m| table.member(m).name.as_str())
        .collect();
    assert_eq!(names, ["name", "age", "address"]);
}

#[test]
fn path_type_follows_the_chain() {
    let table = fixture();
    let person = table.find_type("Person").unwrap();
    let text = table.find_type("Text").unwrap();
    let address_member = table.find_member(person, "address").unwrap();
    let address = table.member(address_member).ty;
    let city = table.find_member(address, "city").unwrap();

    let empty = MemberPath::new();
    assert_eq!(table.path_type(person, &empty), person);

    let path: MemberPath = smallvec![address_member, city];
    assert_eq!(table.path_type(person, &path), text);
    assert_eq!(table.path_names(&path), "address.city");
}

#[test]
fn zero_values_follow_type_kind() {
    let mut table = fixture();
    let bool_ty = table.add_type("Bool", TypeKind::Bool);
    let float = table.add_type("Float", TypeKind::Float);
    let text = table.find_type("Text").unwrap();
    let int = table.find_type("Int").unwrap();
    let address = table.find_type("Address").unwrap();

    assert_eq!(table.zero_value(bool_ty), Value::Bool(false));
    assert_eq!(table.zero_value(int), Value::Int(0));
    assert_eq!(table.zero_value(float), Value::Float(0.0));
    assert_eq!(table.zero_value(text), Value::Text(String::new()));
    assert_eq!(table.zero_value(address), Value::Null);
}

#[test]
fn param_defs_track_optionality() {
    let table = fixture();
    let text = table.find_type("Text").unwrap();
    let required = ParamDef::required("name", text);
    let optional = ParamDef::optional("nickname", text, Value::text(""));
    assert!(!required.is_optional());
    assert!(optional.is_optional());
    assert_eq!(optional.default, Some(Value::Text(String::new())));
}

#[test]
fn values_render_for_diagnostics() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Int(42).to_string(), "42");
    assert_eq!(Value::text("hi").to_string(), "\"hi\"");
    assert!(Value::Null.is_null());
}
