mod support;

use jprops_common::{Access, Modifiers};
use jprops_infer::{
    FieldPlan, InferenceError, PropertyInference, ResolvedProperty, SkipReason, infer_all, reconcile,
};
use jprops_symbols::{ClassId, Mutability, SymbolError, SymbolModel, TypeId};
use support::*;

// =============================================================================
// Pairing
// =============================================================================

#[test]
fn test_getter_setter_pair_synthesizes_var_field() {
    let mut f = Fixture::new();
    let point = f.class("Point", "geo");
    let get = f.getter(point, "getX", TypeId::INT, PUBLIC);
    let set = f.setter(point, "setX", TypeId::INT, PUBLIC);

    let outcome = f.infer(point);

    assert_eq!(outcome.created.len(), 1);
    assert!(outcome.retained.is_empty());
    assert!(outcome.skipped.is_empty());
    let field = f.own_field(point, "x").expect("x synthesized");
    assert_eq!(field.type_id, TypeId::INT);
    assert_eq!(field.access(), Access::Public);
    assert!(!field.is_static());
    assert_eq!(field.mutability(), Some(Mutability::Var));
    assert_eq!(field.auto_marker(), Some(None));
    assert!(f.table.is_erasable(outcome.created[0]).expect("erasable"));
    assert!(f.table.method(get).expect("getter").property_accessor);
    assert!(f.table.method(set).expect("setter").property_accessor);
}

#[test]
fn test_property_names_follow_accessor_conventions() {
    let mut f = Fixture::new();
    let bean = f.class("Bean", "beans");
    f.getter(bean, "getFoo", TypeId::INT, PUBLIC);
    f.getter(bean, "isReady", TypeId::BOOLEAN, PUBLIC);
    f.getter(bean, "get_Label", TypeId::INT, PUBLIC);
    f.getter(bean, "getU", TypeId::INT, PUBLIC);
    f.getter(bean, "get", TypeId::INT, PUBLIC);
    f.getter(bean, "get_", TypeId::INT, PUBLIC);
    f.getter(bean, "getaway", TypeId::INT, PUBLIC);

    f.infer(bean);

    let names: Vec<_> = f.snapshot(bean).into_iter().map(|v| v.name).collect();
    assert_eq!(names, ["foo", "ready", "Label", "u"]);
}

#[test]
fn test_covariant_getter_contravariant_setter_pairs() {
    let mut f = Fixture::new();
    let holder = f.class("Holder", "h");
    let integer = f.ty(f.integer);
    let number = f.ty(f.number);
    f.getter(holder, "getValue", integer, PUBLIC);
    f.setter(holder, "setValue", number, PUBLIC);

    f.infer(holder);

    let field = f.own_field(holder, "value").expect("value synthesized");
    assert_eq!(field.type_id, integer);
    assert_eq!(field.mutability(), Some(Mutability::Var));
}

#[test]
fn test_getter_wider_than_setter_is_not_a_pair() {
    let mut f = Fixture::new();
    let holder = f.class("Holder", "h");
    let integer = f.ty(f.integer);
    let number = f.ty(f.number);
    let get = f.getter(holder, "getValue", number, PUBLIC);
    f.setter(holder, "setValue", integer, PUBLIC);

    let outcome = f.infer(holder);

    assert!(f.own_field(holder, "value").is_none());
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].name, "value");
    assert_eq!(outcome.skipped[0].reason, SkipReason::NoCompatiblePair);
    assert!(!f.table.method(get).expect("getter").property_accessor);
}

#[test]
fn test_first_compatible_overload_pair_wins() {
    let mut f = Fixture::new();
    let holder = f.class("Holder", "h");
    let integer = f.ty(f.integer);
    let number = f.ty(f.number);
    let object = f.ty(f.object);
    let string = f.ty(f.string);
    f.getter(holder, "getValue", number, PUBLIC);
    f.setter(holder, "setValue", integer, PUBLIC);
    f.setter(holder, "setValue", string, PUBLIC);
    f.setter(holder, "setValue", object, PUBLIC);

    f.infer(holder);

    let field = f.own_field(holder, "value").expect("value synthesized");
    assert_eq!(field.type_id, number);
    assert_eq!(f.own_field_count(holder), 1);
}

#[test]
fn test_boxed_getter_pairs_with_primitive_setter() {
    let mut f = Fixture::new();
    let counter = f.class("Counter", "c");
    let integer = f.ty(f.integer);
    f.getter(counter, "getCount", integer, PUBLIC);
    f.setter(counter, "setCount", TypeId::INT, PUBLIC);

    f.infer(counter);

    // the boxed getter type is assignable to the primitive, so it is the narrower one
    let field = f.own_field(counter, "count").expect("count synthesized");
    assert_eq!(field.type_id, integer);
}

// =============================================================================
// Access and static-ness
// =============================================================================

#[test]
fn test_field_takes_weakest_accessor_access() {
    let mut f = Fixture::new();
    let point = f.class("Point", "geo");
    f.getter(point, "getX", TypeId::INT, PUBLIC);
    f.setter(point, "setX", TypeId::INT, PRIVATE);
    f.getter(point, "getY", TypeId::INT, PACKAGE);
    f.setter(point, "setY", TypeId::INT, PROTECTED);
    f.getter(point, "getZ", TypeId::INT, PRIVATE);
    f.setter(point, "setZ", TypeId::INT, PRIVATE);

    f.infer(point);

    assert_eq!(f.own_field(point, "x").expect("x").access(), Access::Public);
    assert_eq!(f.own_field(point, "y").expect("y").access(), Access::Protected);
    assert_eq!(f.own_field(point, "z").expect("z").access(), Access::Private);
}

#[test]
fn test_static_mismatch_rejects_pair() {
    let mut f = Fixture::new();
    let config = f.class("Config", "cfg");
    f.getter(config, "getMode", TypeId::INT, PUBLIC | Modifiers::STATIC);
    f.setter(config, "setMode", TypeId::INT, PUBLIC);

    let outcome = f.infer(config);

    assert!(f.own_field(config, "mode").is_none());
    assert_eq!(outcome.skipped[0].reason, SkipReason::NoCompatiblePair);
}

#[test]
fn test_isolated_static_accessors_become_static_fields() {
    let mut f = Fixture::new();
    let config = f.class("Config", "cfg");
    f.getter(config, "getLevel", TypeId::INT, PUBLIC | Modifiers::STATIC);
    f.setter(config, "setLevel", TypeId::INT, PUBLIC | Modifiers::STATIC);
    f.getter(config, "getName", TypeId::INT, PROTECTED | Modifiers::STATIC);

    f.infer(config);

    let level = f.own_field(config, "level").expect("level");
    assert!(level.is_static());
    assert_eq!(level.mutability(), Some(Mutability::Var));
    let name = f.own_field(config, "name").expect("name");
    assert!(name.is_static());
    assert_eq!(name.access(), Access::Protected);
    assert_eq!(name.mutability(), Some(Mutability::Val));
}

// =============================================================================
// Read-only and write-only
// =============================================================================

#[test]
fn test_getter_only_is_val_and_setter_only_is_set() {
    let mut f = Fixture::new();
    let bean = f.class("Bean", "beans");
    f.getter(bean, "getId", TypeId::LONG, PROTECTED);
    f.setter(bean, "setSecret", TypeId::INT, PUBLIC);

    f.infer(bean);

    let id = f.own_field(bean, "id").expect("id");
    assert_eq!(id.mutability(), Some(Mutability::Val));
    assert_eq!(id.access(), Access::Protected);
    assert_eq!(id.type_id, TypeId::LONG);
    let secret = f.own_field(bean, "secret").expect("secret");
    assert_eq!(secret.mutability(), Some(Mutability::Set));
    assert_eq!(secret.access(), Access::Public);
}

#[test]
fn test_read_only_over_writable_ancestor_property_is_var() {
    let mut f = Fixture::new();
    let base = f.class("Base", "p");
    let derived = f.class("Derived", "p");
    f.extends(derived, base);
    f.getter(base, "getX", TypeId::INT, PUBLIC);
    f.setter(base, "setX", TypeId::INT, PUBLIC);
    f.getter(derived, "getX", TypeId::INT, PROTECTED);

    f.infer(base);
    f.infer(derived);

    let field = f.own_field(derived, "x").expect("x in derived");
    assert_eq!(field.mutability(), Some(Mutability::Var));
    assert_eq!(field.access(), Access::Public);
}

#[test]
fn test_write_only_over_readable_ancestor_property_is_var() {
    let mut f = Fixture::new();
    let base = f.class("Base", "p");
    let derived = f.class("Derived", "p");
    f.extends(derived, base);
    f.getter(base, "getX", TypeId::INT, PROTECTED);
    f.setter(derived, "setX", TypeId::INT, PRIVATE);

    f.infer(base);
    f.infer(derived);

    assert_eq!(
        f.own_field(base, "x").expect("x in base").mutability(),
        Some(Mutability::Val)
    );
    let field = f.own_field(derived, "x").expect("x in derived");
    assert_eq!(field.mutability(), Some(Mutability::Var));
    assert_eq!(field.access(), Access::Protected);
}

// =============================================================================
// Existing fields on the same class
// =============================================================================

#[test]
fn test_existing_private_field_is_retagged_in_place() {
    let mut f = Fixture::new();
    let point = f.class("Point", "geo");
    let x = f.field(point, "x", TypeId::INT, PRIVATE | Modifiers::FINAL);
    f.getter(point, "getX", TypeId::INT, PUBLIC);
    f.setter(point, "setX", TypeId::INT, PROTECTED);

    let outcome = f.infer(point);

    assert!(outcome.created.is_empty());
    assert_eq!(outcome.retained, [x]);
    assert_eq!(f.own_field_count(point), 1);
    let field = f.table.field(x).expect("x");
    assert_eq!(field.access(), Access::Public);
    assert!(field.modifiers.contains(Modifiers::FINAL));
    assert_eq!(field.mutability(), Some(Mutability::Var));
    assert_eq!(field.auto_marker(), Some(Some(Access::Private)));
    assert_eq!(field.declared_access(), Access::Private);
    assert!(!f.table.is_erasable(x).expect("erasable"));
}

#[test]
fn test_existing_field_of_narrower_type_is_reused() {
    let mut f = Fixture::new();
    let holder = f.class("Holder", "h");
    let integer = f.ty(f.integer);
    let number = f.ty(f.number);
    let value = f.field(holder, "value", integer, PRIVATE);
    f.getter(holder, "getValue", number, PUBLIC);

    let outcome = f.infer(holder);

    assert_eq!(outcome.retained, [value]);
    let field = f.table.field(value).expect("value");
    assert_eq!(field.type_id, integer);
    assert_eq!(field.mutability(), Some(Mutability::Val));
}

#[test]
fn test_existing_plain_public_field_conflicts() {
    let mut f = Fixture::new();
    let point = f.class("Point", "geo");
    let x = f.field(point, "x", TypeId::INT, PUBLIC);
    let get = f.getter(point, "getX", TypeId::INT, PUBLIC);

    let outcome = f.infer(point);

    assert!(outcome.is_unchanged());
    assert_eq!(
        outcome.skipped[0].reason,
        SkipReason::ConflictingField { field: x }
    );
    let field = f.table.field(x).expect("x");
    assert!(field.markers.is_empty());
    assert_eq!(field.access(), Access::Public);
    assert!(!f.table.method(get).expect("getter").property_accessor);
}

#[test]
fn test_existing_field_of_wrong_type_or_staticness_conflicts() {
    let mut f = Fixture::new();
    let bean = f.class("Bean", "beans");
    let string = f.ty(f.string);
    f.field(bean, "name", string, PRIVATE);
    f.getter(bean, "getName", TypeId::INT, PUBLIC);
    f.field(bean, "count", TypeId::INT, PRIVATE | Modifiers::STATIC);
    f.getter(bean, "getCount", TypeId::INT, PUBLIC);

    let outcome = f.infer(bean);

    assert!(outcome.is_unchanged());
    assert_eq!(outcome.skipped.len(), 2);
    assert_eq!(f.own_field_count(bean), 2);
    assert!(f.snapshot(bean).iter().all(|v| v.mutability.is_none()));
}

// =============================================================================
// Existing fields in the ancestry
// =============================================================================

#[test]
fn test_ancestor_plain_field_conflicts() {
    let mut f = Fixture::new();
    let base = f.class("Base", "p");
    let derived = f.class("Derived", "p");
    f.extends(derived, base);
    let x = f.field(base, "x", TypeId::INT, PROTECTED);
    f.getter(derived, "getX", TypeId::INT, PUBLIC);

    let outcome = f.infer(derived);

    assert_eq!(
        outcome.skipped[0].reason,
        SkipReason::ConflictingField { field: x }
    );
    assert_eq!(f.own_field_count(derived), 0);
    assert!(f.table.field(x).expect("x").markers.is_empty());
}

#[test]
fn test_hidden_ancestor_field_does_not_block_synthesis() {
    let mut f = Fixture::new();
    let base = f.class("Base", "a");
    let derived = f.class("Derived", "b");
    f.extends(derived, base);
    f.field(base, "secret", TypeId::INT, PRIVATE);
    f.field(base, "local", TypeId::INT, PACKAGE);
    f.getter(derived, "getSecret", TypeId::INT, PUBLIC);
    f.getter(derived, "getLocal", TypeId::INT, PUBLIC);

    let outcome = f.infer(derived);

    assert_eq!(outcome.created.len(), 2);
    assert!(f.own_field(derived, "secret").is_some());
    assert!(f.own_field(derived, "local").is_some());
}

#[test]
fn test_ancestor_property_access_chains_down() {
    let mut f = Fixture::new();
    let base = f.class("Base", "p");
    let derived = f.class("Derived", "p");
    f.extends(derived, base);
    f.getter(base, "getX", TypeId::INT, PROTECTED);
    f.setter(base, "setX", TypeId::INT, PRIVATE);
    f.getter(derived, "getX", TypeId::INT, PRIVATE);
    f.setter(derived, "setX", TypeId::INT, PRIVATE);

    f.infer(base);
    f.infer(derived);

    assert_eq!(f.own_field(base, "x").expect("base x").access(), Access::Protected);
    assert_eq!(
        f.own_field(derived, "x").expect("derived x").access(),
        Access::Protected
    );
}

#[test]
fn test_diamond_reuses_superclass_field_once() {
    let mut f = Fixture::new();
    let iface = f.interface("HasX", "p");
    let base = f.class("B", "p");
    let child = f.class("C", "p");
    f.extends(child, base);
    f.implements(child, iface);
    f.field(iface, "x", TypeId::INT, PUBLIC);
    f.getter(base, "getX", TypeId::INT, PUBLIC);
    f.setter(base, "setX", TypeId::INT, PUBLIC);
    f.getter(child, "getX", TypeId::INT, PUBLIC);
    f.setter(child, "setX", TypeId::INT, PUBLIC);

    f.infer(base);
    let outcome = f.infer(child);

    assert_eq!(outcome.created.len(), 1);
    assert!(outcome.skipped.is_empty());
    assert_eq!(f.own_field_count(child), 1);
    assert_eq!(
        f.own_field(child, "x").expect("x").mutability(),
        Some(Mutability::Var)
    );
}

#[test]
fn test_interface_instance_field_conflicts() {
    let mut f = Fixture::new();
    let iface = f.interface("HasX", "p");
    let class = f.class("C", "p");
    f.implements(class, iface);
    let x = f.field(iface, "x", TypeId::INT, PUBLIC);
    f.getter(class, "getX", TypeId::INT, PUBLIC);

    let outcome = f.infer(class);

    assert_eq!(f.own_field_count(class), 0);
    assert_eq!(
        outcome.skipped[0].reason,
        SkipReason::ConflictingField { field: x }
    );
}

#[test]
fn test_interface_constant_is_not_inherited() {
    let mut f = Fixture::new();
    let iface = f.interface("Limits", "p");
    let class = f.class("C", "p");
    f.implements(class, iface);
    f.field(iface, "max", TypeId::INT, PUBLIC | Modifiers::STATIC);
    f.getter(class, "getMax", TypeId::INT, PUBLIC);

    let outcome = f.infer(class);

    assert_eq!(outcome.created.len(), 1);
    assert!(f.own_field(class, "max").is_some());
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn test_second_run_changes_nothing() {
    let mut f = Fixture::new();
    let bean = f.class("Bean", "beans");
    let integer = f.ty(f.integer);
    let number = f.ty(f.number);
    let string = f.ty(f.string);
    f.field(bean, "label", string, PRIVATE);
    f.getter(bean, "getLabel", string, PUBLIC);
    f.setter(bean, "setLabel", string, PRIVATE);
    f.getter(bean, "getValue", integer, PUBLIC);
    f.getter(bean, "getValue", number, PROTECTED);
    f.setter(bean, "setValue", number, PUBLIC);
    f.getter(bean, "getId", TypeId::LONG, PUBLIC);
    f.setter(bean, "setFlag", TypeId::BOOLEAN, PUBLIC);

    let first = f.infer(bean);
    let after_first = f.snapshot(bean);
    let second = f.infer(bean);
    let after_second = f.snapshot(bean);

    assert!(!first.is_unchanged());
    assert!(second.is_unchanged());
    assert!(second.skipped.is_empty());
    assert_eq!(after_first, after_second);
    let label = f.own_field(bean, "label").expect("label");
    assert_eq!(label.auto_marker(), Some(Some(Access::Private)));
}

#[test]
fn test_retagging_twice_keeps_declared_access() {
    let mut f = Fixture::new();
    let point = f.class("Point", "geo");
    let x = f.field(point, "x", TypeId::INT, PRIVATE);
    let get = f.getter(point, "getX", TypeId::INT, PUBLIC);

    f.infer(point);

    // The field is now public; a later claim must still report the access
    // it was declared with.
    let property = ResolvedProperty {
        class: point,
        name: "x".to_string(),
        mutability: Mutability::Val,
        type_id: TypeId::INT,
        access: Access::Protected,
        is_static: false,
        getter: Some(get),
        setter: None,
    };
    let plan = reconcile::plan_field(&f.table, &property).expect("plan");
    assert_eq!(
        plan,
        FieldPlan::Retag {
            field: x,
            access: Access::Public,
            declared_access: Access::Private,
            mutability: Mutability::Val,
        }
    );
}

// =============================================================================
// Driver
// =============================================================================

#[test]
fn test_infer_all_visits_ancestors_first() {
    let mut f = Fixture::new();
    // declared before its superclass on purpose
    let derived = f.class("Derived", "p");
    let base = f.class("Base", "p");
    f.extends(derived, base);
    f.getter(base, "getX", TypeId::INT, PUBLIC);
    f.setter(base, "setX", TypeId::INT, PUBLIC);
    f.getter(derived, "getX", TypeId::INT, PUBLIC);

    let outcomes = infer_all(&mut f.table).expect("infer all");

    let order: Vec<ClassId> = outcomes.iter().map(|o| o.class).collect();
    let base_pos = order.iter().position(|&c| c == base).expect("base");
    let derived_pos = order.iter().position(|&c| c == derived).expect("derived");
    assert!(base_pos < derived_pos);
    assert_eq!(
        f.own_field(derived, "x").expect("x").mutability(),
        Some(Mutability::Var)
    );
}

#[test]
fn test_unknown_class_is_an_internal_error() {
    let mut f = Fixture::new();
    let err = PropertyInference::new(&mut f.table)
        .infer_properties(ClassId(999))
        .expect_err("unknown class");
    assert!(matches!(
        err,
        InferenceError::Symbol(SymbolError::UnknownClass(ClassId(999)))
    ));
}
