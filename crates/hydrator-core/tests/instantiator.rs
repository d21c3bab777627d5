mod common;

use common::Person;
use hydrator_core::{ClassBlueprint, ConstructionError, Hydratable, InstanceFactory, Instantiator};
use serde_json::{json, Value};

fn person_with_constructor() -> ClassBlueprint {
    ClassBlueprint::of::<Person>().with_methods(["getName"])
                                  .with_constructor(["name"], |args: &[Value]| {
                                      let name = args.first()
                                                     .and_then(Value::as_str)
                                                     .ok_or_else(|| ConstructionError::InvalidArguments { class: "Person".into(),
                                                                                                        reason: "name must be a string".into() })?;
                                      Ok(Box::new(Person { name: name.to_string(),
                                                           birth_date: None }) as Box<dyn Hydratable>)
                                  })
}

#[test]
fn blank_instances_are_copies_of_a_cached_template() {
    let factory = Instantiator::new();
    factory.register::<Person>();
    assert_eq!(factory.cached_templates(), 0);

    let mut first = factory.instantiate("Person", None).unwrap();
    first.downcast_mut::<Person>().unwrap().name = "changed".into();
    assert_eq!(factory.cached_templates(), 1);

    let second = factory.instantiate("Person", None).unwrap();
    assert_eq!(second.downcast_ref::<Person>().unwrap().name, "");
    assert_eq!(factory.cached_templates(), 1);
}

#[test]
fn constructor_arguments_bypass_the_cache() {
    let factory = Instantiator::new();
    factory.register_blueprint(person_with_constructor());

    let built = factory.instantiate("Person", Some(&[json!("Ada")][..])).unwrap();
    assert_eq!(built.downcast_ref::<Person>().unwrap().name, "Ada");
    assert_eq!(factory.cached_templates(), 0);

    let err = factory.instantiate("Person", Some(&[json!(1)][..])).unwrap_err();
    assert!(matches!(err, ConstructionError::InvalidArguments { .. }));
}

#[test]
fn arguments_without_constructor_are_rejected() {
    let factory = Instantiator::new();
    factory.register::<Person>();
    let no_args: &[Value] = &[];
    let err = factory.instantiate("Person", Some(no_args)).unwrap_err();
    assert_eq!(err, ConstructionError::NoConstructor("Person".into()));
}

#[test]
fn unknown_classes_fail_both_operations() {
    let factory = Instantiator::new();
    assert_eq!(factory.instantiate("Ghost", None).unwrap_err(), ConstructionError::UnknownClass("Ghost".into()));
    assert_eq!(factory.reflection("Ghost").unwrap_err(), ConstructionError::UnknownClass("Ghost".into()));
}

#[test]
fn reflection_exposes_declared_structure() {
    let factory = Instantiator::new();
    factory.register_blueprint(person_with_constructor());
    let reflection = factory.reflection("Person").unwrap();
    assert_eq!(reflection.class, "Person");
    assert!(reflection.has_method("getName"));
    assert_eq!(reflection.constructor, vec!["name".to_string()]);
}

#[test]
fn re_registration_drops_the_template() {
    let factory = Instantiator::new();
    factory.register::<Person>();
    factory.instantiate("Person", None).unwrap();
    assert_eq!(factory.cached_templates(), 1);

    factory.register_blueprint(ClassBlueprint::new("Person", || {
        Box::new(Person { name: "seed".into(),
                          birth_date: None })
    }));
    assert_eq!(factory.cached_templates(), 0);
    let person = factory.instantiate("Person", None).unwrap();
    assert_eq!(person.downcast_ref::<Person>().unwrap().name, "seed");
}
