use std::sync::Arc;

use chrono::{TimeZone, Utc};
use hydrator::prelude::*;
use serde_json::{json, Map, Value};

hydratable! {
    pub struct Person as "Person" {
        pub name: String,
        pub birth_date as "birthDate": Option<chrono::DateTime<chrono::FixedOffset>>,
    }
}

hydratable! {
    pub struct Team as "Team" {
        pub title: String,
        pub members: Vec<Person>,
    }
}

const CATALOG: &str = r#"{
  "classes": [
    { "name": "Person", "properties": [
        { "name": "name", "type": { "name": "string" }, "access": "public" },
        { "name": "birthDate", "type": { "name": "DateTime", "is_nullable": true }, "access": "public" }
    ] },
    { "name": "Team", "properties": [
        { "name": "title", "type": { "name": "string" }, "access": "public",
          "attrs": { "source_name": "meta.title", "extract_name": "meta.title" } },
        { "name": "members", "type": { "name": "Person", "is_array": true, "is_flat": false }, "access": "public" }
    ] }
  ]
}"#;

fn hydrator() -> Hydrator {
    let provider = Catalog::parse(CATALOG).expect("catalog").into_provider();
    let factory = Instantiator::new();
    factory.register::<Person>().register::<Team>();
    Hydrator::new(Arc::new(provider), Arc::new(factory))
}

fn obj(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn catalog_driven_team_round_trip() {
    let hydrator = hydrator();
    let input = json!({
        "meta": {"title": "Analysts"},
        "members": [
            {"name": "Ada", "birth_date": "2020-01-02T00:00:00+0000"},
            {"name": "Grace", "birth_date": "1906-12-09T00:00:00+0000"}
        ]
    });

    let team = hydrator.hydrate_as::<Team>(&obj(input.clone()), None).expect("hydrate");
    assert_eq!(team.title, "Analysts");
    assert_eq!(team.members.len(), 2);
    assert_eq!(team.members[0].birth_date,
               Some(Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap().fixed_offset()));

    let out = hydrator.extract(&team, None).expect("extract");
    assert_eq!(Value::Object(out), input);
}

#[test]
fn invalid_timestamp_aborts_the_whole_call() {
    let hydrator = hydrator();
    let input = obj(json!({"meta": {"title": "x"}, "members": [{"name": "Ada", "birth_date": "soon"}]}));
    let err = hydrator.hydrate(&input, "Team", None).unwrap_err();
    assert!(matches!(err, HydrationError::Cast(_)), "unexpected error: {err:?}");
}

#[test]
fn boxed_instances_downcast_to_their_class() {
    let hydrator = hydrator();
    let instance = hydrator.hydrate(&obj(json!({"name": "Ada"})), "Person", None).unwrap();
    assert_eq!(instance.class_name(), "Person");
    let person = instance.downcast::<Person>().unwrap();
    assert_eq!(person.name, "Ada");
    assert_eq!(person.birth_date, None);
}
