//! Fixtures compartidos por los tests de integración.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use hydrator_core::{hydratable, ClassMetadata, Hydrator, Instantiator, PropertyMetadata, StaticMetadataProvider,
                    TypeMetadata};
use serde_json::{Map, Value};

hydratable! {
    pub struct Person as "Person" {
        pub name: String,
        pub birth_date as "birthDate": Option<DateTime<FixedOffset>>,
    }
}

hydratable! {
    pub struct Team as "Team" {
        pub members: Vec<Person>,
    }
}

pub fn person_metadata() -> ClassMetadata {
    ClassMetadata::new("Person").property(PropertyMetadata::public("name", TypeMetadata::flat("string")))
                                .property(PropertyMetadata::public("birthDate", TypeMetadata::flat("DateTime").nullable()))
}

pub fn team_metadata() -> ClassMetadata {
    ClassMetadata::new("Team").property(PropertyMetadata::public("members", TypeMetadata::class("Person").array()))
}

/// Proveedor y fábrica con `Person` y `Team` ya registrados.
pub fn registries() -> (StaticMetadataProvider, Instantiator) {
    let provider = StaticMetadataProvider::new();
    provider.register(person_metadata()).register(team_metadata());
    let factory = Instantiator::new();
    factory.register::<Person>().register::<Team>();
    (provider, factory)
}

pub fn hydrator() -> Hydrator {
    let (provider, factory) = registries();
    Hydrator::new(Arc::new(provider), Arc::new(factory))
}

pub fn obj(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be an object, got {other}"),
    }
}
