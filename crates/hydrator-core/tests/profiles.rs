mod common;

use std::sync::Arc;

use common::{obj, registries, Person};
use hydrator_core::{CastError, Hydratable, Hydrator, PropertyMetadata, PropertyPathResolver, PropertyValue, TypeCastStrategy,
                    TypeMetadata};
use serde_json::{json, Map, Value};

/// Caster de texto que pasa todo a mayúsculas.
#[derive(Debug)]
struct Shout {
    profile: Option<&'static str>,
}

impl TypeCastStrategy for Shout {
    fn profile(&self) -> Option<&str> {
        self.profile
    }

    fn supports(&self, ty: &TypeMetadata) -> bool {
        ty.name == "string"
    }

    fn hydrate(&self, _ty: &TypeMetadata, value: &Value) -> Result<PropertyValue, CastError> {
        Ok(PropertyValue::String(value.as_str().unwrap_or_default().to_uppercase()))
    }

    fn extract(&self, _ty: &TypeMetadata, value: &PropertyValue) -> Result<Value, CastError> {
        Ok(Value::String(value.as_str().unwrap_or_default().to_lowercase()))
    }
}

/// Resolver que lee y escribe todo bajo el prefijo `legacy_`.
#[derive(Debug)]
struct Legacy;

impl PropertyPathResolver for Legacy {
    fn profile(&self) -> Option<&str> {
        Some("legacy")
    }

    fn supports(&self, _property: &PropertyMetadata) -> bool {
        true
    }

    fn supports_extraction(&self, _property: &PropertyMetadata) -> bool {
        true
    }

    fn resolve_source(&self, property: &PropertyMetadata, _data: &Map<String, Value>) -> String {
        format!("legacy_{}", property.name)
    }

    fn resolve_target(&self, property: &PropertyMetadata, _instance: &dyn Hydratable) -> String {
        format!("legacy_{}", property.name)
    }
}

fn hydrator() -> Hydrator {
    let (provider, factory) = registries();
    Hydrator::builder(Arc::new(provider), Arc::new(factory)).type_cast_strategy(Arc::new(Shout { profile: Some("shout") }))
                                                            .property_resolver(Arc::new(Legacy))
                                                            .build()
}

#[test]
fn exact_profile_caster_wins_over_default() {
    let hydrator = hydrator();
    let input = obj(json!({"name": "Ada"}));

    let loud = hydrator.hydrate_as::<Person>(&input, Some("shout")).unwrap();
    assert_eq!(loud.name, "ADA");

    let plain = hydrator.hydrate_as::<Person>(&input, None).unwrap();
    assert_eq!(plain.name, "Ada");
}

#[test]
fn unknown_profile_uses_default_registrations() {
    let hydrator = hydrator();
    let person = hydrator.hydrate_as::<Person>(&obj(json!({"name": "Ada"})), Some("nope")).unwrap();
    assert_eq!(person.name, "Ada");
}

#[test]
fn profile_reaches_nested_objects() {
    let hydrator = hydrator();
    let team = hydrator.hydrate_as::<common::Team>(&obj(json!({"members": [{"name": "Ada"}]})), Some("shout"))
                       .unwrap();
    assert_eq!(team.members[0].name, "ADA");

    let out = hydrator.extract(&team, Some("shout")).unwrap();
    assert_eq!(out["members"][0]["name"], json!("ada"));
}

#[test]
fn last_registered_default_caster_wins() {
    let (provider, factory) = registries();
    let mut hydrator = Hydrator::new(Arc::new(provider), Arc::new(factory));
    hydrator.add_type_cast_strategy(Arc::new(Shout { profile: None }));
    let person = hydrator.hydrate_as::<Person>(&obj(json!({"name": "Ada"})), None).unwrap();
    assert_eq!(person.name, "ADA");
}

#[test]
fn resolver_is_selected_by_profile() {
    let hydrator = hydrator();
    let input = obj(json!({"legacy_name": "Old", "name": "New"}));

    let legacy = hydrator.hydrate_as::<Person>(&input, Some("legacy")).unwrap();
    assert_eq!(legacy.name, "Old");
    let out = hydrator.extract(&legacy, Some("legacy")).unwrap();
    assert_eq!(Value::Object(out), json!({"legacy_name": "Old", "legacy_birthDate": null}));

    let current = hydrator.hydrate_as::<Person>(&input, None).unwrap();
    assert_eq!(current.name, "New");
}

#[test]
fn concurrent_calls_keep_their_own_profile() {
    let hydrator = Arc::new(hydrator());
    let handles: Vec<_> = (0..8).map(|i| {
                                    let hydrator = Arc::clone(&hydrator);
                                    std::thread::spawn(move || {
                                        let profile = if i % 2 == 0 { Some("shout") } else { None };
                                        let person = hydrator.hydrate_as::<Person>(&obj(json!({"name": "Ada"})), profile)
                                                             .unwrap();
                                        (profile, person.name)
                                    })
                                })
                                .collect();
    for handle in handles {
        let (profile, name) = handle.join().unwrap();
        let expected = if profile.is_some() { "ADA" } else { "Ada" };
        assert_eq!(name, expected);
    }
}
