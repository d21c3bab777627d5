mod common;

use std::sync::Arc;

use common::obj;
use hydrator_core::{hydratable, ClassMetadata, Hydrator, HydratorConfig, Instantiator, PropertyMetadata,
                    StaticMetadataProvider, TypeMetadata};
use serde_json::{json, Value};

hydratable! {
    pub struct Address as "Address" {
        pub street: Option<String>,
        pub city: Option<String>,
        pub zip: Option<String>,
    }
}

fn hydrator_with(config: HydratorConfig, separator: &str) -> Hydrator {
    let path = |segments: &[&str]| segments.join(separator);
    let text = || TypeMetadata::flat("string").nullable();
    let street = PropertyMetadata::public("street", text()).from(path(&["parent", "child", "grandchild"]))
                                                           .to(path(&["a", "b", "c"]));
    let city = PropertyMetadata::public("city", text()).to(path(&["a", "b", "d"]));
    let zip = PropertyMetadata::public("zip", text());

    let provider = StaticMetadataProvider::new();
    provider.register(ClassMetadata::new("Address").property(street).property(city).property(zip));
    let factory = Instantiator::new();
    factory.register::<Address>();
    Hydrator::builder(Arc::new(provider), Arc::new(factory)).config(config).build()
}

fn hydrator() -> Hydrator {
    hydrator_with(HydratorConfig::default(), ".")
}

#[test]
fn dotted_source_path_is_walked() {
    let hydrator = hydrator();
    let input = obj(json!({"parent": {"child": {"grandchild": "v"}}}));
    let address = hydrator.hydrate_as::<Address>(&input, None).unwrap();
    assert_eq!(address.street.as_deref(), Some("v"));
}

#[test]
fn dotted_target_path_creates_and_merges_maps() {
    let hydrator = hydrator();
    let address = Address { street: Some("v".into()),
                            city: Some("Paris".into()),
                            zip: Some("75001".into()) };
    let out = hydrator.extract(&address, None).unwrap();
    assert_eq!(Value::Object(out), json!({"a": {"b": {"c": "v", "d": "Paris"}}, "zip": "75001"}));
}

#[test]
fn missing_intermediate_segment_is_absent() {
    let hydrator = hydrator();
    let input = obj(json!({"parent": {"other": {}}, "street": "ignored"}));
    let address = hydrator.hydrate_as::<Address>(&input, None).unwrap();
    // explicit path wins; the plain key is not consulted
    assert_eq!(address.street, None);
}

#[test]
fn source_and_target_paths_are_independent() {
    let hydrator = hydrator();
    // city has only a target path, so it is read from its own key
    let address = hydrator.hydrate_as::<Address>(&obj(json!({"city": "Lyon"})), None).unwrap();
    assert_eq!(address.city.as_deref(), Some("Lyon"));
}

#[test]
fn configured_separator_is_honoured() {
    let config = HydratorConfig { path_separator: '/',
                                  ..HydratorConfig::default() };
    let hydrator = hydrator_with(config, "/");
    let address = hydrator.hydrate_as::<Address>(&obj(json!({"parent": {"child": {"grandchild": "v"}}})), None)
                          .unwrap();
    assert_eq!(address.street.as_deref(), Some("v"));

    let out = hydrator.extract(&address, None).unwrap();
    assert_eq!(out["a"], json!({"b": {"c": "v", "d": null}}));
}
