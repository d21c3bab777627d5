//! Catálogo de metadata declarado en JSON.
//!
//! Permite describir las clases en un documento en vez de construirlas con
//! los builders, y comprueba al cargarlo que el grafo de tipos es coherente:
//! clases y propiedades sin duplicados y toda referencia a clase (tipo no
//! plano) apuntando a una clase del propio catálogo.
//!
//! ```json
//! { "classes": [ { "name": "Person", "properties": [
//!     { "name": "name", "type": { "name": "string" }, "access": "public" } ] } ] }
//! ```

use std::collections::HashSet;

use hydrator_core::{ClassMetadata, StaticMetadataProvider};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catálogo inválido: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Clase duplicada en el catálogo: {0}")]
    DuplicateClass(String),
    #[error("Propiedad duplicada: {class}::{property}")]
    DuplicateProperty { class: String, property: String },
    #[error("{class}::{property} referencia una clase desconocida: {target}")]
    UnknownClassReference { class: String, property: String, target: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub classes: Vec<ClassMetadata>,
}

impl Catalog {
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(text)?;
        catalog.validate()?;
        debug!("catalog loaded: {} classes", catalog.classes.len());
        Ok(catalog)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_value(value)?;
        catalog.validate()?;
        debug!("catalog loaded: {} classes", catalog.classes.len());
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut names = HashSet::new();
        for class in &self.classes {
            if !names.insert(class.name.as_str()) {
                return Err(CatalogError::DuplicateClass(class.name.clone()));
            }
        }
        for class in &self.classes {
            let mut seen = HashSet::new();
            for property in &class.properties {
                if !seen.insert(property.name.as_str()) {
                    return Err(CatalogError::DuplicateProperty { class: class.name.clone(),
                                                                 property: property.name.clone() });
                }
                if !property.ty.is_flat && !names.contains(property.ty.name.as_str()) {
                    return Err(CatalogError::UnknownClassReference { class: class.name.clone(),
                                                                     property: property.name.clone(),
                                                                     target: property.ty.name.clone() });
                }
            }
        }
        Ok(())
    }

    /// Proveedor en memoria con todas las clases del catálogo.
    pub fn into_provider(self) -> StaticMetadataProvider {
        let provider = StaticMetadataProvider::new();
        for class in self.classes {
            provider.register(class);
        }
        provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person() -> serde_json::Value {
        json!({"name": "Person", "properties": [
            {"name": "name", "type": {"name": "string"}, "access": "public"},
            {"name": "birthDate", "type": {"name": "DateTime", "is_nullable": true}, "access": "public"}
        ]})
    }

    #[test]
    fn loads_and_registers_classes() {
        let team = json!({"name": "Team", "properties": [
            {"name": "members", "type": {"name": "Person", "is_array": true, "is_flat": false}, "access": "public"}
        ]});
        let catalog = Catalog::from_value(json!({"classes": [person(), team]})).unwrap();
        assert_eq!(catalog.classes.len(), 2);
        assert!(catalog.classes[0].properties[1].ty.is_nullable);
        assert_eq!(catalog.into_provider().len(), 2);
    }

    #[test]
    fn rejects_dangling_class_references() {
        let team = json!({"name": "Team", "properties": [
            {"name": "lead", "type": {"name": "Coach", "is_flat": false}, "access": "private"}
        ]});
        let err = Catalog::from_value(json!({"classes": [team]})).unwrap_err();
        assert_eq!(err.to_string(), "Team::lead referencia una clase desconocida: Coach");
    }

    #[test]
    fn rejects_duplicates() {
        let err = Catalog::from_value(json!({"classes": [person(), person()]})).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateClass(ref c) if c == "Person"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(Catalog::parse("{\"classes\": 3}"), Err(CatalogError::Parse(_))));
    }
}
