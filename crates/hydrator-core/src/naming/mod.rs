//! Estrategias de nombres: propiedad declarada -> clave en datos planos y
//! nombres de getter/setter.

pub mod underscore;

pub use underscore::UnderscoreNamingStrategy;

use crate::metadata::PropertyMetadata;

/// Las tres operaciones deben ser funciones puras de la metadata.
pub trait NamingStrategy: Send + Sync + std::fmt::Debug {
    /// Clave usada en los datos planos.
    fn translate(&self, property: &PropertyMetadata) -> String;
    fn setter_name(&self, property: &PropertyMetadata) -> String;
    fn getter_name(&self, property: &PropertyMetadata) -> String;
}

/// Primera letra en mayúscula (`birthDate` -> `BirthDate`).
pub(crate) fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Primera letra en minúscula.
pub(crate) fn lcfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
