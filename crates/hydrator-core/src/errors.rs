//! Errores del motor de hidratación.
//!
//! Ninguno de estos errores se reintenta: cualquiera aborta la llamada
//! completa de `hydrate`/`extract`. La ausencia de una clave en los datos de
//! entrada NO es un error.

use thiserror::Error;

/// Dirección del acceso a una propiedad que no pudo resolverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDirection {
    Read,
    Write,
}

impl std::fmt::Display for AccessDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessDirection::Read => write!(f, "extract"),
            AccessDirection::Write => write!(f, "map data to"),
        }
    }
}

/// Una propiedad no pública sin setter (escritura) o getter (lectura)
/// declarado en la clase.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot find a way to {direction} the property {class}::{property}")]
pub struct MappingError {
    pub class: String,
    pub property: String,
    pub direction: AccessDirection,
}

impl MappingError {
    pub fn read(class: &str, property: &str) -> Self {
        Self { class: class.to_string(),
               property: property.to_string(),
               direction: AccessDirection::Read }
    }

    pub fn write(class: &str, property: &str) -> Self {
        Self { class: class.to_string(),
               property: property.to_string(),
               direction: AccessDirection::Write }
    }
}

/// Fallos de la fábrica de instancias; se propagan sin cambios.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("class not registered in the instantiator: {0}")]
    UnknownClass(String),
    #[error("class {0} has no argument constructor")]
    NoConstructor(String),
    #[error("invalid constructor arguments for {class}: {reason}")]
    InvalidArguments { class: String, reason: String },
}

/// Fallos de conversión de un caster o de asignación a un campo tipado.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CastError {
    #[error("cannot parse '{input}' as a timestamp with format '{format}'")]
    InvalidDate { input: String, format: String },
    #[error("incompatible value: expected {expected}, found {found}")]
    Incompatible { expected: String, found: String },
}

impl CastError {
    pub fn incompatible(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Incompatible { expected: expected.into(),
                             found: found.into() }
    }
}

/// Error de nivel superior devuelto por `Hydrator`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HydrationError {
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Cast(#[from] CastError),
    #[error("no metadata registered for class {0}")]
    UnknownMetadata(String),
    #[error("maximum mapping depth {max} exceeded while mapping {class}")]
    DepthExceeded { class: String, max: usize },
}
