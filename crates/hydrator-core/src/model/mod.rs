//! Modelo de instancias y valores (Hydratable, PropertyValue, PropertyType).

pub mod hydratable;
pub mod macros;
pub mod value;

pub use hydratable::{Hydratable, HydratableClass};
pub use value::{PropertyType, PropertyValue};
