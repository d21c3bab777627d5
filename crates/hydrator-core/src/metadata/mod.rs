//! Modelo de metadata (clase / propiedad / tipo) y proveedores.

pub mod class;
pub mod provider;

pub use class::{ClassMetadata, PropertyAccess, PropertyMetadata, TypeMetadata};
pub use provider::{CachedMetadataProvider, MetadataProvider, StaticMetadataProvider};
