//! Hydrator Rust Library
//!
//! Fachada sobre `hydrator-core`:
//! - Re-exporta el motor (`Hydrator`), la metadata y las estrategias.
//! - Expone `catalog` para declarar la metadata en un documento JSON.
//! - `prelude` reúne lo necesario para configurar y usar el motor.

pub mod catalog;

pub use hydrator_core::*;

pub mod prelude {
    pub use crate::catalog::{Catalog, CatalogError};
    pub use hydrator_core::{hydratable, ClassBlueprint, ClassMetadata, HookDecision, Hydratable, HydratableClass,
                            HydrationError, Hydrator, HydratorConfig, HydratorHook, InstanceFactory, Instantiator,
                            MetadataProvider, PropertyMetadata, PropertyPathResolver, PropertyType, PropertyValue,
                            StaticMetadataProvider, TypeCastStrategy, TypeMetadata, DEFAULT_PROFILE};
}
