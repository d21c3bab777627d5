//! hydrator-core: motor de hidratación/extracción dirigido por metadata.
//!
//! `Hydrator::hydrate` construye una instancia tipada a partir de un mapa
//! JSON plano o anidado; `Hydrator::extract` hace el camino inverso. Los
//! nombres, las conversiones de tipo, las rutas de origen/destino y los
//! hooks de ciclo de vida son intercambiables y se seleccionan por perfil.
pub mod cast;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod hook;
pub mod instantiator;
pub mod metadata;
pub mod model;
pub mod naming;
pub mod resolver;

pub use cast::{CastRegistry, DateTimeCastStrategy, FlatTypeCastStrategy, TypeCastStrategy};
pub use config::{HydratorConfig, CONFIG};
pub use constants::DEFAULT_PROFILE;
pub use engine::{ClassPlan, Hydrator, HydratorBuilder, MappingContext, PropertyAccessor};
pub use errors::{AccessDirection, CastError, ConstructionError, HydrationError, MappingError};
pub use hook::{HookDecision, HydratorHook};
pub use instantiator::{ClassBlueprint, ClassReflection, InstanceFactory, Instantiator};
pub use metadata::{CachedMetadataProvider, ClassMetadata, MetadataProvider, PropertyAccess, PropertyMetadata,
                   StaticMetadataProvider, TypeMetadata};
pub use model::{Hydratable, HydratableClass, PropertyType, PropertyValue};
pub use naming::{NamingStrategy, UnderscoreNamingStrategy};
pub use resolver::{PathNameValueResolver, PropertyPathResolver};
