//! Builder para `Hydrator`.
//!
//! Acumula los componentes opcionales (estrategia de nombres, casters,
//! resolvers, hooks y configuración) y los aplica en `build()` en el mismo
//! orden en que se registraron. Proveedor de metadata y fábrica de
//! instancias son obligatorios y se reciben en la construcción.
//!
//! ```ignore
//! let hydrator = Hydrator::builder(provider, factory)
//!     .type_cast_strategy(Arc::new(MyCaster))
//!     .hook(Arc::new(AuditHook))
//!     .build();
//! ```

use std::sync::Arc;

use crate::cast::TypeCastStrategy;
use crate::config::HydratorConfig;
use crate::engine::Hydrator;
use crate::hook::HydratorHook;
use crate::instantiator::InstanceFactory;
use crate::metadata::MetadataProvider;
use crate::naming::NamingStrategy;
use crate::resolver::PropertyPathResolver;

#[derive(Debug)]
pub struct HydratorBuilder {
    provider: Arc<dyn MetadataProvider>,
    factory: Arc<dyn InstanceFactory>,
    naming: Option<Arc<dyn NamingStrategy>>,
    casters: Vec<Arc<dyn TypeCastStrategy>>,
    resolvers: Vec<Arc<dyn PropertyPathResolver>>,
    hooks: Vec<Arc<dyn HydratorHook>>,
    config: Option<HydratorConfig>,
}

impl HydratorBuilder {
    pub fn new(provider: Arc<dyn MetadataProvider>, factory: Arc<dyn InstanceFactory>) -> Self {
        Self { provider,
               factory,
               naming: None,
               casters: Vec::new(),
               resolvers: Vec::new(),
               hooks: Vec::new(),
               config: None }
    }

    pub fn naming_strategy(mut self, naming: Arc<dyn NamingStrategy>) -> Self {
        self.naming = Some(naming);
        self
    }

    pub fn type_cast_strategy(mut self, caster: Arc<dyn TypeCastStrategy>) -> Self {
        self.casters.push(caster);
        self
    }

    pub fn property_resolver(mut self, resolver: Arc<dyn PropertyPathResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    pub fn hook(mut self, hook: Arc<dyn HydratorHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Sustituye la configuración global (`CONFIG`) para este motor.
    pub fn config(mut self, config: HydratorConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Hydrator {
        let mut hydrator = Hydrator::new(self.provider, self.factory);
        if let Some(config) = self.config {
            hydrator.set_config(config);
        }
        if let Some(naming) = self.naming {
            hydrator.with_naming_strategy(naming);
        }
        for caster in self.casters {
            hydrator.add_type_cast_strategy(caster);
        }
        for resolver in self.resolvers {
            hydrator.add_property_resolver(resolver);
        }
        for hook in self.hooks {
            hydrator.attach_hook(hook);
        }
        hydrator
    }
}
