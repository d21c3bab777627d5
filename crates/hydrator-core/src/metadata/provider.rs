//! Proveedores de metadata.
//!
//! El escaneo de anotaciones/reflexión queda fuera del motor: aquí sólo vive
//! el contrato y dos implementaciones en memoria (registro estático y un
//! wrapper con cache).

use std::sync::Arc;

use dashmap::DashMap;
use log::debug;

use super::ClassMetadata;
use crate::errors::HydrationError;
use crate::instantiator::ClassReflection;

/// Contrato del proveedor de metadata consumido por el motor.
pub trait MetadataProvider: Send + Sync + std::fmt::Debug {
    /// Devuelve la descripción de la clase apuntada por `reflection`.
    fn class_metadata(&self, reflection: &ClassReflection) -> Result<Arc<ClassMetadata>, HydrationError>;
}

/// Registro en memoria indexado por identificador de clase.
#[derive(Debug, Default)]
pub struct StaticMetadataProvider {
    classes: DashMap<String, Arc<ClassMetadata>>,
}

impl StaticMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra (o reemplaza) la metadata de una clase.
    pub fn register(&self, metadata: ClassMetadata) -> &Self {
        self.classes.insert(metadata.name.clone(), Arc::new(metadata));
        self
    }

    /// Registra una lista de descripciones JSON (mismo shape que `ClassMetadata`).
    pub fn register_json(&self, value: serde_json::Value) -> Result<&Self, serde_json::Error> {
        let list: Vec<ClassMetadata> = serde_json::from_value(value)?;
        for meta in list {
            self.register(meta);
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl MetadataProvider for StaticMetadataProvider {
    fn class_metadata(&self, reflection: &ClassReflection) -> Result<Arc<ClassMetadata>, HydrationError> {
        self.classes
            .get(&reflection.class)
            .map(|m| Arc::clone(m.value()))
            .ok_or_else(|| HydrationError::UnknownMetadata(reflection.class.clone()))
    }
}

/// Envuelve otro proveedor y cachea sus respuestas durante toda la vida del
/// proceso. El espacio de claves está acotado por las clases del programa.
#[derive(Debug)]
pub struct CachedMetadataProvider<P: MetadataProvider> {
    inner: P,
    cache: DashMap<String, Arc<ClassMetadata>>,
}

impl<P: MetadataProvider> CachedMetadataProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner,
               cache: DashMap::new() }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn cached_classes(&self) -> usize {
        self.cache.len()
    }
}

impl<P: MetadataProvider> MetadataProvider for CachedMetadataProvider<P> {
    fn class_metadata(&self, reflection: &ClassReflection) -> Result<Arc<ClassMetadata>, HydrationError> {
        if let Some(hit) = self.cache.get(&reflection.class) {
            return Ok(Arc::clone(hit.value()));
        }
        let meta = self.inner.class_metadata(reflection)?;
        debug!("metadata cache fill: class={}", reflection.class);
        self.cache.insert(reflection.class.clone(), Arc::clone(&meta));
        Ok(meta)
    }
}
