//! Estrategias de conversión de tipos (casters).
//!
//! Cada caster declara qué `TypeMetadata` soporta y, opcionalmente, el
//! perfil en el que se registra. El registro (`CastRegistry`) resuelve
//! primero en el perfil activo y después en el perfil por defecto.

pub mod datetime;
pub mod flat;

pub use datetime::DateTimeCastStrategy;
pub use flat::FlatTypeCastStrategy;

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::constants::DEFAULT_PROFILE;
use crate::errors::CastError;
use crate::metadata::TypeMetadata;
use crate::model::PropertyValue;

pub trait TypeCastStrategy: Send + Sync + std::fmt::Debug {
    /// Perfil en el que se registra; `None` = perfil por defecto.
    fn profile(&self) -> Option<&str> {
        None
    }

    fn supports(&self, ty: &TypeMetadata) -> bool;

    /// Dato plano -> valor tipado.
    fn hydrate(&self, ty: &TypeMetadata, value: &Value) -> Result<PropertyValue, CastError>;

    /// Valor tipado -> dato plano.
    fn extract(&self, ty: &TypeMetadata, value: &PropertyValue) -> Result<Value, CastError>;
}

/// Casters agrupados por perfil, en orden de registro.
#[derive(Debug, Default, Clone)]
pub struct CastRegistry {
    by_profile: HashMap<String, Vec<Arc<dyn TypeCastStrategy>>>,
}

impl CastRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registro con los casters incluidos (plano + fecha/hora).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.add(Arc::new(FlatTypeCastStrategy::new()));
        registry.add(Arc::new(DateTimeCastStrategy::new()));
        registry
    }

    pub fn add(&mut self, caster: Arc<dyn TypeCastStrategy>) {
        let profile = caster.profile().unwrap_or(DEFAULT_PROFILE).to_string();
        self.by_profile.entry(profile).or_default().push(caster);
    }

    /// Caster para `ty` en `profile`, con fallback al perfil por defecto.
    /// Dentro de un perfil gana el último registrado.
    pub fn find(&self, profile: &str, ty: &TypeMetadata) -> Option<&Arc<dyn TypeCastStrategy>> {
        self.find_in(profile, ty).or_else(|| {
                                     if profile == DEFAULT_PROFILE {
                                         None
                                     } else {
                                         self.find_in(DEFAULT_PROFILE, ty)
                                     }
                                 })
    }

    fn find_in(&self, profile: &str, ty: &TypeMetadata) -> Option<&Arc<dyn TypeCastStrategy>> {
        self.by_profile.get(profile)?.iter().rev().find(|c| c.supports(ty))
    }

    pub fn len(&self) -> usize {
        self.by_profile.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
