//! Hooks del ciclo de vida de hidratación/extracción.
//!
//! Un hook por perfil. Los callbacks `on_before_*`/`on_after_*` observan; los
//! callbacks por propiedad pueden imponer un valor devolviendo
//! `HookDecision::Override`.

use serde_json::{Map, Value};

use crate::metadata::{ClassMetadata, PropertyMetadata};
use crate::model::Hydratable;

/// Decisión de un hook por propiedad.
#[derive(Debug, Clone, PartialEq)]
pub enum HookDecision<T> {
    /// El motor resuelve el valor por su cuenta.
    UseResolvedValue,
    /// El motor usa este valor tal cual.
    Override(T),
}

impl<T> HookDecision<T> {
    pub fn into_override(self) -> Option<T> {
        match self {
            HookDecision::Override(v) => Some(v),
            HookDecision::UseResolvedValue => None,
        }
    }
}

pub trait HydratorHook: Send + Sync + std::fmt::Debug {
    /// Perfil en el que se registra; `None` = perfil por defecto.
    fn profile(&self) -> Option<&str> {
        None
    }

    fn on_before_hydrate(&self, _metadata: &ClassMetadata, _data: &Map<String, Value>) {}

    fn on_after_hydrate(&self, _metadata: &ClassMetadata, _instance: &mut dyn Hydratable) {}

    fn on_before_extract(&self, _metadata: &ClassMetadata, _instance: &dyn Hydratable) {}

    fn on_after_extract(&self, _metadata: &ClassMetadata, _data: &Map<String, Value>) {}

    /// Valor crudo a usar para `property`. Un `Override(Value::Null)` cuenta
    /// como dato ausente.
    fn on_property_hydrate(&self,
                           _metadata: &ClassMetadata,
                           _property: &PropertyMetadata,
                           _data: &Map<String, Value>)
                           -> HookDecision<Value> {
        HookDecision::UseResolvedValue
    }

    /// Consultado tras escribir una propiedad en una ruta anidada; un
    /// `Override` sustituye el resultado acumulado completo.
    fn on_property_extract(&self,
                           _metadata: &ClassMetadata,
                           _property: &PropertyMetadata,
                           _partial: &Map<String, Value>)
                           -> HookDecision<Map<String, Value>> {
        HookDecision::UseResolvedValue
    }
}
