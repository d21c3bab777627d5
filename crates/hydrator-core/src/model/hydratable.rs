//! Contrato de las instancias que el motor puede poblar y proyectar.
//!
//! El motor nunca usa reflexión en tiempo de ejecución: cada clase expone el
//! acceso directo a sus campos públicos (`read_field` / `write_field`) y,
//! opcionalmente, sus getters/setters por nombre de método.

use std::any::Any;
use std::fmt::Debug;

use super::PropertyValue;
use crate::errors::CastError;

pub trait Hydratable: Any + Send + Sync + Debug {
    /// Identificador de clase con el que se registró en el proveedor de metadata.
    fn class_name(&self) -> &str;

    /// Lee un campo público. `None` si el campo no existe.
    fn read_field(&self, _name: &str) -> Option<PropertyValue> {
        None
    }

    /// Escribe un campo público. `None` si el campo no existe; `Some(Err)` si
    /// el valor no es convertible al tipo del campo.
    fn write_field(&mut self, _name: &str, _value: PropertyValue) -> Option<Result<(), CastError>> {
        None
    }

    /// Invoca un getter declarado.
    fn call_getter(&self, _method: &str) -> Option<PropertyValue> {
        None
    }

    /// Invoca un setter declarado.
    fn call_setter(&mut self, _method: &str, _value: PropertyValue) -> Option<Result<(), CastError>> {
        None
    }

    fn clone_boxed(&self) -> Box<dyn Hydratable>;

    /// Igualdad estructural entre instancias de la misma clase.
    fn eq_dyn(&self, _other: &dyn Hydratable) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Clase con identificador estático y construcción en blanco (`Default`).
pub trait HydratableClass: Hydratable + Clone + Default {
    const CLASS_NAME: &'static str;
}

impl dyn Hydratable {
    pub fn is<T: Hydratable>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Hydratable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Hydratable>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Consume la instancia y la convierte al tipo concreto `T`.
    pub fn downcast<T: HydratableClass>(self: Box<Self>) -> Result<Box<T>, CastError> {
        let found = self.class_name().to_string();
        self.into_any()
            .downcast::<T>()
            .map_err(|_| CastError::incompatible(T::CLASS_NAME, found))
    }
}

impl Clone for Box<dyn Hydratable> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clase sin campos ni accesores: sólo los métodos obligatorios.
    #[derive(Debug, Clone, Default)]
    struct Opaque;

    impl Hydratable for Opaque {
        fn class_name(&self) -> &str {
            "Opaque"
        }

        fn clone_boxed(&self) -> Box<dyn Hydratable> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any> {
            self
        }
    }

    #[test]
    fn default_members_report_nothing_accessible() {
        let mut opaque = Opaque;
        assert!(opaque.read_field("name").is_none());
        assert!(opaque.write_field("name", PropertyValue::Int(1)).is_none());
        assert!(opaque.call_getter("getName").is_none());
        assert!(opaque.call_setter("setName", PropertyValue::Null).is_none());
        assert!(!opaque.eq_dyn(&Opaque));
    }

    #[test]
    fn boxed_clone_keeps_the_concrete_class() {
        let boxed: Box<dyn Hydratable> = Box::new(Opaque);
        let copy = boxed.clone();
        assert_eq!(copy.class_name(), "Opaque");
        assert!(copy.downcast_ref::<Opaque>().is_some());
    }
}
