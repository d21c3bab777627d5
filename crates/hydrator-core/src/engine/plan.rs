//! Plan de acceso por clase.
//!
//! Para cada propiedad se decide una sola vez si se accede al campo
//! directamente o mediante getter/setter, contrastando los nombres que
//! produce la estrategia de nombres con los métodos declarados.

use std::sync::Arc;

use crate::instantiator::ClassReflection;
use crate::metadata::{ClassMetadata, PropertyMetadata};
use crate::naming::NamingStrategy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyAccessor {
    /// Propiedad pública: `read_field` / `write_field`.
    DirectField,
    /// Propiedad no pública; `None` si el método no está declarado.
    Accessors { getter: Option<String>, setter: Option<String> },
}

impl PropertyAccessor {
    pub fn resolve(property: &PropertyMetadata,
                   metadata: &ClassMetadata,
                   reflection: &ClassReflection,
                   naming: &dyn NamingStrategy)
                   -> Self {
        if property.access.is_public() {
            return PropertyAccessor::DirectField;
        }
        let declared = |name: String| {
            if metadata.has_method(&name) || reflection.has_method(&name) {
                Some(name)
            } else {
                None
            }
        };
        PropertyAccessor::Accessors { getter: declared(naming.getter_name(property)),
                                      setter: declared(naming.setter_name(property)) }
    }
}

#[derive(Debug)]
pub struct ClassPlan {
    pub metadata: Arc<ClassMetadata>,
    accessors: Vec<PropertyAccessor>,
}

impl ClassPlan {
    pub fn build(metadata: Arc<ClassMetadata>, reflection: &ClassReflection, naming: &dyn NamingStrategy) -> Self {
        let accessors = metadata.properties
                                .iter()
                                .map(|p| PropertyAccessor::resolve(p, &metadata, reflection, naming))
                                .collect();
        Self { metadata, accessors }
    }

    /// Propiedades en orden de metadata junto a su acceso resuelto.
    pub fn properties(&self) -> impl Iterator<Item = (&PropertyMetadata, &PropertyAccessor)> {
        self.metadata.properties.iter().zip(self.accessors.iter())
    }
}
