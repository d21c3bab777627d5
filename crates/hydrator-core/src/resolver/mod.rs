//! Resolvers de rutas por propiedad.
//!
//! Un resolver sobreescribe, para una propiedad y una dirección
//! (lectura/escritura), la clave en la que se busca/escribe el valor. Las
//! claves pueden ser rutas anidadas (`parent.child.leaf`).

pub mod path;
pub mod path_name;

pub use path::{insert_path, lookup_path, PathLookup};
pub use path_name::PathNameValueResolver;

use serde_json::{Map, Value};

use crate::metadata::PropertyMetadata;
use crate::model::Hydratable;

pub trait PropertyPathResolver: Send + Sync + std::fmt::Debug {
    /// Perfil en el que se registra; `None` = perfil por defecto.
    fn profile(&self) -> Option<&str> {
        None
    }

    /// Existe una ruta de lectura explícita para la propiedad.
    fn supports(&self, property: &PropertyMetadata) -> bool;

    /// Existe una ruta de escritura explícita para la propiedad.
    fn supports_extraction(&self, property: &PropertyMetadata) -> bool;

    /// Ruta de lectura. Sólo se invoca si `supports` devolvió `true`.
    fn resolve_source(&self, property: &PropertyMetadata, data: &Map<String, Value>) -> String;

    /// Ruta de escritura. Sólo se invoca si `supports_extraction` devolvió `true`.
    fn resolve_target(&self, property: &PropertyMetadata, instance: &dyn Hydratable) -> String;
}
