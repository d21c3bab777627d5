//! Descripciones inmutables de clases, propiedades y tipos.
//!
//! Las construye el proveedor de metadata (externo) una sola vez y el motor
//! las comparte entre todas las llamadas. Los builders (`property`, `attr`,
//! `from`, `to`, ...) sólo se usan en tiempo de configuración.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{EXTRACT_NAME_ATTR, SOURCE_NAME_ATTR};

/// Tipo declarado de una propiedad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMetadata {
    /// Tag plano (`string`, `int`, `bool`, ...) o identificador de clase.
    pub name: String,
    /// El valor es una secuencia de `name`.
    #[serde(default)]
    pub is_array: bool,
    /// No requiere hidratación recursiva.
    #[serde(default = "default_true")]
    pub is_flat: bool,
    #[serde(default)]
    pub is_nullable: bool,
    /// Pista de formato (p.ej. patrón de fecha).
    #[serde(default)]
    pub format: Option<String>,
}

fn default_true() -> bool {
    true
}

impl TypeMetadata {
    /// Tipo plano (primitivo o manejado íntegramente por un caster).
    pub fn flat(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               is_array: false,
               is_flat: true,
               is_nullable: false,
               format: None }
    }

    /// Tipo que referencia a otra clase descrita por el proveedor.
    pub fn class(class: impl Into<String>) -> Self {
        Self { is_flat: false,
               ..Self::flat(class) }
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// `true` para los tags booleanos (`bool` / `boolean`).
    pub fn is_boolean(&self) -> bool {
        self.name == "bool" || self.name == "boolean"
    }
}

/// Visibilidad declarada de la propiedad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyAccess {
    Public,
    Protected,
    Private,
}

impl PropertyAccess {
    pub fn is_public(self) -> bool {
        matches!(self, PropertyAccess::Public)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyMetadata {
    /// Identificador declarado (sin traducir).
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeMetadata,
    pub access: PropertyAccess,
    /// Datos de extensión abiertos (overrides de rutas, etc.).
    #[serde(default)]
    pub attrs: IndexMap<String, Value>,
}

impl PropertyMetadata {
    pub fn new(name: impl Into<String>, ty: TypeMetadata, access: PropertyAccess) -> Self {
        Self { name: name.into(),
               ty,
               access,
               attrs: IndexMap::new() }
    }

    pub fn public(name: impl Into<String>, ty: TypeMetadata) -> Self {
        Self::new(name, ty, PropertyAccess::Public)
    }

    pub fn private(name: impl Into<String>, ty: TypeMetadata) -> Self {
        Self::new(name, ty, PropertyAccess::Private)
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Ruta explícita desde la que se lee el valor al hidratar.
    pub fn from(self, path: impl Into<String>) -> Self {
        self.attr(SOURCE_NAME_ATTR, path.into())
    }

    /// Ruta explícita en la que se escribe el valor al extraer.
    pub fn to(self, path: impl Into<String>) -> Self {
        self.attr(EXTRACT_NAME_ATTR, path.into())
    }

    /// Atributo de tipo texto, si existe.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetadata {
    pub name: String,
    /// En orden de declaración; nombres únicos dentro de la clase.
    pub properties: Vec<PropertyMetadata>,
    /// Métodos declarados, para comprobar setters/getters sin reflexión.
    #[serde(default)]
    pub methods: IndexSet<String>,
}

impl ClassMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               properties: Vec::new(),
               methods: IndexSet::new() }
    }

    /// Añade una propiedad; una propiedad con el mismo nombre se reemplaza
    /// en su posición original.
    pub fn property(mut self, property: PropertyMetadata) -> Self {
        match self.properties.iter().position(|p| p.name == property.name) {
            Some(idx) => self.properties[idx] = property,
            None => self.properties.push(property),
        }
        self
    }

    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.methods.insert(name.into());
        self
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains(name)
    }

    pub fn find_property(&self, name: &str) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|p| p.name == name)
    }
}
