//! Fábrica de instancias.
//!
//! Sustituye la instanciación por reflexión: cada clase se registra con un
//! `ClassBlueprint` (constructor en blanco, constructor con argumentos
//! opcional y datos estructurales). La primera instanciación en blanco guarda
//! una plantilla y las siguientes devuelven una copia de ella.
//!
//! Las caches viven lo mismo que el proceso y no se purgan: el número de
//! claves está acotado por las clases registradas.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use indexmap::IndexSet;
use log::debug;
use serde_json::Value;

use crate::errors::ConstructionError;
use crate::model::{Hydratable, HydratableClass};

/// Datos estructurales de una clase (sustituto de la reflexión).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassReflection {
    pub class: String,
    /// Métodos declarados (getters/setters incluidos).
    pub methods: IndexSet<String>,
    /// Nombres de los parámetros del constructor con argumentos.
    pub constructor: Vec<String>,
}

impl ClassReflection {
    pub fn new(class: impl Into<String>) -> Self {
        Self { class: class.into(),
               methods: IndexSet::new(),
               constructor: Vec::new() }
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains(name)
    }
}

type BlankFn = Arc<dyn Fn() -> Box<dyn Hydratable> + Send + Sync>;
type ConstructFn = Arc<dyn Fn(&[Value]) -> Result<Box<dyn Hydratable>, ConstructionError> + Send + Sync>;

/// Registro de construcción de una clase.
#[derive(Clone)]
pub struct ClassBlueprint {
    reflection: Arc<ClassReflection>,
    blank: BlankFn,
    construct: Option<ConstructFn>,
}

impl ClassBlueprint {
    pub fn new<F>(class: impl Into<String>, blank: F) -> Self
        where F: Fn() -> Box<dyn Hydratable> + Send + Sync + 'static
    {
        Self { reflection: Arc::new(ClassReflection::new(class)),
               blank: Arc::new(blank),
               construct: None }
    }

    /// Blueprint de una clase `HydratableClass` (construcción vía `Default`).
    pub fn of<T: HydratableClass>() -> Self {
        Self::new(T::CLASS_NAME, || Box::new(T::default()))
    }

    pub fn with_methods<I, S>(mut self, methods: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Arc::make_mut(&mut self.reflection).methods.extend(methods.into_iter().map(Into::into));
        self
    }

    /// Constructor con argumentos posicionales.
    pub fn with_constructor<I, S, F>(mut self, params: I, construct: F) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>,
              F: Fn(&[Value]) -> Result<Box<dyn Hydratable>, ConstructionError> + Send + Sync + 'static
    {
        Arc::make_mut(&mut self.reflection).constructor = params.into_iter().map(Into::into).collect();
        self.construct = Some(Arc::new(construct));
        self
    }

    pub fn reflection(&self) -> &Arc<ClassReflection> {
        &self.reflection
    }
}

impl fmt::Debug for ClassBlueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassBlueprint")
         .field("reflection", &self.reflection)
         .field("has_constructor", &self.construct.is_some())
         .finish()
    }
}

/// Contrato de la fábrica consumido por el motor.
pub trait InstanceFactory: Send + Sync + fmt::Debug {
    /// Instancia `class`. Con `args`, fuerza la construcción con ellos.
    fn instantiate(&self, class: &str, args: Option<&[Value]>) -> Result<Box<dyn Hydratable>, ConstructionError>;

    fn reflection(&self, class: &str) -> Result<Arc<ClassReflection>, ConstructionError>;
}

#[derive(Debug, Default)]
pub struct Instantiator {
    blueprints: DashMap<String, ClassBlueprint>,
    templates: DashMap<String, Box<dyn Hydratable>>,
}

impl Instantiator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra una clase `HydratableClass` sin métodos declarados.
    pub fn register<T: HydratableClass>(&self) -> &Self {
        self.register_blueprint(ClassBlueprint::of::<T>())
    }

    /// Registra (o reemplaza) un blueprint; invalida la plantilla cacheada.
    pub fn register_blueprint(&self, blueprint: ClassBlueprint) -> &Self {
        let class = blueprint.reflection.class.clone();
        self.templates.remove(&class);
        self.blueprints.insert(class, blueprint);
        self
    }

    pub fn cached_templates(&self) -> usize {
        self.templates.len()
    }

    fn blueprint(&self, class: &str) -> Result<ClassBlueprint, ConstructionError> {
        self.blueprints
            .get(class)
            .map(|b| b.value().clone())
            .ok_or_else(|| ConstructionError::UnknownClass(class.to_string()))
    }
}

impl InstanceFactory for Instantiator {
    fn instantiate(&self, class: &str, args: Option<&[Value]>) -> Result<Box<dyn Hydratable>, ConstructionError> {
        if let Some(args) = args {
            let blueprint = self.blueprint(class)?;
            let construct = blueprint.construct
                                     .as_ref()
                                     .ok_or_else(|| ConstructionError::NoConstructor(class.to_string()))?;
            return construct(args);
        }
        if let Some(template) = self.templates.get(class) {
            return Ok(template.clone_boxed());
        }
        let blueprint = self.blueprint(class)?;
        let template = (blueprint.blank)();
        let instance = template.clone_boxed();
        debug!("instantiator template cached: class={class}");
        self.templates.insert(class.to_string(), template);
        Ok(instance)
    }

    fn reflection(&self, class: &str) -> Result<Arc<ClassReflection>, ConstructionError> {
        self.blueprints
            .get(class)
            .map(|b| Arc::clone(&b.reflection))
            .ok_or_else(|| ConstructionError::UnknownClass(class.to_string()))
    }
}
