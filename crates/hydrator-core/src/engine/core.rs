//! Core Hydrator implementation

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use log::{debug, trace};
use serde_json::{Map, Value};

use super::context::MappingContext;
use super::plan::{ClassPlan, PropertyAccessor};
use crate::cast::{CastRegistry, TypeCastStrategy};
use crate::config::{HydratorConfig, CONFIG};
use crate::constants::DEFAULT_PROFILE;
use crate::errors::{CastError, HydrationError, MappingError};
use crate::hook::{HookDecision, HydratorHook};
use crate::instantiator::InstanceFactory;
use crate::metadata::{ClassMetadata, MetadataProvider, PropertyMetadata};
use crate::model::{Hydratable, HydratableClass, PropertyValue};
use crate::naming::{NamingStrategy, UnderscoreNamingStrategy};
use crate::resolver::{insert_path, lookup_path, PathNameValueResolver, PropertyPathResolver};

/// Motor de hidratación/extracción.
///
/// Compone proveedor de metadata, fábrica de instancias, estrategia de
/// nombres, casters, resolvers de rutas y hooks. Se configura una vez y
/// después sólo se usa por referencia compartida: `hydrate` y `extract` no
/// mutan el motor (salvo la cache de planes por clase).
#[derive(Debug)]
pub struct Hydrator {
    provider: Arc<dyn MetadataProvider>,
    factory: Arc<dyn InstanceFactory>,
    naming: Arc<dyn NamingStrategy>,
    casters: CastRegistry,
    resolvers: HashMap<String, Arc<dyn PropertyPathResolver>>,
    hooks: HashMap<String, Arc<dyn HydratorHook>>,
    plans: DashMap<String, Arc<ClassPlan>>,
    config: HydratorConfig,
}

impl Hydrator {
    /// Motor con los componentes por defecto: nombres `snake_case`, casters
    /// plano y fecha/hora, resolver por atributos y la configuración global.
    pub fn new(provider: Arc<dyn MetadataProvider>, factory: Arc<dyn InstanceFactory>) -> Self {
        let mut hydrator = Self { provider,
                                  factory,
                                  naming: Arc::new(UnderscoreNamingStrategy::new()),
                                  casters: CastRegistry::with_defaults(),
                                  resolvers: HashMap::new(),
                                  hooks: HashMap::new(),
                                  plans: DashMap::new(),
                                  config: CONFIG.clone() };
        hydrator.add_property_resolver(Arc::new(PathNameValueResolver::new()));
        hydrator
    }

    /// Builder para configurar el motor de forma encadenada.
    pub fn builder(provider: Arc<dyn MetadataProvider>, factory: Arc<dyn InstanceFactory>) -> super::HydratorBuilder {
        super::HydratorBuilder::new(provider, factory)
    }

    pub fn config(&self) -> &HydratorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: HydratorConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Reemplaza la estrategia de nombres; invalida los planes cacheados.
    pub fn with_naming_strategy(&mut self, naming: Arc<dyn NamingStrategy>) -> &mut Self {
        self.naming = naming;
        self.plans.clear();
        self
    }

    /// Registra un caster en su perfil. Dentro de un perfil gana el último.
    pub fn add_type_cast_strategy(&mut self, caster: Arc<dyn TypeCastStrategy>) -> &mut Self {
        self.casters.add(caster);
        self
    }

    /// Registra el resolver de su perfil (reemplaza al anterior).
    pub fn add_property_resolver(&mut self, resolver: Arc<dyn PropertyPathResolver>) -> &mut Self {
        let profile = resolver.profile().unwrap_or(DEFAULT_PROFILE).to_string();
        self.resolvers.insert(profile, resolver);
        self
    }

    /// Registra el hook de su perfil (reemplaza al anterior).
    pub fn attach_hook(&mut self, hook: Arc<dyn HydratorHook>) -> &mut Self {
        let profile = hook.profile().unwrap_or(DEFAULT_PROFILE).to_string();
        self.hooks.insert(profile, hook);
        self
    }

    /// Hook activo para `profile`, con fallback al perfil por defecto.
    pub fn hook_for(&self, profile: &str) -> Option<&Arc<dyn HydratorHook>> {
        self.hooks.get(profile).or_else(|| self.hooks.get(DEFAULT_PROFILE))
    }

    /// Resolver activo para `profile`, con fallback al perfil por defecto.
    pub fn resolver_for(&self, profile: &str) -> Option<&Arc<dyn PropertyPathResolver>> {
        self.resolvers.get(profile).or_else(|| self.resolvers.get(DEFAULT_PROFILE))
    }

    pub fn class_metadata(&self, class: &str) -> Result<Arc<ClassMetadata>, HydrationError> {
        self.plan(class).map(|plan| Arc::clone(&plan.metadata))
    }

    /// Construye una instancia de `class` a partir de `data`.
    pub fn hydrate(&self,
                   data: &Map<String, Value>,
                   class: &str,
                   profile: Option<&str>)
                   -> Result<Box<dyn Hydratable>, HydrationError> {
        let ctx = MappingContext::new(profile.unwrap_or(self.config.default_profile.as_str()));
        debug!("hydrate class={} profile={}", class, ctx.profile());
        self.hydrate_in(data, class, ctx)
    }

    /// Igual que `hydrate` pero acepta cualquier JSON; sólo los objetos son válidos.
    pub fn hydrate_value(&self,
                         data: &Value,
                         class: &str,
                         profile: Option<&str>)
                         -> Result<Box<dyn Hydratable>, HydrationError> {
        match data {
            Value::Object(map) => self.hydrate(map, class, profile),
            other => Err(CastError::incompatible("object", PropertyValue::from(other).kind()).into()),
        }
    }

    /// Hidrata y devuelve el tipo concreto.
    pub fn hydrate_as<T: HydratableClass>(&self, data: &Map<String, Value>, profile: Option<&str>) -> Result<T, HydrationError> {
        let instance = self.hydrate(data, T::CLASS_NAME, profile)?;
        Ok(*instance.downcast::<T>()?)
    }

    /// Proyecta `instance` a un mapa plano/anidado.
    pub fn extract(&self, instance: &dyn Hydratable, profile: Option<&str>) -> Result<Map<String, Value>, HydrationError> {
        let ctx = MappingContext::new(profile.unwrap_or(self.config.default_profile.as_str()));
        debug!("extract class={} profile={}", instance.class_name(), ctx.profile());
        self.extract_in(instance, ctx)
    }

    fn plan(&self, class: &str) -> Result<Arc<ClassPlan>, HydrationError> {
        if let Some(plan) = self.plans.get(class) {
            return Ok(Arc::clone(plan.value()));
        }
        let reflection = self.factory.reflection(class)?;
        let metadata = self.provider.class_metadata(&reflection)?;
        let plan = Arc::new(ClassPlan::build(metadata, &reflection, self.naming.as_ref()));
        self.plans.insert(class.to_string(), Arc::clone(&plan));
        Ok(plan)
    }

    fn guard_depth(&self, class: &str, ctx: MappingContext<'_>) -> Result<(), HydrationError> {
        if ctx.depth() >= self.config.max_depth {
            return Err(HydrationError::DepthExceeded { class: class.to_string(),
                                                       max: self.config.max_depth });
        }
        Ok(())
    }

    fn hydrate_in(&self,
                  data: &Map<String, Value>,
                  class: &str,
                  ctx: MappingContext<'_>)
                  -> Result<Box<dyn Hydratable>, HydrationError> {
        self.guard_depth(class, ctx)?;
        let plan = self.plan(class)?;
        let metadata = plan.metadata.as_ref();
        let hook = self.hook_for(ctx.profile());
        if let Some(hook) = hook {
            hook.on_before_hydrate(metadata, data);
        }
        let mut instance = self.factory.instantiate(class, None)?;

        for (property, accessor) in plan.properties() {
            let overridden = hook.and_then(|h| h.on_property_hydrate(metadata, property, data).into_override());
            let raw = match overridden.as_ref() {
                Some(value) => Some(value).filter(|v| !v.is_null()),
                None => self.locate_source(property, data, ctx),
            };
            match raw {
                None => {
                    trace!("hydrate {}::{} absent", metadata.name, property.name);
                    if property.ty.is_nullable {
                        self.write_property(metadata, property, accessor, instance.as_mut(), PropertyValue::Null)?;
                    }
                }
                Some(raw) => {
                    trace!("hydrate {}::{} <- {}", metadata.name, property.name, raw);
                    let value = self.map_property(property, raw, ctx)?;
                    self.write_property(metadata, property, accessor, instance.as_mut(), value)?;
                }
            }
        }

        if let Some(hook) = hook {
            hook.on_after_hydrate(metadata, instance.as_mut());
        }
        Ok(instance)
    }

    /// Valor de entrada para `property`: ruta explícita del resolver si la
    /// hay; si no, el nombre declarado y después el nombre traducido.
    fn locate_source<'d>(&self,
                         property: &PropertyMetadata,
                         data: &'d Map<String, Value>,
                         ctx: MappingContext<'_>)
                         -> Option<&'d Value> {
        if let Some(resolver) = self.resolver_for(ctx.profile()).filter(|r| r.supports(property)) {
            let path = resolver.resolve_source(property, data);
            return lookup_path(data, &path, self.config.path_separator).value();
        }
        data.get(&property.name)
            .filter(|v| !v.is_null())
            .or_else(|| data.get(&self.naming.translate(property)).filter(|v| !v.is_null()))
    }

    /// Convierte el dato crudo según el tipo de la propiedad.
    fn map_property(&self, property: &PropertyMetadata, raw: &Value, ctx: MappingContext<'_>) -> Result<PropertyValue, HydrationError> {
        let ty = &property.ty;
        if let Some(caster) = self.casters.find(ctx.profile(), ty) {
            return Ok(caster.hydrate(ty, raw)?);
        }
        if ty.is_flat {
            return Ok(PropertyValue::from(raw));
        }
        match raw {
            Value::Object(map) if !ty.is_array => Ok(PropertyValue::Object(self.hydrate_in(map, &ty.name, ctx.nested())?)),
            Value::Array(items) if ty.is_array => {
                let hydrated = items.iter()
                                    .map(|item| self.hydrate_element(item, &ty.name, ctx))
                                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PropertyValue::List(hydrated))
            }
            Value::Object(map) if ty.is_array => {
                let mut hydrated = indexmap::IndexMap::with_capacity(map.len());
                for (key, item) in map {
                    hydrated.insert(key.clone(), self.hydrate_element(item, &ty.name, ctx)?);
                }
                Ok(PropertyValue::Record(hydrated))
            }
            other => Ok(PropertyValue::from(other)),
        }
    }

    fn hydrate_element(&self, item: &Value, class: &str, ctx: MappingContext<'_>) -> Result<PropertyValue, HydrationError> {
        match item {
            Value::Object(map) => Ok(PropertyValue::Object(self.hydrate_in(map, class, ctx.nested())?)),
            Value::Null => Ok(PropertyValue::Null),
            other => Err(CastError::incompatible(class, PropertyValue::from(other).kind()).into()),
        }
    }

    fn write_property(&self,
                      metadata: &ClassMetadata,
                      property: &PropertyMetadata,
                      accessor: &PropertyAccessor,
                      instance: &mut dyn Hydratable,
                      value: PropertyValue)
                      -> Result<(), HydrationError> {
        let outcome = match accessor {
            PropertyAccessor::DirectField => instance.write_field(&property.name, value),
            PropertyAccessor::Accessors { setter: Some(setter), .. } => instance.call_setter(setter, value),
            PropertyAccessor::Accessors { setter: None, .. } => None,
        };
        match outcome {
            Some(result) => Ok(result?),
            None => Err(MappingError::write(&metadata.name, &property.name).into()),
        }
    }

    fn read_property(&self,
                     metadata: &ClassMetadata,
                     property: &PropertyMetadata,
                     accessor: &PropertyAccessor,
                     instance: &dyn Hydratable)
                     -> Result<PropertyValue, HydrationError> {
        let value = match accessor {
            PropertyAccessor::DirectField => instance.read_field(&property.name),
            PropertyAccessor::Accessors { getter: Some(getter), .. } => instance.call_getter(getter),
            PropertyAccessor::Accessors { getter: None, .. } => None,
        };
        value.ok_or_else(|| MappingError::read(&metadata.name, &property.name).into())
    }

    fn extract_in(&self, instance: &dyn Hydratable, ctx: MappingContext<'_>) -> Result<Map<String, Value>, HydrationError> {
        let class = instance.class_name();
        self.guard_depth(class, ctx)?;
        let plan = self.plan(class)?;
        let metadata = plan.metadata.as_ref();
        let hook = self.hook_for(ctx.profile());
        if let Some(hook) = hook {
            hook.on_before_extract(metadata, instance);
        }

        let mut result = Map::new();
        for (property, accessor) in plan.properties() {
            let current = self.read_property(metadata, property, accessor, instance)?;
            let ty = &property.ty;
            let value = if let Some(caster) = self.casters.find(ctx.profile(), ty) {
                caster.extract(ty, &current)?
            } else if ty.is_flat || ty.is_array {
                self.project(&current, ctx)?
            } else {
                match &current {
                    PropertyValue::Null => Value::Null,
                    PropertyValue::Object(nested) => Value::Object(self.extract_in(nested.as_ref(), ctx.nested())?),
                    other => self.project(other, ctx)?,
                }
            };
            self.write_extracted(&mut result, value, metadata, property, instance, hook, ctx);
        }

        if let Some(hook) = hook {
            hook.on_after_extract(metadata, &result);
        }
        Ok(result)
    }

    /// Proyecta un valor a JSON extrayendo las instancias que contenga.
    fn project(&self, value: &PropertyValue, ctx: MappingContext<'_>) -> Result<Value, HydrationError> {
        Ok(match value {
            PropertyValue::Object(nested) => Value::Object(self.extract_in(nested.as_ref(), ctx.nested())?),
            PropertyValue::List(items) => {
                Value::Array(items.iter().map(|item| self.project(item, ctx)).collect::<Result<_, _>>()?)
            }
            PropertyValue::Record(fields) => {
                let mut out = Map::with_capacity(fields.len());
                for (key, item) in fields {
                    out.insert(key.clone(), self.project(item, ctx)?);
                }
                Value::Object(out)
            }
            scalar => scalar.to_json()?,
        })
    }

    /// Clave de salida: ruta explícita del resolver o nombre traducido.
    fn target_key(&self, property: &PropertyMetadata, instance: &dyn Hydratable, ctx: MappingContext<'_>) -> String {
        match self.resolver_for(ctx.profile()).filter(|r| r.supports_extraction(property)) {
            Some(resolver) => resolver.resolve_target(property, instance),
            None => self.naming.translate(property),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn write_extracted(&self,
                       result: &mut Map<String, Value>,
                       value: Value,
                       metadata: &ClassMetadata,
                       property: &PropertyMetadata,
                       instance: &dyn Hydratable,
                       hook: Option<&Arc<dyn HydratorHook>>,
                       ctx: MappingContext<'_>) {
        let key = self.target_key(property, instance, ctx);
        if !key.contains(self.config.path_separator) {
            result.insert(key, value);
            return;
        }
        insert_path(result, &key, self.config.path_separator, value);
        if let Some(hook) = hook {
            if let HookDecision::Override(replacement) = hook.on_property_extract(metadata, property, result) {
                *result = replacement;
            }
        }
    }
}
