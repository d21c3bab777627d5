//! Resolver basado en atributos de la metadata (`source_name` / `extract_name`).

use serde_json::{Map, Value};

use super::PropertyPathResolver;
use crate::constants::{EXTRACT_NAME_ATTR, SOURCE_NAME_ATTR};
use crate::metadata::PropertyMetadata;
use crate::model::Hydratable;

#[derive(Debug, Clone, Default)]
pub struct PathNameValueResolver {
    profile: Option<String>,
}

impl PathNameValueResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mismo resolver registrado bajo un perfil concreto.
    pub fn for_profile(profile: impl Into<String>) -> Self {
        Self { profile: Some(profile.into()) }
    }
}

impl PropertyPathResolver for PathNameValueResolver {
    fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    fn supports(&self, property: &PropertyMetadata) -> bool {
        property.attr_str(SOURCE_NAME_ATTR).is_some()
    }

    fn supports_extraction(&self, property: &PropertyMetadata) -> bool {
        property.attr_str(EXTRACT_NAME_ATTR).is_some()
    }

    fn resolve_source(&self, property: &PropertyMetadata, _data: &Map<String, Value>) -> String {
        property.attr_str(SOURCE_NAME_ATTR).unwrap_or(&property.name).to_string()
    }

    fn resolve_target(&self, property: &PropertyMetadata, _instance: &dyn Hydratable) -> String {
        property.attr_str(EXTRACT_NAME_ATTR).unwrap_or(&property.name).to_string()
    }
}
