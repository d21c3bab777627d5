//! Configuración del motor.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`CONFIG`) con los valores por defecto de cada `Hydrator`.
use once_cell::sync::Lazy;
use std::env;

use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_PROFILE, PATH_SEPARATOR};

/// Parámetros del motor de hidratación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydratorConfig {
    /// Perfil aplicado cuando el caller no indica ninguno.
    pub default_profile: String,
    /// Profundidad máxima de anidamiento antes de abortar.
    pub max_depth: usize,
    /// Separador de rutas anidadas en claves de origen/destino.
    pub path_separator: char,
}

impl Default for HydratorConfig {
    fn default() -> Self {
        Self { default_profile: DEFAULT_PROFILE.to_string(),
               max_depth: DEFAULT_MAX_DEPTH,
               path_separator: PATH_SEPARATOR }
    }
}

impl HydratorConfig {
    /// Lee `HYDRATOR_DEFAULT_PROFILE`, `HYDRATOR_MAX_DEPTH` y
    /// `HYDRATOR_PATH_SEPARATOR`; los valores ausentes o inválidos conservan
    /// el default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        let default_profile = lookup("HYDRATOR_DEFAULT_PROFILE").filter(|p| !p.trim().is_empty())
                                                                .unwrap_or(defaults.default_profile);
        let max_depth = lookup("HYDRATOR_MAX_DEPTH").and_then(|v| v.trim().parse().ok())
                                                    .filter(|d: &usize| *d > 0)
                                                    .unwrap_or(defaults.max_depth);
        let path_separator = lookup("HYDRATOR_PATH_SEPARATOR").and_then(|v| {
                                                                  let mut chars = v.chars();
                                                                  match (chars.next(), chars.next()) {
                                                                      (Some(c), None) => Some(c),
                                                                      _ => None,
                                                                  }
                                                              })
                                                              .unwrap_or(defaults.path_separator);
        Self { default_profile,
               max_depth,
               path_separator }
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<HydratorConfig> = Lazy::new(HydratorConfig::from_env);
