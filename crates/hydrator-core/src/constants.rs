//! Constantes del motor de hidratación.
//!
//! Agrupa los nombres "sentinela" compartidos entre registros, resolvers y
//! casters. Cambiarlos rompe la compatibilidad con metadata ya construida
//! (por ejemplo los atributos `source_name` / `extract_name`).

/// Perfil usado cuando el caller no indica ninguno y como fallback de todos
/// los registros (casters, resolvers, hooks).
pub const DEFAULT_PROFILE: &str = "_default";

/// Atributo de `PropertyMetadata::attrs` con la ruta de lectura explícita.
pub const SOURCE_NAME_ATTR: &str = "source_name";

/// Atributo de `PropertyMetadata::attrs` con la ruta de escritura explícita.
pub const EXTRACT_NAME_ATTR: &str = "extract_name";

/// Separador de rutas anidadas (`parent.child.leaf`).
pub const PATH_SEPARATOR: char = '.';

/// Profundidad máxima de recursión por defecto.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Formato por defecto (strftime de chrono) para timestamps: ISO-8601 con offset.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";
