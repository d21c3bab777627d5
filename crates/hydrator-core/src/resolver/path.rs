//! Lectura y escritura por rutas anidadas sobre mapas JSON.

use log::warn;
use serde_json::{Map, Value};

/// Resultado de buscar una ruta.
#[derive(Debug, PartialEq)]
pub enum PathLookup<'d, 'p> {
    Found(&'d Value),
    /// Falta la clave final.
    Missing,
    /// Falta (o no es un mapa) el segmento intermedio indicado.
    MissingSegment(&'p str),
}

impl<'d> PathLookup<'d, '_> {
    /// `null` cuenta como ausente.
    pub fn value(self) -> Option<&'d Value> {
        match self {
            PathLookup::Found(Value::Null) => None,
            PathLookup::Found(v) => Some(v),
            _ => None,
        }
    }
}

/// Recorre `data` segmento a segmento. Una ruta sin separador es una
/// búsqueda directa.
pub fn lookup_path<'d, 'p>(data: &'d Map<String, Value>, path: &'p str, separator: char) -> PathLookup<'d, 'p> {
    let mut segments = path.split(separator).peekable();
    let mut current = data;
    while let Some(segment) = segments.next() {
        let Some(value) = current.get(segment) else {
            if segments.peek().is_some() {
                warn!("path '{path}' stops at missing segment '{segment}'");
                return PathLookup::MissingSegment(segment);
            }
            return PathLookup::Missing;
        };
        if segments.peek().is_none() {
            return PathLookup::Found(value);
        }
        match value {
            Value::Object(next) => current = next,
            _ => {
                warn!("path '{path}' stops at non-map segment '{segment}'");
                return PathLookup::MissingSegment(segment);
            }
        }
    }
    PathLookup::Missing
}

/// Escribe `value` en `path`, creando mapas intermedios y fusionándose con
/// los ya existentes. Un intermedio que no sea mapa se reemplaza.
pub fn insert_path(target: &mut Map<String, Value>, path: &str, separator: char, value: Value) {
    let mut segments: Vec<&str> = path.split(separator).collect();
    let Some(last) = segments.pop() else {
        return;
    };
    let mut current = target;
    for segment in segments {
        let slot = current.entry(segment.to_string()).or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = match slot {
            Value::Object(next) => next,
            _ => return,
        };
    }
    current.insert(last.to_string(), value);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use serde_json::json;

    static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

    struct WarningRecorder;

    impl Log for WarningRecorder {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                WARNINGS.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static RECORDER: WarningRecorder = WarningRecorder;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn lookup_walks_nested_maps() {
        let data = obj(json!({"parent": {"child": {"grandchild": "v"}}}));
        assert_eq!(lookup_path(&data, "parent.child.grandchild", '.'), PathLookup::Found(&json!("v")));
        assert_eq!(lookup_path(&data, "parent.missing.grandchild", '.'), PathLookup::MissingSegment("missing"));
        assert_eq!(lookup_path(&data, "parent.child.other", '.'), PathLookup::Missing);
        assert_eq!(lookup_path(&data, "parent.child.grandchild.deeper", '.'), PathLookup::MissingSegment("grandchild"));
    }

    #[test]
    fn both_kinds_of_broken_intermediate_are_logged() {
        log::set_logger(&RECORDER).ok();
        log::set_max_level(LevelFilter::Warn);
        let data = obj(json!({"scalar": 3, "nested": {}}));

        assert_eq!(lookup_path(&data, "scalar.inner", '.'), PathLookup::MissingSegment("scalar"));
        assert_eq!(lookup_path(&data, "nested.gone.leaf", '.'), PathLookup::MissingSegment("gone"));

        let warnings = WARNINGS.lock().unwrap();
        assert!(warnings.iter().any(|w| w == "path 'scalar.inner' stops at non-map segment 'scalar'"), "{warnings:?}");
        assert!(warnings.iter().any(|w| w == "path 'nested.gone.leaf' stops at missing segment 'gone'"), "{warnings:?}");
    }

    #[test]
    fn null_is_absent() {
        let data = obj(json!({"a": null}));
        assert_eq!(lookup_path(&data, "a", '.').value(), None);
    }

    #[test]
    fn insert_creates_and_merges_intermediates() {
        let mut out = Map::new();
        insert_path(&mut out, "a.b.c", '.', json!("v"));
        insert_path(&mut out, "a.b.d", '.', json!(1));
        insert_path(&mut out, "a.e", '.', json!(true));
        assert_eq!(Value::Object(out), json!({"a": {"b": {"c": "v", "d": 1}, "e": true}}));
    }

    #[test]
    fn insert_replaces_scalar_intermediate() {
        let mut out = obj(json!({"a": 5}));
        insert_path(&mut out, "a.b", '.', json!("x"));
        assert_eq!(Value::Object(out), json!({"a": {"b": "x"}}));
    }
}
