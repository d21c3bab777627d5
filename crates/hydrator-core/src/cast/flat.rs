//! Caster de tipos planos (string / int / float / bool) y de los tags
//! genéricos `object`, `array` y `mixed`.
//!
//! Hidratar y extraer aplican la misma coerción: el caster es su propio
//! inverso.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::TypeCastStrategy;
use crate::errors::CastError;
use crate::metadata::TypeMetadata;
use crate::model::PropertyValue;

const SUPPORTED_TYPES: &[&str] = &["string", "null", "NULL", "boolean", "bool", "integer", "int", "float", "double", "object",
                                   "array", "mixed"];

#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTypeCastStrategy;

impl FlatTypeCastStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Coerción completa según el tipo declarado. Un `null` en un tipo
    /// nullable se conserva.
    pub fn cast(&self, ty: &TypeMetadata, value: PropertyValue) -> PropertyValue {
        if ty.is_nullable && value.is_null() {
            return value;
        }
        if !ty.is_array {
            return flat_cast(&ty.name, value);
        }
        match (ty.name.as_str(), value) {
            ("object", v @ (PropertyValue::List(_) | PropertyValue::Record(_))) => object_cast(v),
            ("array" | "mixed", v @ (PropertyValue::List(_) | PropertyValue::Record(_))) => v,
            (tag, v @ (PropertyValue::List(_) | PropertyValue::Record(_))) => array_cast(tag, v),
            (tag, v) => flat_cast(tag, v),
        }
    }
}

impl TypeCastStrategy for FlatTypeCastStrategy {
    fn supports(&self, ty: &TypeMetadata) -> bool {
        SUPPORTED_TYPES.contains(&ty.name.as_str())
    }

    fn hydrate(&self, ty: &TypeMetadata, value: &Value) -> Result<PropertyValue, CastError> {
        Ok(self.cast(ty, PropertyValue::from(value)))
    }

    fn extract(&self, ty: &TypeMetadata, value: &PropertyValue) -> Result<Value, CastError> {
        self.cast(ty, value.clone()).to_json()
    }
}

fn array_cast(tag: &str, value: PropertyValue) -> PropertyValue {
    match value {
        PropertyValue::List(items) => PropertyValue::List(items.into_iter().map(|v| array_cast(tag, v)).collect()),
        PropertyValue::Record(fields) => PropertyValue::Record(fields.into_iter().map(|(k, v)| (k, array_cast(tag, v))).collect()),
        other => flat_cast(tag, other),
    }
}

/// Construye un registro con claves; las listas usan su índice como clave.
fn object_cast(value: PropertyValue) -> PropertyValue {
    let entries: Vec<(String, PropertyValue)> = match value {
        PropertyValue::List(items) => items.into_iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
        PropertyValue::Record(fields) => fields.into_iter().collect(),
        other => return other,
    };
    let record: IndexMap<String, PropertyValue> = entries.into_iter()
                                                         .map(|(k, v)| match v {
                                                             nested @ (PropertyValue::List(_) | PropertyValue::Record(_)) => (k, object_cast(nested)),
                                                             scalar => (k, scalar),
                                                         })
                                                         .collect();
    PropertyValue::Record(record)
}

/// Coerción de un escalar. Listas, registros y objetos se devuelven intactos.
fn flat_cast(tag: &str, value: PropertyValue) -> PropertyValue {
    if matches!(value, PropertyValue::List(_) | PropertyValue::Record(_) | PropertyValue::Object(_)) {
        return value;
    }
    match tag {
        "string" => PropertyValue::String(to_text(&value)),
        "int" | "integer" => PropertyValue::Int(to_int(&value)),
        "float" | "double" => PropertyValue::Float(to_float(&value)),
        "bool" | "boolean" => PropertyValue::Bool(to_bool(&value)),
        _ => value,
    }
}

fn to_text(value: &PropertyValue) -> String {
    match value {
        PropertyValue::String(s) => s.clone(),
        PropertyValue::Int(i) => i.to_string(),
        PropertyValue::Float(f) => float_text(*f),
        PropertyValue::Bool(true) => "1".to_string(),
        PropertyValue::Bool(false) | PropertyValue::Null => String::new(),
        PropertyValue::DateTime(dt) => dt.to_rfc3339(),
        _ => String::new(),
    }
}

/// Floats enteros sin parte decimal (`3.0` -> `"3"`).
fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

fn to_int(value: &PropertyValue) -> i64 {
    match value {
        PropertyValue::Int(i) => *i,
        PropertyValue::Float(f) => truncate(*f),
        PropertyValue::Bool(b) => i64::from(*b),
        PropertyValue::String(s) => {
            let t = s.trim();
            t.parse::<i64>().unwrap_or_else(|_| truncate(parse_float_prefix(t)))
        }
        PropertyValue::DateTime(dt) => dt.timestamp(),
        _ => 0,
    }
}

fn to_float(value: &PropertyValue) -> f64 {
    match value {
        PropertyValue::Float(f) => *f,
        PropertyValue::Int(i) => *i as f64,
        PropertyValue::Bool(b) => f64::from(u8::from(*b)),
        PropertyValue::String(s) => parse_float_prefix(s.trim()),
        PropertyValue::DateTime(dt) => dt.timestamp() as f64,
        _ => 0.0,
    }
}

/// Acepta `1/true/on/yes` (sin distinguir mayúsculas); todo lo demás es `false`.
fn to_bool(value: &PropertyValue) -> bool {
    match value {
        PropertyValue::Bool(b) => *b,
        other => matches!(to_text(other).trim().to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes"),
    }
}

fn truncate(f: f64) -> i64 {
    if f.is_finite() {
        f.trunc() as i64
    } else {
        0
    }
}

/// Prefijo numérico más largo (`"12.5kg"` -> 12.5); 0 si no hay ninguno.
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+(\.[0-9]*)?").expect("numeric prefix pattern"));

fn parse_float_prefix(s: &str) -> f64 {
    if let Ok(f) = s.parse::<f64>() {
        return f;
    }
    NUMERIC_PREFIX.find(s).and_then(|m| m.as_str().parse::<f64>().ok()).unwrap_or(0.0)
}
