//! Valores tipados que el motor asigna/lee de las instancias.
//!
//! `PropertyValue` es la representación neutral entre el JSON de entrada y
//! los campos concretos de un struct. `PropertyType` convierte en ambos
//! sentidos hacia los tipos Rust de cada campo.

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use super::Hydratable;
use crate::errors::CastError;

/// Valor de una propiedad ya hidratada.
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<FixedOffset>),
    List(Vec<PropertyValue>),
    /// Registro genérico con claves (mapas anidados sin clase asociada).
    Record(IndexMap<String, PropertyValue>),
    /// Instancia anidada.
    Object(Box<dyn Hydratable>),
}

impl PropertyValue {
    /// Nombre corto del variant, usado en mensajes de error.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Null => "null",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Int(_) => "int",
            PropertyValue::Float(_) => "float",
            PropertyValue::String(_) => "string",
            PropertyValue::DateTime(_) => "datetime",
            PropertyValue::List(_) => "list",
            PropertyValue::Record(_) => "record",
            PropertyValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convierte a JSON un valor sin instancias anidadas. Las instancias las
    /// proyecta el motor (`Hydrator::extract`), no este método.
    pub fn to_json(&self) -> Result<Value, CastError> {
        Ok(match self {
            PropertyValue::Null => Value::Null,
            PropertyValue::Bool(b) => Value::Bool(*b),
            PropertyValue::Int(i) => Value::from(*i),
            PropertyValue::Float(f) => match Number::from_f64(*f) {
                Some(n) => Value::Number(n),
                None => return Err(CastError::incompatible("finite float", f.to_string())),
            },
            PropertyValue::String(s) => Value::String(s.clone()),
            PropertyValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
            PropertyValue::List(items) => Value::Array(items.iter().map(PropertyValue::to_json).collect::<Result<_, _>>()?),
            PropertyValue::Record(fields) => {
                let mut out = Map::with_capacity(fields.len());
                for (k, v) in fields {
                    out.insert(k.clone(), v.to_json()?);
                }
                Value::Object(out)
            }
            PropertyValue::Object(obj) => return Err(CastError::incompatible("flat value", obj.class_name())),
        })
    }
}

impl From<&Value> for PropertyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => PropertyValue::Null,
            Value::Bool(b) => PropertyValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => PropertyValue::Int(i),
                None => PropertyValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => PropertyValue::String(s.clone()),
            Value::Array(items) => PropertyValue::List(items.iter().map(PropertyValue::from).collect()),
            Value::Object(map) => PropertyValue::Record(map.iter().map(|(k, v)| (k.clone(), PropertyValue::from(v))).collect()),
        }
    }
}

impl Clone for PropertyValue {
    fn clone(&self) -> Self {
        match self {
            PropertyValue::Null => PropertyValue::Null,
            PropertyValue::Bool(b) => PropertyValue::Bool(*b),
            PropertyValue::Int(i) => PropertyValue::Int(*i),
            PropertyValue::Float(f) => PropertyValue::Float(*f),
            PropertyValue::String(s) => PropertyValue::String(s.clone()),
            PropertyValue::DateTime(dt) => PropertyValue::DateTime(*dt),
            PropertyValue::List(items) => PropertyValue::List(items.clone()),
            PropertyValue::Record(fields) => PropertyValue::Record(fields.clone()),
            PropertyValue::Object(obj) => PropertyValue::Object(obj.clone_boxed()),
        }
    }
}

impl fmt::Debug for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "Null"),
            PropertyValue::Bool(b) => write!(f, "Bool({b})"),
            PropertyValue::Int(i) => write!(f, "Int({i})"),
            PropertyValue::Float(x) => write!(f, "Float({x})"),
            PropertyValue::String(s) => write!(f, "String({s:?})"),
            PropertyValue::DateTime(dt) => write!(f, "DateTime({})", dt.to_rfc3339()),
            PropertyValue::List(items) => f.debug_tuple("List").field(items).finish(),
            PropertyValue::Record(fields) => f.debug_tuple("Record").field(fields).finish(),
            PropertyValue::Object(obj) => f.debug_tuple("Object").field(obj).finish(),
        }
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyValue::Null, PropertyValue::Null) => true,
            (PropertyValue::Bool(a), PropertyValue::Bool(b)) => a == b,
            (PropertyValue::Int(a), PropertyValue::Int(b)) => a == b,
            (PropertyValue::Float(a), PropertyValue::Float(b)) => a == b,
            (PropertyValue::String(a), PropertyValue::String(b)) => a == b,
            (PropertyValue::DateTime(a), PropertyValue::DateTime(b)) => a == b,
            (PropertyValue::List(a), PropertyValue::List(b)) => a == b,
            (PropertyValue::Record(a), PropertyValue::Record(b)) => a == b,
            (PropertyValue::Object(a), PropertyValue::Object(b)) => a.eq_dyn(b.as_ref()),
            _ => false,
        }
    }
}

/// Conversión entre `PropertyValue` y el tipo Rust de un campo.
pub trait PropertyType: Sized {
    fn from_property(value: PropertyValue) -> Result<Self, CastError>;
    fn to_property(&self) -> PropertyValue;
}

fn mismatch<T>(expected: &str, found: &PropertyValue) -> Result<T, CastError> {
    Err(CastError::incompatible(expected, found.kind()))
}

impl PropertyType for PropertyValue {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        Ok(value)
    }

    fn to_property(&self) -> PropertyValue {
        self.clone()
    }
}

impl PropertyType for String {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        match value {
            PropertyValue::String(s) => Ok(s),
            other => mismatch("string", &other),
        }
    }

    fn to_property(&self) -> PropertyValue {
        PropertyValue::String(self.clone())
    }
}

impl PropertyType for bool {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        match value {
            PropertyValue::Bool(b) => Ok(b),
            other => mismatch("bool", &other),
        }
    }

    fn to_property(&self) -> PropertyValue {
        PropertyValue::Bool(*self)
    }
}

impl PropertyType for i64 {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        match value {
            PropertyValue::Int(i) => Ok(i),
            PropertyValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(f as i64),
            other => mismatch("int", &other),
        }
    }

    fn to_property(&self) -> PropertyValue {
        PropertyValue::Int(*self)
    }
}

macro_rules! narrow_int_property {
    ($($ty:ty),+) => {
        $(
            impl PropertyType for $ty {
                fn from_property(value: PropertyValue) -> Result<Self, CastError> {
                    let wide = i64::from_property(value)?;
                    <$ty>::try_from(wide).map_err(|_| CastError::incompatible(stringify!($ty), wide.to_string()))
                }

                fn to_property(&self) -> PropertyValue {
                    PropertyValue::Int(*self as i64)
                }
            }
        )+
    };
}

narrow_int_property!(i32, u32, u8, i16, u16);

impl PropertyType for u64 {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        let wide = i64::from_property(value)?;
        u64::try_from(wide).map_err(|_| CastError::incompatible("u64", wide.to_string()))
    }

    fn to_property(&self) -> PropertyValue {
        match i64::try_from(*self) {
            Ok(i) => PropertyValue::Int(i),
            Err(_) => PropertyValue::Float(*self as f64),
        }
    }
}

impl PropertyType for f64 {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        match value {
            PropertyValue::Float(f) => Ok(f),
            PropertyValue::Int(i) => Ok(i as f64),
            other => mismatch("float", &other),
        }
    }

    fn to_property(&self) -> PropertyValue {
        PropertyValue::Float(*self)
    }
}

impl PropertyType for f32 {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        f64::from_property(value).map(|f| f as f32)
    }

    fn to_property(&self) -> PropertyValue {
        PropertyValue::Float(f64::from(*self))
    }
}

impl PropertyType for DateTime<FixedOffset> {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        match value {
            PropertyValue::DateTime(dt) => Ok(dt),
            other => mismatch("datetime", &other),
        }
    }

    fn to_property(&self) -> PropertyValue {
        PropertyValue::DateTime(*self)
    }
}

impl PropertyType for DateTime<Utc> {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        DateTime::<FixedOffset>::from_property(value).map(|dt| dt.with_timezone(&Utc))
    }

    fn to_property(&self) -> PropertyValue {
        PropertyValue::DateTime(self.fixed_offset())
    }
}

impl PropertyType for Value {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        value.to_json()
    }

    fn to_property(&self) -> PropertyValue {
        PropertyValue::from(self)
    }
}

impl<T: PropertyType> PropertyType for Option<T> {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        match value {
            PropertyValue::Null => Ok(None),
            other => T::from_property(other).map(Some),
        }
    }

    fn to_property(&self) -> PropertyValue {
        match self {
            Some(v) => v.to_property(),
            None => PropertyValue::Null,
        }
    }
}

impl<T: PropertyType> PropertyType for Box<T> {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        T::from_property(value).map(Box::new)
    }

    fn to_property(&self) -> PropertyValue {
        self.as_ref().to_property()
    }
}

impl<T: PropertyType> PropertyType for Vec<T> {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        match value {
            PropertyValue::List(items) => items.into_iter().map(T::from_property).collect(),
            // keyed sequences lose their keys when stored in a Vec
            PropertyValue::Record(fields) => fields.into_values().map(T::from_property).collect(),
            other => mismatch("list", &other),
        }
    }

    fn to_property(&self) -> PropertyValue {
        PropertyValue::List(self.iter().map(T::to_property).collect())
    }
}

impl<T: PropertyType> PropertyType for IndexMap<String, T> {
    fn from_property(value: PropertyValue) -> Result<Self, CastError> {
        match value {
            PropertyValue::Record(fields) => fields.into_iter()
                                                   .map(|(k, v)| T::from_property(v).map(|v| (k, v)))
                                                   .collect(),
            other => mismatch("record", &other),
        }
    }

    fn to_property(&self) -> PropertyValue {
        PropertyValue::Record(self.iter().map(|(k, v)| (k.clone(), v.to_property())).collect())
    }
}
