//! Caster de timestamps (`DateTime`, `\DateTime`, `date_time`).
//!
//! El formato es un patrón strftime de chrono tomado de `TypeMetadata::format`
//! o, si falta, `DEFAULT_DATE_FORMAT`. Entradas enteras (número o texto tipo
//! `-?[1-9][0-9]*`) se interpretan como segundos Unix en UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::TypeCastStrategy;
use crate::constants::DEFAULT_DATE_FORMAT;
use crate::errors::CastError;
use crate::metadata::TypeMetadata;
use crate::model::PropertyValue;

const SUPPORTED_TYPES: &[&str] = &["DateTime", "\\DateTime", "date_time"];

#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeCastStrategy;

impl DateTimeCastStrategy {
    pub fn new() -> Self {
        Self
    }

    fn format<'a>(ty: &'a TypeMetadata) -> &'a str {
        ty.format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }

    fn parse(&self, ty: &TypeMetadata, value: &Value) -> Result<PropertyValue, CastError> {
        let text = match value {
            Value::Null => return Ok(PropertyValue::Null),
            Value::Number(n) => match n.as_i64() {
                Some(secs) => return from_epoch(secs),
                None => n.to_string(),
            },
            Value::String(s) => s.clone(),
            other => return Err(CastError::incompatible("timestamp text", PropertyValue::from(other).kind())),
        };
        if let Some(secs) = epoch_seconds(&text) {
            return from_epoch(secs);
        }
        parse_with_format(&text, Self::format(ty)).map(PropertyValue::DateTime)
    }

    fn render(&self, ty: &TypeMetadata, value: &PropertyValue) -> Value {
        match value {
            PropertyValue::DateTime(dt) => Value::String(dt.format(Self::format(ty)).to_string()),
            _ => Value::Null,
        }
    }
}

impl TypeCastStrategy for DateTimeCastStrategy {
    fn supports(&self, ty: &TypeMetadata) -> bool {
        SUPPORTED_TYPES.contains(&ty.name.as_str())
    }

    fn hydrate(&self, ty: &TypeMetadata, value: &Value) -> Result<PropertyValue, CastError> {
        match value {
            Value::Array(items) if ty.is_array => {
                items.iter().map(|v| self.parse(ty, v)).collect::<Result<_, _>>().map(PropertyValue::List)
            }
            other => self.parse(ty, other),
        }
    }

    fn extract(&self, ty: &TypeMetadata, value: &PropertyValue) -> Result<Value, CastError> {
        Ok(match value {
            PropertyValue::List(items) if ty.is_array => Value::Array(items.iter().map(|v| self.render(ty, v)).collect()),
            other => self.render(ty, other),
        })
    }
}

/// Entero decimal sin ceros a la izquierda.
static EPOCH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?(0|[1-9][0-9]*)$").expect("epoch pattern"));

fn epoch_seconds(text: &str) -> Option<i64> {
    let t = text.trim();
    if !EPOCH.is_match(t) {
        return None;
    }
    t.parse::<i64>().ok()
}

fn from_epoch(secs: i64) -> Result<PropertyValue, CastError> {
    Utc.timestamp_opt(secs, 0)
       .single()
       .map(|dt| PropertyValue::DateTime(dt.fixed_offset()))
       .ok_or_else(|| CastError::InvalidDate { input: secs.to_string(),
                                               format: "unix epoch".into() })
}

/// Con offset si el patrón lo trae; si no, fecha-hora o fecha en UTC.
fn parse_with_format(text: &str, format: &str) -> Result<DateTime<FixedOffset>, CastError> {
    if let Ok(dt) = DateTime::parse_from_str(text, format) {
        return Ok(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
        return Ok(naive.and_utc().fixed_offset());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, format) {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    Err(CastError::InvalidDate { input: text.to_string(),
                                 format: format.to_string() })
}
