//! `UnderscoreNamingStrategy`: camelCase -> snake_case.
//!
//! Tokeniza en runs de alfanuméricos encabezados por mayúscula (acrónimos)
//! o por letra, baja a minúsculas los tokens totalmente en mayúscula y sólo
//! la inicial de los mixtos, y une con `_`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{lcfirst, ucfirst, NamingStrategy};
use crate::metadata::PropertyMetadata;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnderscoreNamingStrategy;

impl UnderscoreNamingStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Traduce un identificador arbitrario.
    pub fn underscore(name: &str) -> String {
        tokenize(name).into_iter()
                      .map(|t| if t == t.to_uppercase() { t.to_lowercase() } else { lcfirst(t) })
                      .collect::<Vec<_>>()
                      .join("_")
    }
}

impl NamingStrategy for UnderscoreNamingStrategy {
    fn translate(&self, property: &PropertyMetadata) -> String {
        Self::underscore(&property.name)
    }

    fn setter_name(&self, property: &PropertyMetadata) -> String {
        format!("set{}", ucfirst(&property.name))
    }

    fn getter_name(&self, property: &PropertyMetadata) -> String {
        if property.ty.is_boolean() {
            if has_is_prefix(&property.name) {
                return property.name.clone();
            }
            return format!("is{}", ucfirst(&property.name));
        }
        format!("get{}", ucfirst(&property.name))
    }
}

/// `isActive` ya tiene forma de getter booleano.
fn has_is_prefix(name: &str) -> bool {
    name.strip_prefix("is")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// Runs alfanuméricos ASCII; el resto de caracteres (`_`, `-`, ...) separa.
static RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9]*").expect("run pattern"));
static ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9]*").expect("acronym pattern"));
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][a-z0-9]*").expect("word pattern"));

/// Tokens en orden de aparición.
fn tokenize(name: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for run in RUN.find_iter(name) {
        let at_end = run.end() == name.len();
        let mut rest = run.as_str();
        while !rest.is_empty() {
            let end = acronym_len(rest, at_end).or_else(|| WORD.find(rest).map(|m| m.end()))
                                               .unwrap_or(rest.len());
            tokens.push(&rest[..end]);
            rest = &rest[end..];
        }
    }
    tokens
}

/// `[A-Z][A-Z0-9]*` seguido de fin de texto o de una palabra `[A-Z][a-z0-9]`.
/// Sin lookahead en `regex`: se ceden caracteres por la derecha hasta que la
/// condición se cumple.
fn acronym_len(rest: &str, at_end: bool) -> Option<usize> {
    let max = ACRONYM.find(rest)?.end();
    let bytes = rest.as_bytes();
    (1..=max).rev().find(|&end| {
                       if end == bytes.len() {
                           return at_end;
                       }
                       bytes[end].is_ascii_uppercase()
                       && bytes.get(end + 1).is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                   })
}
