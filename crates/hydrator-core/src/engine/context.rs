//! Contexto explícito de una llamada `hydrate`/`extract`.
//!
//! El perfil activo viaja como valor por toda la recursión en lugar de
//! guardarse en el motor, así dos llamadas concurrentes con perfiles
//! distintos no se pisan.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingContext<'a> {
    profile: &'a str,
    depth: usize,
}

impl<'a> MappingContext<'a> {
    pub fn new(profile: &'a str) -> Self {
        Self { profile, depth: 0 }
    }

    pub fn profile(&self) -> &'a str {
        self.profile
    }

    /// Nivel de anidamiento (0 = objeto raíz).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Contexto para un objeto anidado.
    pub fn nested(self) -> Self {
        Self { depth: self.depth + 1,
               ..self }
    }
}
