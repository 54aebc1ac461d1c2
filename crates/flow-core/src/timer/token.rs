//! Tokens de fase.
//!
//! Cada entrada en una fase temporizada emite un token nuevo; un timer sólo
//! puede aplicar su efecto si lleva el token vigente. Salir de la fase (o
//! entrar en otra) deja obsoletos todos los tokens anteriores.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseToken(pub u64);

impl fmt::Display for PhaseToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default, Clone)]
pub struct TokenGate {
    current: u64,
}

impl TokenGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emite un token nuevo e invalida el anterior.
    pub fn issue(&mut self) -> PhaseToken {
        self.current += 1;
        PhaseToken(self.current)
    }

    /// Invalida el token vigente sin emitir uno utilizable.
    pub fn invalidate(&mut self) -> PhaseToken {
        let stale = PhaseToken(self.current);
        self.current += 1;
        stale
    }

    pub fn current(&self) -> PhaseToken {
        PhaseToken(self.current)
    }

    pub fn is_current(&self, token: PhaseToken) -> bool {
        token.0 == self.current
    }
}
