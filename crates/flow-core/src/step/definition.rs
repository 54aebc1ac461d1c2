use std::fmt;

use serde::{Deserialize, Serialize};

/// Identificador de un step dentro del flujo (numeración desde 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub u32);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Paso que requiere entrada del usuario antes de avanzar.
    Input,
    /// Paso terminal: la acción primaria hace commit en lugar de avanzar.
    Review,
}

/// Trait que define un Step. El predicado de validez debe ser puro respecto
/// a las selecciones actuales.
pub trait StepDefinition<S>: fmt::Debug {
    /// Identificador estable y único dentro del Flow.
    fn id(&self) -> StepId;

    /// Etiqueta para indicadores de progreso.
    fn label(&self) -> &str;

    /// Tipo general del step.
    fn kind(&self) -> StepKind {
        StepKind::Input
    }

    /// `true` si las selecciones permiten salir de este paso hacia adelante.
    fn is_valid(&self, selections: &S) -> bool;
}

/// Step declarativo: id + label + predicado.
pub struct PredicateStep<S> {
    id: StepId,
    label: &'static str,
    kind: StepKind,
    predicate: fn(&S) -> bool,
}

impl<S> PredicateStep<S> {
    pub fn input(id: u32, label: &'static str, predicate: fn(&S) -> bool) -> Self {
        Self { id: StepId(id),
               label,
               kind: StepKind::Input,
               predicate }
    }

    /// Paso terminal; siempre válido (no requiere más entrada antes de la acción primaria).
    pub fn review(id: u32, label: &'static str) -> Self {
        Self { id: StepId(id),
               label,
               kind: StepKind::Review,
               predicate: |_| true }
    }
}

impl<S> fmt::Debug for PredicateStep<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateStep")
         .field("id", &self.id)
         .field("label", &self.label)
         .field("kind", &self.kind)
         .finish()
    }
}

impl<S> StepDefinition<S> for PredicateStep<S> {
    fn id(&self) -> StepId {
        self.id
    }

    fn label(&self) -> &str {
        self.label
    }

    fn kind(&self) -> StepKind {
        self.kind
    }

    fn is_valid(&self, selections: &S) -> bool {
        (self.predicate)(selections)
    }
}

/// Vista inmutable `{id, label}` expuesta por el registro de steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepView {
    pub id: StepId,
    pub label: String,
}
