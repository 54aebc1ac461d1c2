//! Contrato del almacén de selecciones de un flujo.
//!
//! Cada instancia de flujo posee en exclusiva su bolsa de selecciones. Los
//! valores derivados nunca se almacenan: `derived()` se recalcula en cada
//! lectura a partir de las selecciones actuales.

use std::fmt::Debug;

use serde::Serialize;

/// Actualización etiquetada de un campo de selección.
pub trait SelectionField: Debug {
    /// Nombre estable del campo (se registra en el log de eventos).
    fn name(&self) -> &'static str;
}

pub trait SelectionStore: Clone + Debug + Serialize + 'static {
    type Field: SelectionField;
    type Derived: Clone + Debug + Serialize;

    /// Escribe un campo aplicando los resets en cascada de los campos
    /// dependientes. Devuelve `true` si alguna selección cambió.
    fn set_field(&mut self, field: Self::Field) -> bool;

    /// Valores derivados de las selecciones actuales.
    fn derived(&self) -> Self::Derived;
}
