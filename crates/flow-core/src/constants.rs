//! Constantes del motor core.
//!
//! `ENGINE_VERSION` participa en el fingerprint de cada commit, de modo que un
//! cambio incompatible en la semántica de transiciones produce fingerprints
//! distintos aunque las selecciones sean idénticas.

/// Versión lógica del motor de pasos. Mantener estable mientras no haya
/// cambios incompatibles en el orden o en los guards de transición.
pub const ENGINE_VERSION: &str = "S1.0";

/// Primer índice válido del cursor (los pasos se numeran desde 1).
pub const FIRST_STEP_INDEX: usize = 1;
