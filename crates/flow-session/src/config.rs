//! Carga de configuración del store desde variables de entorno.
//! Usa `STEPFLOW_SESSION_MAX_ENTRIES` (0 = sin límite).

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionConfig {
    /// Máximo de claves distintas; `None` = sin límite.
    pub max_entries: Option<usize>,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let max_entries = env::var("STEPFLOW_SESSION_MAX_ENTRIES").ok()
                                                                  .and_then(|v| v.parse::<usize>().ok())
                                                                  .filter(|n| *n > 0);
        Self { max_entries }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
