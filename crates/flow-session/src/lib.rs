//! flow-session
//!
//! Almacén clave/valor con alcance de sesión. Es la única persistencia de
//! los flujos: el contacto elegido en onboarding y el estado de verificación
//! telefónica se guardan aquí para que otras pantallas los lean.
//!
//! Módulos:
//! - `store`: trait `SessionStore` e implementación en memoria.
//! - `keys`: claves fijas compartidas entre pantallas.
//! - `typed`: helpers JSON tipados (payload corrupto = ausente).
//! - `config`: límites del store desde variables de entorno (.env).

pub mod config;
pub mod error;
pub mod keys;
pub mod store;
pub mod typed;

pub use config::{init_dotenv, SessionConfig};
pub use error::SessionError;
pub use store::{InMemorySessionStore, SessionStore};
pub use typed::{is_phone_verified, load_json, load_selected_contact, mark_phone_verified, save_json,
                save_selected_contact, user_phone};
