//! Claves fijas del almacén de sesión.

/// Contacto elegido durante onboarding (JSON de `Contact`).
pub const SELECTED_CONTACT: &str = "selectedContact";
/// `"true"` una vez verificado el teléfono.
pub const PHONE_VERIFIED: &str = "phoneVerified";
/// Teléfono verificado con prefijo, p.ej. `+1 5552345678`.
pub const USER_PHONE: &str = "userPhone";
