//! Pantalla de inicio tras onboarding: lee lo guardado en sesión.

use flow_domain::Contact;
use flow_session::{is_phone_verified, load_selected_contact, user_phone, SessionStore};
use serde::Serialize;

pub const DEFAULT_DESTINATION_COUNTRY: &str = "Nigeria";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingHome {
    pub contact: Option<Contact>,
    pub destination_country: String,
    pub phone_verified: bool,
    pub user_phone: Option<String>,
}

impl OnboardingHome {
    /// Un `selectedContact` corrupto se trata como ausente.
    pub fn mount<S: SessionStore + ?Sized>(store: &S) -> Self {
        let contact = load_selected_contact(store);
        let destination_country = contact.as_ref()
                                         .map(|c| c.country.clone())
                                         .unwrap_or_else(|| DEFAULT_DESTINATION_COUNTRY.to_string());
        Self { contact,
               destination_country,
               phone_verified: is_phone_verified(store),
               user_phone: user_phone(store) }
    }

    pub fn headline(&self) -> String {
        format!("Get started with 7 days of free unlimited calls to {}", self.destination_country)
    }
}
