//! Destinatario de un pago.

use serde::{Deserialize, Serialize};

use crate::contacts::Contact;
use crate::countries::flag_for;
use crate::DomainError;

pub const MANUAL_RECIPIENT_ID: &str = "manual";
const MIN_NAME_CHARS: usize = 2;
const MIN_PHONE_CHARS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub country_flag: String,
    pub is_manual_entry: bool,
}

impl From<&Contact> for Recipient {
    fn from(c: &Contact) -> Self {
        Self { id: c.id.clone(),
               name: c.name.clone(),
               phone_number: c.phone_number.clone(),
               country_flag: c.flag.clone(),
               is_manual_entry: false }
    }
}

/// Borrador del formulario de destinatario manual.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualRecipientDraft {
    pub name: String,
    pub phone: String,
}

impl ManualRecipientDraft {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self { name: name.into(),
               phone: phone.into() }
    }

    pub fn is_valid(&self) -> bool {
        self.name.trim().chars().count() >= MIN_NAME_CHARS && self.phone.trim().chars().count() >= MIN_PHONE_CHARS
    }

    /// Convierte el borrador en un destinatario nigeriano manual.
    pub fn confirm(&self) -> Result<Recipient, DomainError> {
        if !self.is_valid() {
            return Err(DomainError::Validation(format!("manual recipient needs a name of {MIN_NAME_CHARS}+ chars and a phone of {MIN_PHONE_CHARS}+ chars")));
        }
        Ok(Recipient { id: MANUAL_RECIPIENT_ID.into(),
                       name: self.name.trim().into(),
                       phone_number: self.phone.trim().into(),
                       country_flag: flag_for("NG"),
                       is_manual_entry: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_manual_entry_is_rejected() {
        let draft = ManualRecipientDraft::new("A", "12345");
        assert!(!draft.is_valid());
        assert!(matches!(draft.confirm(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn manual_entry_is_trimmed_and_flagged() {
        let r = ManualRecipientDraft::new("  Ada ", " 0803123 ").confirm().expect("valid");
        assert_eq!(r.id, MANUAL_RECIPIENT_ID);
        assert_eq!(r.name, "Ada");
        assert_eq!(r.phone_number, "0803123");
        assert!(r.is_manual_entry);
        assert_eq!(r.country_flag, flag_for("NG"));
    }
}
