//! Selecciones del onboarding: contacto destino y verificación telefónica.

use flow_core::{SelectionField, SelectionStore};
use flow_domain::{default_verification_country, mask_phone, Contact, Country, MANUAL_RECIPIENT_ID, COUNTRIES};
use serde::Serialize;

pub const OTP_LENGTH: usize = 6;
const MIN_MANUAL_DIGITS: usize = 6;

#[derive(Debug, Clone)]
pub enum OnboardingField {
    /// Contacto de la lista; `Some` descarta el número manual.
    Contact(Option<Contact>),
    /// País del número manual.
    DestinationCountry(Country),
    ManualNumber(String),
    VerificationCountry(Country),
    PhoneNumber(String),
    Otp(String),
}

impl SelectionField for OnboardingField {
    fn name(&self) -> &'static str {
        match self {
            OnboardingField::Contact(_) => "contact",
            OnboardingField::DestinationCountry(_) => "destination_country",
            OnboardingField::ManualNumber(_) => "manual_number",
            OnboardingField::VerificationCountry(_) => "verification_country",
            OnboardingField::PhoneNumber(_) => "phone_number",
            OnboardingField::Otp(_) => "otp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingDerived {
    /// `"<dial> <number>"` del teléfono a verificar.
    pub user_phone: String,
    pub masked_phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingSelections {
    contact: Option<Contact>,
    destination_country: Country,
    manual_number: String,
    verification_country: Country,
    phone_number: String,
    otp: String,
}

impl Default for OnboardingSelections {
    fn default() -> Self {
        Self { contact: None,
               destination_country: COUNTRIES[0].clone(),
               manual_number: String::new(),
               verification_country: default_verification_country().clone(),
               phone_number: String::new(),
               otp: String::new() }
    }
}

impl OnboardingSelections {
    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    pub fn destination_country(&self) -> &Country {
        &self.destination_country
    }

    pub fn manual_number(&self) -> &str {
        &self.manual_number
    }

    pub fn verification_country(&self) -> &Country {
        &self.verification_country
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn otp(&self) -> &str {
        &self.otp
    }

    pub fn has_destination(&self) -> bool {
        self.contact.is_some() || self.manual_number.trim().chars().count() >= MIN_MANUAL_DIGITS
    }

    pub fn has_phone(&self) -> bool {
        !self.phone_number.trim().is_empty()
    }

    pub fn has_code(&self) -> bool {
        self.otp.chars().count() == OTP_LENGTH
    }

    /// Contacto a guardar al salir del paso Contact: el elegido o uno manual
    /// construido con el país destino.
    pub fn destination_contact(&self) -> Option<Contact> {
        if let Some(c) = &self.contact {
            return Some(c.clone());
        }
        if !self.has_destination() {
            return None;
        }
        let country = &self.destination_country;
        Some(Contact { id: MANUAL_RECIPIENT_ID.to_string(),
                       name: "Manual Entry".to_string(),
                       country: country.name.clone(),
                       country_code: country.code.clone(),
                       phone_number: format!("{} {}", country.dial_code, self.manual_number.trim()),
                       flag: country.flag.clone() })
    }
}

impl SelectionStore for OnboardingSelections {
    type Field = OnboardingField;
    type Derived = OnboardingDerived;

    fn set_field(&mut self, field: OnboardingField) -> bool {
        match field {
            OnboardingField::Contact(c) => {
                if self.contact == c {
                    return false;
                }
                if c.is_some() {
                    self.manual_number.clear();
                }
                self.contact = c;
                true
            }
            OnboardingField::DestinationCountry(c) => {
                if self.destination_country == c {
                    return false;
                }
                self.destination_country = c;
                true
            }
            OnboardingField::ManualNumber(n) => {
                if self.manual_number == n {
                    return false;
                }
                self.manual_number = n;
                self.contact = None;
                true
            }
            // El código se envió al número anterior: cambiar país o número lo invalida.
            OnboardingField::VerificationCountry(c) => {
                if self.verification_country == c {
                    return false;
                }
                self.verification_country = c;
                self.otp.clear();
                true
            }
            OnboardingField::PhoneNumber(p) => {
                if self.phone_number == p {
                    return false;
                }
                self.phone_number = p;
                self.otp.clear();
                true
            }
            OnboardingField::Otp(code) => {
                if self.otp == code {
                    return false;
                }
                self.otp = code;
                true
            }
        }
    }

    fn derived(&self) -> OnboardingDerived {
        let dial = &self.verification_country.dial_code;
        let number = self.phone_number.trim();
        OnboardingDerived { user_phone: format!("{dial} {number}"),
                            masked_phone: mask_phone(dial, number) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_domain::{contact_by_id, country_by_code};

    #[test]
    fn manual_destination_uses_selected_country() {
        let mut s = OnboardingSelections::default();
        let ng = country_by_code("NG").expect("NG").clone();
        s.set_field(OnboardingField::DestinationCountry(ng));
        s.set_field(OnboardingField::ManualNumber("8031234567".into()));
        let c = s.destination_contact().expect("manual contact");
        assert_eq!(c.id, "manual");
        assert_eq!(c.name, "Manual Entry");
        assert_eq!(c.phone_number, "+234 8031234567");
        assert_eq!(c.country, "Nigeria");
    }

    #[test]
    fn picking_contact_discards_manual_number() {
        let mut s = OnboardingSelections::default();
        s.set_field(OnboardingField::ManualNumber("12345678".into()));
        s.set_field(OnboardingField::Contact(contact_by_id("3").cloned()));
        assert!(s.manual_number().is_empty());
        assert!(s.has_destination());
    }

    #[test]
    fn changing_phone_clears_code() {
        let mut s = OnboardingSelections::default();
        s.set_field(OnboardingField::PhoneNumber("5552345678".into()));
        s.set_field(OnboardingField::Otp("123456".into()));
        assert!(s.has_code());
        s.set_field(OnboardingField::PhoneNumber("5552345679".into()));
        assert!(!s.has_code());
        assert_eq!(s.derived().user_phone, "+1 5552345679");
        assert_eq!(s.derived().masked_phone, "+1 555 *** 79");
    }
}
