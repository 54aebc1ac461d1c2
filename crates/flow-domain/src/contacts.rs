//! Contactos de ejemplo, ordenados por popularidad del país de destino.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::countries::flag_for;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub country: String,
    pub country_code: String,
    pub phone_number: String,
    pub flag: String,
}

impl Contact {
    pub fn new(id: &str, name: &str, country: &str, country_code: &str, phone_number: &str) -> Self {
        Self { id: id.into(),
               name: name.into(),
               country: country.into(),
               country_code: country_code.into(),
               phone_number: phone_number.into(),
               flag: flag_for(country_code) }
    }

    /// Iniciales para avatares: primera letra de hasta dos palabras.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

pub static MOCK_CONTACTS: Lazy<Vec<Contact>> = Lazy::new(|| {
    vec![Contact::new("1", "Ahmad Nazari", "Afghanistan", "AF", "+93 70 123 4567"),
         Contact::new("2", "Maria Rodriguez", "United States", "US", "+1 555 234 5678"),
         Contact::new("3", "Carlos Hernandez", "Cuba", "CU", "+53 5 234 5678"),
         Contact::new("4", "Sarah Thompson", "United Kingdom", "GB", "+44 7700 900123"),
         Contact::new("5", "Priya Sharma", "India", "IN", "+91 98765 43210"),
         Contact::new("6", "David Chen", "Canada", "CA", "+1 416 555 0123"),
         Contact::new("7", "Grace Wanjiku", "Kenya", "KE", "+254 712 345678"),
         Contact::new("8", "Tendai Moyo", "Zimbabwe", "ZW", "+263 77 123 4567"),
         Contact::new("9", "Marcus Brown", "Jamaica", "JM", "+1 876 555 1234"),
         Contact::new("10", "Isabella Lopez", "Mexico", "MX", "+52 55 1234 5678"),
         Contact::new("11", "Hans Mueller", "Germany", "DE", "+49 170 1234567"),
         Contact::new("12", "Chidi Okonkwo", "Nigeria", "NG", "+234 803 123 4567"),
         Contact::new("13", "Emma Wilson", "Australia", "AU", "+61 412 345 678"),
         Contact::new("14", "Amir Hosseini", "Iran", "IR", "+98 912 345 6789"),
         Contact::new("15", "Fatima Benali", "Algeria", "DZ", "+213 555 12 34 56"),
         Contact::new("16", "Yonas Haile", "Ethiopia", "ET", "+251 91 123 4567"),
         Contact::new("17", "Sofia Restrepo", "Colombia", "CO", "+57 310 123 4567"),
         Contact::new("18", "Pierre Dubois", "France", "FR", "+33 6 12 34 56 78"),
         Contact::new("19", "Li Wei", "China", "CN", "+86 138 1234 5678"),
         Contact::new("20", "Amanuel Tesfay", "Eritrea", "ER", "+291 7 123 4567")]
});

pub fn contact_by_id(id: &str) -> Option<&'static Contact> {
    MOCK_CONTACTS.iter().find(|c| c.id == id)
}

/// Filtro de la lista de contactos por nombre, país o teléfono.
pub fn search_contacts(query: &str) -> Vec<&'static Contact> {
    let q = query.trim().to_lowercase();
    MOCK_CONTACTS.iter()
                 .filter(|c| {
                     c.name.to_lowercase().contains(&q) || c.country.to_lowercase().contains(&q) || c.phone_number.contains(&q)
                 })
                 .collect()
}
