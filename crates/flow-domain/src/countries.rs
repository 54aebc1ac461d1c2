//! Países disponibles para selección de destino y verificación telefónica.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    /// Código ISO 3166-1 alfa-2.
    pub code: String,
    pub dial_code: String,
    pub flag: String,
}

impl Country {
    fn new(name: &str, code: &str, dial_code: &str) -> Self {
        Self { name: name.into(),
               code: code.into(),
               dial_code: dial_code.into(),
               flag: flag_for(code) }
    }
}

/// Bandera emoji a partir del código ISO (indicadores regionales).
/// Códigos que no son dos letras ASCII devuelven cadena vacía.
pub fn flag_for(code: &str) -> String {
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return String::new();
    }
    code.to_ascii_uppercase()
        .chars()
        .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

/// Ordenados por popularidad de destino; el primero es el valor inicial del
/// selector de contactos.
pub static COUNTRIES: Lazy<Vec<Country>> = Lazy::new(|| {
    vec![Country::new("Afghanistan", "AF", "+93"),
         Country::new("United States", "US", "+1"),
         Country::new("Cuba", "CU", "+53"),
         Country::new("United Kingdom", "GB", "+44"),
         Country::new("India", "IN", "+91"),
         Country::new("Canada", "CA", "+1"),
         Country::new("Kenya", "KE", "+254"),
         Country::new("Zimbabwe", "ZW", "+263"),
         Country::new("Jamaica", "JM", "+1"),
         Country::new("Mexico", "MX", "+52"),
         Country::new("Germany", "DE", "+49"),
         Country::new("Nigeria", "NG", "+234"),
         Country::new("Australia", "AU", "+61"),
         Country::new("Iran", "IR", "+98"),
         Country::new("Algeria", "DZ", "+213"),
         Country::new("Ethiopia", "ET", "+251"),
         Country::new("Colombia", "CO", "+57"),
         Country::new("France", "FR", "+33"),
         Country::new("China", "CN", "+86"),
         Country::new("Eritrea", "ER", "+291"),
         Country::new("Ghana", "GH", "+233")]
});

pub fn country_by_code(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// País por defecto del paso de verificación.
pub fn default_verification_country() -> &'static Country {
    country_by_code("US").unwrap_or(&COUNTRIES[0])
}

/// Filtro del selector: nombre (sin distinguir mayúsculas) o prefijo telefónico.
pub fn search_countries(query: &str) -> Vec<&'static Country> {
    let q = query.trim().to_lowercase();
    COUNTRIES.iter()
             .filter(|c| c.name.to_lowercase().contains(&q) || c.dial_code.contains(&q))
             .collect()
}
