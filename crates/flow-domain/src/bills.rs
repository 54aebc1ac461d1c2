//! Catálogo de pagos de servicios (categorías y proveedores).
//!
//! El catálogo es de sólo lectura. `validate()` comprueba las invariantes
//! que el wizard asume al aplicar resets en cascada: toda categoría tiene al
//! menos un proveedor y todo proveedor tiene al menos un monto.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Naira por dólar usado para el monto equivalente en moneda extranjera.
pub const NAIRA_PER_USD: u64 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillCategoryId {
    Electricity,
    Tv,
    Internet,
    Education,
}

impl BillCategoryId {
    pub const ALL: [BillCategoryId; 4] =
        [BillCategoryId::Electricity, BillCategoryId::Tv, BillCategoryId::Internet, BillCategoryId::Education];

    pub fn as_str(&self) -> &'static str {
        match self {
            BillCategoryId::Electricity => "electricity",
            BillCategoryId::Tv => "tv",
            BillCategoryId::Internet => "internet",
            BillCategoryId::Education => "education",
        }
    }
}

impl fmt::Display for BillCategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillCategoryId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BillCategoryId::ALL.into_iter()
                           .find(|c| c.as_str() == s)
                           .ok_or_else(|| DomainError::NotFound(format!("bill category '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryIcon {
    Lightning,
    Tv,
    Wifi,
    Book,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillCategory {
    pub id: BillCategoryId,
    pub title: String,
    pub description: String,
    pub icon: CategoryIcon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillProvider {
    pub id: String,
    pub category_id: BillCategoryId,
    pub name: String,
    pub tagline: String,
    pub coverage: String,
    pub processing_time_label: String,
    pub tags: Vec<String>,
    /// Montos en naira enteros, en el orden en que se ofrecen.
    pub amount_options: Vec<u64>,
    pub fee_percent: Decimal,
    pub account_field_label: String,
    pub reference_hint: String,
}

impl BillProvider {
    pub fn first_amount(&self) -> Option<u64> {
        self.amount_options.first().copied()
    }

    /// `amount * fee_percent / 100`, exacto.
    pub fn service_fee(&self, amount: u64) -> Decimal {
        Decimal::from(amount) * self.fee_percent / Decimal::ONE_HUNDRED
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillCatalog {
    categories: Vec<BillCategory>,
    providers: Vec<BillProvider>,
    naira_per_usd: u64,
}

impl BillCatalog {
    /// Construye el catálogo sin validar (útil para tests de validación).
    pub fn new(categories: Vec<BillCategory>, providers: Vec<BillProvider>, naira_per_usd: u64) -> Self {
        Self { categories,
               providers,
               naira_per_usd }
    }

    /// Construye y valida.
    pub fn try_new(categories: Vec<BillCategory>,
                   providers: Vec<BillProvider>,
                   naira_per_usd: u64)
                   -> Result<Self, DomainError> {
        let catalog = Self::new(categories, providers, naira_per_usd);
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.naira_per_usd == 0 {
            return Err(DomainError::Validation("exchange rate must be positive".into()));
        }
        let mut seen = HashSet::new();
        for p in &self.providers {
            if !seen.insert(p.id.as_str()) {
                return Err(DomainError::DuplicateProvider(p.id.clone()));
            }
            if self.category(p.category_id).is_none() {
                return Err(DomainError::DanglingCategory { provider: p.id.clone(),
                                                           category: p.category_id.to_string() });
            }
            if p.amount_options.is_empty() {
                return Err(DomainError::EmptyAmountOptions(p.id.clone()));
            }
        }
        for c in &self.categories {
            if self.first_provider(c.id).is_none() {
                return Err(DomainError::EmptyCategory(c.id.to_string()));
            }
        }
        Ok(())
    }

    pub fn categories(&self) -> &[BillCategory] {
        &self.categories
    }

    pub fn providers(&self) -> &[BillProvider] {
        &self.providers
    }

    pub fn naira_per_usd(&self) -> u64 {
        self.naira_per_usd
    }

    pub fn category(&self, id: BillCategoryId) -> Option<&BillCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn provider(&self, id: &str) -> Option<&BillProvider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn providers_in(&self, category: BillCategoryId) -> impl Iterator<Item = &BillProvider> {
        self.providers.iter().filter(move |p| p.category_id == category)
    }

    pub fn first_provider(&self, category: BillCategoryId) -> Option<&BillProvider> {
        self.providers_in(category).next()
    }

    /// Primera categoría del catálogo (valor inicial del wizard).
    pub fn default_category(&self) -> Option<BillCategoryId> {
        self.categories.first().map(|c| c.id)
    }

    /// Catálogo incorporado de Nigeria.
    pub fn nigeria() -> Self {
        NIGERIA_CATALOG.clone()
    }
}

fn category(id: BillCategoryId, title: &str, description: &str, icon: CategoryIcon) -> BillCategory {
    BillCategory { id,
                   title: title.into(),
                   description: description.into(),
                   icon }
}

#[allow(clippy::too_many_arguments)]
fn provider(id: &str,
            category_id: BillCategoryId,
            name: &str,
            tagline: &str,
            coverage: &str,
            processing: &str,
            tag: &str,
            amounts: &[u64],
            fee_percent: Decimal,
            account_field_label: &str,
            reference_hint: &str)
            -> BillProvider {
    BillProvider { id: id.into(),
                   category_id,
                   name: name.into(),
                   tagline: tagline.into(),
                   coverage: coverage.into(),
                   processing_time_label: processing.into(),
                   tags: vec![tag.into()],
                   amount_options: amounts.to_vec(),
                   fee_percent,
                   account_field_label: account_field_label.into(),
                   reference_hint: reference_hint.into() }
}

pub static NIGERIA_CATALOG: Lazy<BillCatalog> = Lazy::new(|| {
    use BillCategoryId::*;
    let categories = vec![category(Electricity, "Electricity", "Prepaid & postpaid discos nationwide", CategoryIcon::Lightning),
                          category(Tv, "TV & Entertainment", "DSTV, GOTV, Startimes bundles", CategoryIcon::Tv),
                          category(Internet, "Internet & Data", "Fiber & fixed wireless subscriptions", CategoryIcon::Wifi),
                          category(Education, "School Fees", "University tuition & PTA dues", CategoryIcon::Book)];
    let providers = vec![provider("ikeja-electric-prepaid",
                                  Electricity,
                                  "Ikeja Electric (Prepaid)",
                                  "Token delivered instantly",
                                  "Lagos & Ogun",
                                  "< 1 min",
                                  "Token",
                                  &[5000, 10000, 20000, 40000],
                                  Decimal::new(2, 0),
                                  "Meter number (e.g. 12345678901)",
                                  "We text the token to your recipient"),
                         provider("eko-electric-postpaid",
                                  Electricity,
                                  "Eko Electric (Postpaid)",
                                  "Balance cleared same day",
                                  "Lagos Island & Lekki",
                                  "Same day",
                                  "Bill settle",
                                  &[15000, 25000, 50000],
                                  Decimal::new(15, 1),
                                  "Account number",
                                  "We attach your reference ID to the disco receipt"),
                         provider("dstv-compact",
                                  Tv,
                                  "DSTV",
                                  "Compact, Compact+, Premium",
                                  "Nationwide",
                                  "< 5 min",
                                  "Decoder",
                                  &[13500, 20600, 37000],
                                  Decimal::new(12, 1),
                                  "Smartcard number",
                                  "We automatically refresh decoder signal"),
                         provider("startimes-super",
                                  Tv,
                                  "Startimes",
                                  "Basic to Super bouquets",
                                  "Nationwide",
                                  "< 5 min",
                                  "Decoder",
                                  &[5900, 8800, 13400],
                                  Decimal::new(1, 0),
                                  "Smartcard number",
                                  "Recipient gets SMS confirmation"),
                         provider("swift-4g",
                                  Internet,
                                  "Swift 4G Home",
                                  "Unlimited + capped bundles",
                                  "Lagos & Abuja",
                                  "< 10 min",
                                  "Router",
                                  &[18000, 25000, 42000],
                                  Decimal::new(2, 0),
                                  "Customer ID",
                                  "We sync with Swift portal automatically"),
                         provider("spectranet",
                                  Internet,
                                  "Spectranet",
                                  "Mega value & night plans",
                                  "Major cities",
                                  "< 10 min",
                                  "Router",
                                  &[16000, 21500, 32000],
                                  Decimal::new(18, 1),
                                  "Account number",
                                  "Recipient email gets receipt"),
                         provider("unilag-fees",
                                  Education,
                                  "University of Lagos",
                                  "Undergrad tuition wallet",
                                  "Lagos",
                                  "Next business day",
                                  "Tuition",
                                  &[80000, 120000, 180000],
                                  Decimal::new(25, 1),
                                  "Matric number",
                                  "We send proof of payment to student email"),
                         provider("abis-school",
                                  Education,
                                  "Auntie Bisi International School",
                                  "Day & boarding fees",
                                  "Ibadan",
                                  "Next business day",
                                  "Tuition",
                                  &[65000, 95000, 150000],
                                  Decimal::new(22, 1),
                                  "Student ID",
                                  "Receipt shared with guardian via WhatsApp")];
    BillCatalog::new(categories, providers, NAIRA_PER_USD)
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nigeria_catalog_is_valid() {
        let catalog = BillCatalog::nigeria();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.categories().len(), 4);
        assert_eq!(catalog.providers().len(), 8);
        assert_eq!(catalog.default_category(), Some(BillCategoryId::Electricity));
        assert_eq!(catalog.first_provider(BillCategoryId::Tv).map(|p| p.id.as_str()), Some("dstv-compact"));
    }

    #[test]
    fn fee_is_exact_for_fractional_percent() {
        let catalog = BillCatalog::nigeria();
        let eko = catalog.provider("eko-electric-postpaid").expect("eko");
        assert_eq!(eko.service_fee(15000), Decimal::new(225, 0));
        let dstv = catalog.provider("dstv-compact").expect("dstv");
        assert_eq!(dstv.service_fee(13500), Decimal::new(162, 0));
    }

    #[test]
    fn category_id_parses_from_str() {
        assert_eq!("tv".parse::<BillCategoryId>(), Ok(BillCategoryId::Tv));
        assert!(matches!("gas".parse::<BillCategoryId>(), Err(DomainError::NotFound(_))));
    }
}
