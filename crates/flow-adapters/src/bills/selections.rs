//! Selecciones del wizard de pago de servicios.
//!
//! Invariante: `provider_id` pertenece a `category_id`, `amount` es una de
//! las opciones de ese proveedor y `account_reference` se escribió para ese
//! proveedor. Toda escritura aguas arriba rehace lo que depende de ella.

use std::sync::Arc;

use flow_core::{SelectionField, SelectionStore};
use flow_domain::{BillCatalog, BillCategoryId, BillProvider, DomainError, Recipient};
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone)]
pub enum BillField {
    Recipient(Option<Recipient>),
    Category(BillCategoryId),
    Provider(String),
    Amount(u64),
    AccountReference(String),
}

impl SelectionField for BillField {
    fn name(&self) -> &'static str {
        match self {
            BillField::Recipient(_) => "recipient",
            BillField::Category(_) => "category_id",
            BillField::Provider(_) => "provider_id",
            BillField::Amount(_) => "amount",
            BillField::AccountReference(_) => "account_reference",
        }
    }
}

/// Valores derivados; nunca se almacenan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BillDerived {
    pub service_fee: Decimal,
    pub total_amount: Decimal,
    pub foreign_amount: Decimal,
}

impl BillDerived {
    pub const ZERO: BillDerived = BillDerived { service_fee: Decimal::ZERO,
                                                total_amount: Decimal::ZERO,
                                                foreign_amount: Decimal::ZERO };
}

#[derive(Debug, Clone, Serialize)]
pub struct BillSelections {
    #[serde(skip)]
    catalog: Arc<BillCatalog>,
    recipient: Option<Recipient>,
    category_id: BillCategoryId,
    provider_id: String,
    amount: u64,
    account_reference: String,
}

impl BillSelections {
    /// Valores iniciales: primera categoría, su primer proveedor y el primer monto.
    pub fn initial(catalog: Arc<BillCatalog>) -> Result<Self, DomainError> {
        catalog.validate()?;
        let category_id = catalog.default_category()
                                 .ok_or_else(|| DomainError::Validation("catalog has no categories".into()))?;
        let provider = catalog.first_provider(category_id)
                              .ok_or_else(|| DomainError::EmptyCategory(category_id.to_string()))?;
        let provider_id = provider.id.clone();
        let amount = provider.first_amount()
                             .ok_or_else(|| DomainError::EmptyAmountOptions(provider_id.clone()))?;
        Ok(Self { catalog,
                  recipient: None,
                  category_id,
                  provider_id,
                  amount,
                  account_reference: String::new() })
    }

    pub fn catalog(&self) -> &BillCatalog {
        &self.catalog
    }

    pub fn recipient(&self) -> Option<&Recipient> {
        self.recipient.as_ref()
    }

    pub fn category_id(&self) -> BillCategoryId {
        self.category_id
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn account_reference(&self) -> &str {
        &self.account_reference
    }

    pub fn selected_provider(&self) -> Option<&BillProvider> {
        self.catalog.provider(&self.provider_id)
    }

    pub fn active_category(&self) -> Option<&flow_domain::BillCategory> {
        self.catalog.category(self.category_id)
    }

    pub fn providers_in_category(&self) -> Vec<&BillProvider> {
        self.catalog.providers_in(self.category_id).collect()
    }

    pub fn amount_options(&self) -> &[u64] {
        self.selected_provider().map(|p| p.amount_options.as_slice()).unwrap_or(&[])
    }

    pub fn has_recipient(&self) -> bool {
        self.recipient.is_some()
    }

    pub fn has_category(&self) -> bool {
        self.active_category().is_some()
    }

    /// Proveedor resuelto y referencia de 6+ caracteres (sin espacios en los extremos).
    pub fn provider_ready(&self) -> bool {
        self.selected_provider().is_some() && self.account_reference.trim().chars().count() >= 6
    }

    fn apply_provider(&mut self, provider_id: String, first_amount: u64) {
        self.provider_id = provider_id;
        self.amount = first_amount;
        self.account_reference.clear();
    }
}

impl SelectionStore for BillSelections {
    type Field = BillField;
    type Derived = BillDerived;

    fn set_field(&mut self, field: BillField) -> bool {
        match field {
            BillField::Recipient(r) => {
                if self.recipient == r {
                    return false;
                }
                self.recipient = r;
                true
            }
            BillField::Category(c) => {
                if c == self.category_id || self.catalog.category(c).is_none() {
                    return false;
                }
                self.category_id = c;
                let still_belongs = self.selected_provider().is_some_and(|p| p.category_id == c);
                if !still_belongs {
                    let first = self.catalog
                                    .first_provider(c)
                                    .and_then(|p| p.first_amount().map(|a| (p.id.clone(), a)));
                    match first {
                        Some((id, amount)) => self.apply_provider(id, amount),
                        None => {
                            self.provider_id.clear();
                            self.amount = 0;
                            self.account_reference.clear();
                        }
                    }
                }
                true
            }
            BillField::Provider(id) => {
                if id == self.provider_id {
                    return false;
                }
                let Some((category, amount)) =
                    self.catalog.provider(&id).and_then(|p| p.first_amount().map(|a| (p.category_id, a)))
                else {
                    debug!("ignoring unknown provider {id}");
                    return false;
                };
                self.category_id = category;
                self.apply_provider(id, amount);
                true
            }
            BillField::Amount(a) => {
                if a == self.amount || !self.amount_options().contains(&a) {
                    return false;
                }
                self.amount = a;
                true
            }
            BillField::AccountReference(r) => {
                if r == self.account_reference {
                    return false;
                }
                self.account_reference = r;
                true
            }
        }
    }

    fn derived(&self) -> BillDerived {
        let Some(provider) = self.selected_provider() else {
            debug!("provider {:?} does not resolve, derived values are zero", self.provider_id);
            return BillDerived::ZERO;
        };
        let amount = Decimal::from(self.amount);
        let service_fee = provider.service_fee(self.amount);
        let rate = Decimal::from(self.catalog.naira_per_usd());
        let foreign_amount = if rate.is_zero() { Decimal::ZERO } else { amount / rate };
        BillDerived { service_fee,
                      total_amount: amount + service_fee,
                      foreign_amount }
    }
}
