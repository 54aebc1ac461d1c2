//! `BillWizard`: engine de pagos + borrador de destinatario manual.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use flow_core::{build_flow_definition, FlowEngine, InMemoryEventStore, ResetReason, StepId, Transition};
use flow_domain::{format_naira, format_usd, BillCatalog, BillCategoryId, Contact, DomainError, ManualRecipientDraft,
                  Recipient, MOCK_CONTACTS};
use log::info;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::steps::{bill_steps, BILL_TYPE, PROVIDER, REVIEW};
use super::{BillDerived, BillField, BillSelections};
use crate::error::AdapterError;
use crate::navigation::{Destination, NavTab};
use crate::presentation::FlowSnapshot;

pub type BillSnapshot = FlowSnapshot<BillSelections, BillDerived>;

/// Comprobantes que el wizard conserva; los más antiguos se descartan.
pub const RECEIPT_HISTORY_LIMIT: usize = 20;

/// Comprobante de un pago confirmado en el paso Review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentReceipt {
    pub id: Uuid,
    pub recipient: Option<Recipient>,
    pub provider_id: String,
    pub provider_name: String,
    pub account_reference: String,
    pub amount: u64,
    pub service_fee: Decimal,
    pub total_amount: Decimal,
    pub foreign_amount: Decimal,
    pub fingerprint: String,
    pub paid_at: DateTime<Utc>,
}

/// Fila del resumen del paso Review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug)]
pub struct BillWizard {
    engine: FlowEngine<BillSelections>,
    draft: ManualRecipientDraft,
    adding_manual: bool,
    receipts: Vec<PaymentReceipt>,
}

impl BillWizard {
    pub fn new(catalog: Arc<BillCatalog>) -> Result<Self, AdapterError> {
        let initial = BillSelections::initial(catalog)?;
        let definition = build_flow_definition(bill_steps())?;
        let engine = FlowEngine::with_definition(definition, initial, InMemoryEventStore::default());
        Ok(Self { engine,
                  draft: ManualRecipientDraft::default(),
                  adding_manual: false,
                  receipts: Vec::new() })
    }

    /// Wizard sobre el catálogo incorporado de Nigeria.
    pub fn nigeria() -> Result<Self, AdapterError> {
        Self::new(Arc::new(BillCatalog::nigeria()))
    }

    pub fn engine(&self) -> &FlowEngine<BillSelections> {
        &self.engine
    }

    pub fn selections(&self) -> &BillSelections {
        self.engine.selections()
    }

    pub fn derived(&self) -> BillDerived {
        self.engine.derived()
    }

    pub fn current_step_index(&self) -> usize {
        self.engine.current_step_index()
    }

    pub fn can_continue(&self) -> bool {
        self.engine.can_continue()
    }

    pub fn receipts(&self) -> &[PaymentReceipt] {
        &self.receipts
    }

    /// Entrega los comprobantes acumulados y vacía la lista.
    pub fn take_receipts(&mut self) -> Vec<PaymentReceipt> {
        std::mem::take(&mut self.receipts)
    }

    /// Contactos ofrecidos en el paso Recipient (sólo Nigeria).
    pub fn recipient_contacts() -> Vec<&'static Contact> {
        MOCK_CONTACTS.iter().filter(|c| c.country_code == "NG").collect()
    }

    /// Elegir un contacto escribe el destinatario y salta a Bill type.
    pub fn pick_contact(&mut self, contact: &Contact) -> Transition<BillSelections> {
        self.adding_manual = false;
        self.engine.jump_to(BILL_TYPE, BillField::Recipient(Some(Recipient::from(contact))))
    }

    pub fn start_manual_entry(&mut self) {
        self.adding_manual = true;
    }

    pub fn is_adding_manual(&self) -> bool {
        self.adding_manual
    }

    pub fn set_manual_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_manual_phone(&mut self, phone: impl Into<String>) {
        self.draft.phone = phone.into();
    }

    pub fn manual_recipient_is_valid(&self) -> bool {
        self.draft.is_valid()
    }

    /// Confirma el borrador manual. Si no es válido no se crea destinatario
    /// ni cambia el paso.
    pub fn confirm_manual_recipient(&mut self) -> Result<Transition<BillSelections>, DomainError> {
        let recipient = self.draft.confirm()?;
        self.draft = ManualRecipientDraft::default();
        self.adding_manual = false;
        Ok(self.engine.jump_to(BILL_TYPE, BillField::Recipient(Some(recipient))))
    }

    /// En el paso Bill type la elección lleva directamente a Provider; en
    /// otros pasos sólo escribe la categoría.
    pub fn select_category(&mut self, category: BillCategoryId) -> Transition<BillSelections> {
        if self.engine.current_step() == BILL_TYPE {
            return self.engine.jump_to(PROVIDER, BillField::Category(category));
        }
        self.engine.set_field(BillField::Category(category));
        Transition::Unchanged { step: self.engine.current_step() }
    }

    pub fn select_provider(&mut self, provider_id: &str) -> bool {
        self.engine.set_field(BillField::Provider(provider_id.to_string()))
    }

    /// Chip de monto en la tarjeta de un proveedor: selecciona el proveedor
    /// (con su cascada) y luego el monto.
    pub fn pick_amount(&mut self, provider_id: &str, amount: u64) -> bool {
        let provider_changed = self.select_provider(provider_id);
        let amount_changed = self.engine.set_field(BillField::Amount(amount));
        provider_changed || amount_changed
    }

    pub fn set_account_reference(&mut self, reference: impl Into<String>) -> bool {
        self.engine.set_field(BillField::AccountReference(reference.into()))
    }

    /// Escritura + salto atómicos sobre el engine.
    pub fn jump_to(&mut self, step: StepId, field: BillField) -> Transition<BillSelections> {
        self.engine.jump_to(step, field)
    }

    pub fn next(&mut self) -> Transition<BillSelections> {
        self.engine.advance()
    }

    /// Retrocede un paso; desde Recipient abandona el wizard.
    pub fn back(&mut self) -> Transition<BillSelections> {
        if self.engine.current_step_index() == 1 {
            self.abandon();
            return Transition::Reset { reason: ResetReason::Abandoned };
        }
        self.engine.retreat()
    }

    /// Abandono explícito: descarta selecciones y borrador y vuelve a inicio.
    pub fn abandon(&mut self) -> Destination {
        self.engine.abandon();
        self.draft = ManualRecipientDraft::default();
        self.adding_manual = false;
        Destination::Home
    }

    /// `Continue` o, en Review, pagar: confirma, emite el comprobante y
    /// reinicia el wizard.
    pub fn primary_action(&mut self) -> Transition<BillSelections> {
        let derived = self.engine.derived();
        let transition = self.engine.primary_action();
        if let Transition::Committed { selections, fingerprint } = &transition {
            let receipt = PaymentReceipt { id: Uuid::new_v4(),
                                           recipient: selections.recipient().cloned(),
                                           provider_id: selections.provider_id().to_string(),
                                           provider_name: selections.selected_provider()
                                                                    .map(|p| p.name.clone())
                                                                    .unwrap_or_default(),
                                           account_reference: selections.account_reference().trim().to_string(),
                                           amount: selections.amount(),
                                           service_fee: derived.service_fee,
                                           total_amount: derived.total_amount,
                                           foreign_amount: derived.foreign_amount,
                                           fingerprint: fingerprint.clone(),
                                           paid_at: Utc::now() };
            info!("bill payment {} to {} for {}",
                  receipt.id,
                  receipt.provider_id,
                  format_naira(receipt.total_amount));
            self.receipts.push(receipt);
            if self.receipts.len() > RECEIPT_HISTORY_LIMIT {
                self.receipts.remove(0);
            }
            self.draft = ManualRecipientDraft::default();
            self.adding_manual = false;
        }
        transition
    }

    pub fn primary_label(&self) -> String {
        if self.engine.current_step() == REVIEW {
            format!("Pay {}", format_naira(self.derived().total_amount))
        } else {
            "Continue".to_string()
        }
    }

    /// Filas del resumen de Review; `None` sin destinatario o sin proveedor.
    pub fn review_summary(&self) -> Option<Vec<SummaryRow>> {
        let s = self.selections();
        let provider = s.selected_provider()?;
        s.recipient()?;
        let d = self.derived();
        let reference = if s.account_reference().is_empty() {
            "Add details".to_string()
        } else {
            s.account_reference().to_string()
        };
        Some(vec![SummaryRow { label: "Provider",
                               value: provider.name.clone() },
                  SummaryRow { label: "Account",
                               value: reference },
                  SummaryRow { label: "Bill amount",
                               value: format_naira(Decimal::from(s.amount())) },
                  SummaryRow { label: "Service fee",
                               value: format!("{}% ({})", provider.fee_percent.normalize(), format_naira(d.service_fee)) },
                  SummaryRow { label: "You pay",
                               value: format_usd(d.foreign_amount) },
                  SummaryRow { label: "Family receives",
                               value: format_naira(d.total_amount) }])
    }

    pub fn snapshot(&self) -> BillSnapshot {
        FlowSnapshot::capture(&self.engine, self.primary_label())
    }

    /// Barra inferior: sólo emite el destino.
    pub fn switch_tab(&self, tab: NavTab) -> Destination {
        Destination::from(tab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_label_on_review_shows_total() {
        let mut w = BillWizard::nigeria().expect("wizard");
        assert_eq!(w.primary_label(), "Continue");
        let chidi = BillWizard::recipient_contacts()[0];
        w.pick_contact(chidi);
        w.select_category(BillCategoryId::Electricity);
        w.set_account_reference("12345678901");
        w.next();
        assert_eq!(w.engine().current_step(), StepId(4));
        assert_eq!(w.primary_label(), "Pay ₦5,100");
    }

    #[test]
    fn review_summary_formats_fee_percent() {
        let mut w = BillWizard::nigeria().expect("wizard");
        w.pick_contact(BillWizard::recipient_contacts()[0]);
        w.select_provider("eko-electric-postpaid");
        let rows = w.review_summary().expect("summary");
        let fee = rows.iter().find(|r| r.label == "Service fee").expect("fee row");
        assert_eq!(fee.value, "1.5% (₦225)");
        let account = rows.iter().find(|r| r.label == "Account").expect("account row");
        assert_eq!(account.value, "Add details");
    }

    #[test]
    fn abandon_clears_selections_and_manual_draft() {
        let mut w = BillWizard::nigeria().expect("wizard");
        let initial = w.selections().clone();
        w.start_manual_entry();
        w.set_manual_name("Ada");
        w.pick_contact(BillWizard::recipient_contacts()[0]);
        w.select_category(BillCategoryId::Tv);
        w.set_account_reference("123456");
        w.start_manual_entry();
        w.set_manual_phone("08031234567");
        assert!(w.manual_recipient_is_valid());

        assert_eq!(w.abandon(), Destination::Home);
        assert_eq!(w.current_step_index(), 1);
        assert!(w.selections().recipient().is_none());
        assert_eq!(w.selections().category_id(), initial.category_id());
        assert_eq!(w.selections().provider_id(), initial.provider_id());
        assert_eq!(w.selections().amount(), initial.amount());
        assert_eq!(w.selections().account_reference(), "");
        assert!(!w.is_adding_manual());
        assert!(!w.manual_recipient_is_valid());
    }

    #[test]
    fn only_nigerian_contacts_are_offered() {
        let contacts = BillWizard::recipient_contacts();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Chidi Okonkwo");
    }
}
