use flow_adapters::bills::{BillWizard, PaymentReceipt, SummaryRow};
use flow_core::Transition;
use flow_domain::{contact_by_id, DomainError};
use log::info;
use serde::Serialize;

use super::require;
use crate::cli::{BillsArgs, RecipientArg};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct BillReport {
    pub summary: Vec<SummaryRow>,
    pub pay_label: String,
    pub receipt: PaymentReceipt,
}

/// Recipient → Bill type → Provider → Review → pago.
pub fn run_bills(args: &BillsArgs) -> Result<BillReport, AppError> {
    let mut wizard = BillWizard::nigeria()?;

    let picked = match &args.recipient {
        Some(RecipientArg::Manual { name, phone }) => {
            wizard.start_manual_entry();
            wizard.set_manual_name(name.as_str());
            wizard.set_manual_phone(phone.as_str());
            wizard.confirm_manual_recipient()?
        }
        Some(RecipientArg::Contact(id)) => {
            let contact = contact_by_id(id).ok_or_else(|| DomainError::NotFound(format!("contact '{id}'")))?;
            wizard.pick_contact(contact)
        }
        None => {
            let contact = BillWizard::recipient_contacts().into_iter()
                                                          .next()
                                                          .ok_or_else(|| DomainError::NotFound("recipient contact".into()))?;
            wizard.pick_contact(contact)
        }
    };
    require(picked, "recipient")?;
    require(wizard.select_category(args.category), "bill type")?;

    if let Some(provider) = &args.provider {
        if wizard.selections().catalog().provider(provider).is_none() {
            return Err(DomainError::NotFound(format!("provider '{provider}'")).into());
        }
        wizard.select_provider(provider);
    }
    if let Some(amount) = args.amount {
        let provider = wizard.selections().provider_id().to_string();
        wizard.pick_amount(&provider, amount);
        if wizard.selections().amount() != amount {
            return Err(AppError::Rejected(format!("{provider} does not offer an amount of {amount}")));
        }
    }
    wizard.set_account_reference(args.reference.as_str());
    require(wizard.next(), "provider")?;

    let summary = wizard.review_summary()
                        .ok_or_else(|| AppError::Rejected("review has nothing to show".into()))?;
    let pay_label = wizard.primary_label();
    match wizard.primary_action() {
        Transition::Committed { .. } => {}
        other => return Err(AppError::Rejected(format!("payment not confirmed: {other:?}"))),
    }
    let receipt = wizard.receipts()
                        .last()
                        .cloned()
                        .ok_or_else(|| AppError::Rejected("no receipt issued".into()))?;
    info!("bills demo finished with receipt {}", receipt.id);
    Ok(BillReport { summary,
                    pay_label,
                    receipt })
}
