//! Wizard de pago de servicios en Nigeria (Recipient → Bill type → Provider → Review).

mod selections;
pub mod steps;
mod wizard;

pub use selections::{BillDerived, BillField, BillSelections};
pub use wizard::{BillSnapshot, BillWizard, PaymentReceipt, SummaryRow, RECEIPT_HISTORY_LIMIT};
