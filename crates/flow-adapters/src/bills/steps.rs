//! Pasos del wizard de pago de servicios.

use flow_core::{PredicateStep, StepDefinition, StepId};

use super::BillSelections;

pub const RECIPIENT: StepId = StepId(1);
pub const BILL_TYPE: StepId = StepId(2);
pub const PROVIDER: StepId = StepId(3);
pub const REVIEW: StepId = StepId(4);

pub fn bill_steps() -> Vec<Box<dyn StepDefinition<BillSelections>>> {
    vec![Box::new(PredicateStep::input(RECIPIENT.0, "Recipient", BillSelections::has_recipient)),
         Box::new(PredicateStep::input(BILL_TYPE.0, "Bill type", BillSelections::has_category)),
         Box::new(PredicateStep::input(PROVIDER.0, "Provider", BillSelections::provider_ready)),
         Box::new(PredicateStep::review(REVIEW.0, "Review"))]
}
