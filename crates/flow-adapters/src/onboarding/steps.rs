use flow_core::{PredicateStep, StepDefinition, StepId};

use super::OnboardingSelections;

pub const CONTACT: StepId = StepId(1);
pub const PHONE: StepId = StepId(2);
pub const CODE: StepId = StepId(3);
pub const DONE: StepId = StepId(4);

pub fn onboarding_steps() -> Vec<Box<dyn StepDefinition<OnboardingSelections>>> {
    vec![Box::new(PredicateStep::input(CONTACT.0, "Contact", OnboardingSelections::has_destination)),
         Box::new(PredicateStep::input(PHONE.0, "Phone", OnboardingSelections::has_phone)),
         Box::new(PredicateStep::input(CODE.0, "Code", OnboardingSelections::has_code)),
         Box::new(PredicateStep::review(DONE.0, "Done"))]
}
