use flow_adapters::navigation::Destination;
use flow_adapters::onboarding::steps::{CODE, DONE, PHONE};
use flow_adapters::onboarding::{OnboardingFlow, OnboardingHome};
use flow_core::Transition;
use flow_domain::{contact_by_id, country_by_code, DomainError};
use flow_session::{InMemorySessionStore, SessionConfig};
use serde::Serialize;

use super::require;
use crate::cli::{DestinationArg, OnboardingArgs};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct OnboardingReport {
    pub home: OnboardingHome,
    pub headline: String,
    pub route: Destination,
}

/// Contact → Phone → Code → Done contra un store de sesión en memoria.
pub fn run_onboarding(args: &OnboardingArgs) -> Result<OnboardingReport, AppError> {
    let store = InMemorySessionStore::with_config(&SessionConfig::from_env());
    let mut flow = OnboardingFlow::new(store)?;

    match &args.destination {
        DestinationArg::Contact(id) => {
            let contact = contact_by_id(id).ok_or_else(|| DomainError::NotFound(format!("contact '{id}'")))?;
            require(flow.select_contact(contact)?, "contact")?;
        }
        DestinationArg::Manual { number, country } => {
            flow.start_manual_entry();
            if let Some(code) = country {
                let country = country_by_code(code).ok_or_else(|| DomainError::NotFound(format!("country '{code}'")))?;
                flow.set_destination_country(country.clone());
            }
            flow.set_manual_number(number.as_str());
            require(flow.primary_action()?, "contact")?;
        }
    }
    if flow.engine().current_step() != PHONE {
        return Err(AppError::Rejected("contact step did not complete".into()));
    }

    flow.set_phone_number(args.phone.as_str());
    require(flow.primary_action()?, "phone")?;
    if flow.engine().current_step() != CODE {
        return Err(AppError::Rejected("phone step did not complete".into()));
    }

    match flow.set_otp(args.code.as_str())? {
        Transition::Advanced { to, .. } if to == DONE => {}
        _ => return Err(AppError::Rejected("verification code must have 6 characters".into())),
    }

    let home = OnboardingHome::mount(flow.store());
    let headline = home.headline();
    let route = flow.route();
    require(flow.primary_action()?, "done")?;
    Ok(OnboardingReport { home,
                          headline,
                          route })
}
