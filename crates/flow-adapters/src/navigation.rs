//! Destinos de navegación. El core sólo emite estos símbolos; resolverlos a
//! pantallas es tarea del host.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavTab {
    Home,
    Services,
    Account,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingRoute {
    Welcome,
    Contacts,
    Verify,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Home,
    Services,
    Account,
    Onboarding(OnboardingRoute),
}

impl Destination {
    pub fn route(&self) -> &'static str {
        match self {
            Destination::Home => "/new_home",
            Destination::Services => "/services-bills",
            Destination::Account => "/account",
            Destination::Onboarding(OnboardingRoute::Welcome) => "/onboarding",
            Destination::Onboarding(OnboardingRoute::Contacts) => "/onboarding/contacts",
            Destination::Onboarding(OnboardingRoute::Verify) => "/onboarding/verify",
            Destination::Onboarding(OnboardingRoute::Home) => "/onboarding/home",
        }
    }
}

impl From<NavTab> for Destination {
    fn from(tab: NavTab) -> Self {
        match tab {
            NavTab::Home => Destination::Home,
            NavTab::Services => Destination::Services,
            NavTab::Account => Destination::Account,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}
