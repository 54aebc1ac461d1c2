//! Onboarding: persistencia del contacto, verificación telefónica y esperas.

use std::time::Duration;

use flow_adapters::navigation::{Destination, OnboardingRoute};
use flow_adapters::onboarding::steps::{CODE, CONTACT, DONE, PHONE};
use flow_adapters::onboarding::{LoadingKind, OnboardingFlow, OnboardingHome, OnboardingTimings};
use flow_core::{ManualScheduler, ResetReason, Scheduler, Transition};
use flow_domain::{contact_by_id, country_by_code};
use flow_session::keys::{PHONE_VERIFIED, SELECTED_CONTACT, USER_PHONE};
use flow_session::{load_selected_contact, InMemorySessionStore, SessionStore};

#[test]
fn selecting_contact_persists_and_jumps_to_phone() {
    let mut flow = OnboardingFlow::new(InMemorySessionStore::new()).expect("flow");
    assert_eq!(flow.route(), Destination::Onboarding(OnboardingRoute::Contacts));
    let grace = contact_by_id("7").expect("contact");
    let t = flow.select_contact(grace).expect("select");
    assert!(matches!(t, Transition::Jumped { to, .. } if to == PHONE));
    assert_eq!(flow.route(), Destination::Onboarding(OnboardingRoute::Verify));
    assert_eq!(load_selected_contact(flow.store()).as_ref(), Some(grace));
}

#[test]
fn manual_number_needs_six_chars() {
    let mut flow = OnboardingFlow::new(InMemorySessionStore::new()).expect("flow");
    flow.start_manual_entry();
    flow.set_manual_number("12345");
    assert!(flow.primary_action().expect("action").is_blocked());
    assert!(flow.store().get(SELECTED_CONTACT).is_none());

    flow.set_destination_country(country_by_code("GH").expect("GH").clone());
    flow.set_manual_number("123456");
    flow.primary_action().expect("action");
    assert_eq!(flow.engine().current_step(), PHONE);
    let saved = load_selected_contact(flow.store()).expect("manual contact");
    assert_eq!(saved.id, "manual");
    assert_eq!(saved.phone_number, "+233 123456");
    assert_eq!(saved.country, "Ghana");
}

#[test]
fn full_verification_marks_session() {
    let mut flow = OnboardingFlow::new(InMemorySessionStore::new()).expect("flow");
    flow.select_contact(contact_by_id("12").expect("contact")).expect("select");
    assert!(flow.primary_action().expect("send").is_blocked());
    flow.set_phone_number("5552345678");
    assert_eq!(flow.primary_label(), "Send Code");
    flow.primary_action().expect("send");
    assert_eq!(flow.engine().current_step(), CODE);

    // Volver desde Code descarta el código.
    flow.set_otp("123").expect("partial");
    flow.back();
    assert_eq!(flow.selections().otp(), "");
    flow.primary_action().expect("send again");

    let t = flow.set_otp("654321").expect("complete code");
    assert!(matches!(t, Transition::Advanced { to, .. } if to == DONE));
    assert_eq!(flow.store().get(PHONE_VERIFIED).as_deref(), Some("true"));
    assert_eq!(flow.store().get(USER_PHONE).as_deref(), Some("+1 5552345678"));

    let home = OnboardingHome::mount(flow.store());
    assert!(home.phone_verified);
    assert_eq!(home.destination_country, "Nigeria");
    assert_eq!(home.headline(), "Get started with 7 days of free unlimited calls to Nigeria");

    assert!(matches!(flow.primary_action().expect("finish"), Transition::Committed { .. }));
    assert_eq!(flow.engine().current_step(), CONTACT);
    let store = flow.into_store();
    assert_eq!(store.len(), 3);
}

#[test]
fn home_ignores_malformed_contact() {
    let mut store = InMemorySessionStore::new();
    store.set(SELECTED_CONTACT, "[1,2".into()).expect("set");
    let home = OnboardingHome::mount(&store);
    assert!(home.contact.is_none());
    assert_eq!(home.destination_country, "Nigeria");
    assert!(!home.phone_verified);

    let kenya = contact_by_id("7").expect("contact");
    flow_session::save_selected_contact(&mut store, kenya).expect("save");
    assert_eq!(OnboardingHome::mount(&store).destination_country, "Kenya");
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn delayed_flow_at_phone() -> OnboardingFlow<InMemorySessionStore> {
    let mut flow = OnboardingFlow::with_loading(InMemorySessionStore::new(),
                                                ManualScheduler::new(),
                                                OnboardingTimings::default()).expect("flow");
    flow.select_contact(contact_by_id("12").expect("contact")).expect("select");
    flow.set_phone_number("5552345678");
    flow
}

#[test]
fn send_and_verify_wait_before_advancing() {
    let mut flow = delayed_flow_at_phone();
    assert!(matches!(flow.primary_action().expect("send"), Transition::Unchanged { step } if step == PHONE));
    assert_eq!(flow.loading(), Some(LoadingKind::SendCode));
    assert_eq!(flow.primary_label(), "Sending...");

    // Pulsar de nuevo durante la espera no programa otro envío.
    flow.primary_action().expect("send twice");
    assert_eq!(flow.scheduler().pending(), 1);

    assert!(flow.advance_clock(ms(999)).expect("clock").is_empty());
    assert_eq!(flow.engine().current_step(), PHONE);
    let applied = flow.advance_clock(ms(1)).expect("clock");
    assert!(matches!(applied.as_slice(), [Transition::Advanced { to, .. }] if *to == CODE));
    assert!(!flow.is_loading());
    assert_eq!(flow.primary_label(), "Verify");

    let t = flow.set_otp("654321").expect("complete code");
    assert!(matches!(t, Transition::Unchanged { step } if step == CODE));
    assert_eq!(flow.primary_label(), "Verifying...");
    assert!(flow.store().get(PHONE_VERIFIED).is_none());

    flow.advance_clock(ms(1000)).expect("clock");
    assert_eq!(flow.engine().current_step(), DONE);
    assert_eq!(flow.store().get(PHONE_VERIFIED).as_deref(), Some("true"));
}

#[test]
fn back_during_send_discards_pending_wait() {
    let mut flow = delayed_flow_at_phone();
    flow.primary_action().expect("send");
    assert!(flow.is_loading());

    assert!(matches!(flow.back(), Transition::Retreated { to, .. } if to == CONTACT));
    assert!(!flow.is_loading());
    assert_eq!(flow.scheduler().pending(), 0);
    assert!(flow.advance_clock(ms(5000)).expect("clock").is_empty());
    assert_eq!(flow.engine().current_step(), CONTACT);
}

#[test]
fn resend_keeps_code_step() {
    let mut flow = delayed_flow_at_phone();
    flow.primary_action().expect("send");
    flow.advance_clock(ms(1000)).expect("clock");
    assert_eq!(flow.engine().current_step(), CODE);

    flow.resend_code().expect("resend");
    assert_eq!(flow.primary_label(), "Resending...");
    let applied = flow.advance_clock(ms(1000)).expect("clock");
    assert!(matches!(applied.as_slice(), [Transition::Unchanged { step }] if *step == CODE));
    assert_eq!(flow.primary_label(), "Verify");
}

#[test]
fn abandon_returns_to_welcome_with_initial_selections() {
    let mut flow = OnboardingFlow::new(InMemorySessionStore::new()).expect("flow");
    let grace = contact_by_id("7").expect("contact");
    flow.select_contact(grace).expect("select");
    flow.set_phone_number("5552345678");

    assert_eq!(flow.abandon(), Destination::Onboarding(OnboardingRoute::Welcome));
    assert_eq!(flow.engine().current_step(), CONTACT);
    assert!(flow.selections().contact().is_none());
    assert_eq!(flow.selections().phone_number(), "");
    assert_eq!(flow.selections().otp(), "");
    assert_eq!(load_selected_contact(flow.store()).as_ref(), Some(grace));

    // Desde el primer paso, volver también abandona.
    flow.select_contact(grace).expect("select again");
    flow.back();
    assert!(matches!(flow.back(), Transition::Reset { reason: ResetReason::Abandoned }));
    assert!(flow.selections().contact().is_none());
    assert_eq!(flow.engine().event_variants().last(), Some(&"Z"));
}
