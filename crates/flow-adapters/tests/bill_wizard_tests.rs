//! Escenarios del wizard de pagos sobre el catálogo de Nigeria.

use flow_adapters::bills::steps::{BILL_TYPE, PROVIDER, RECIPIENT, REVIEW};
use flow_adapters::bills::{BillField, BillWizard, RECEIPT_HISTORY_LIMIT};
use flow_core::{JumpRejection, ResetReason, StepStatus, Transition};
use flow_domain::{BillCatalog, BillCategoryId};
use rust_decimal::Decimal;

fn wizard_at_provider_step() -> BillWizard {
    let mut w = BillWizard::nigeria().expect("wizard");
    w.pick_contact(BillWizard::recipient_contacts()[0]);
    w.select_category(BillCategoryId::Electricity);
    assert_eq!(w.engine().current_step(), PROVIDER);
    w
}

#[test]
fn guard_blocks_every_invalid_step() {
    let mut w = BillWizard::nigeria().expect("wizard");
    // Recipient sin destinatario.
    assert!(matches!(w.next(), Transition::Blocked { step } if step == RECIPIENT));
    assert!(matches!(w.primary_action(), Transition::Blocked { .. }));
    assert_eq!(w.current_step_index(), 1);

    // Provider sin referencia suficiente.
    let mut w = wizard_at_provider_step();
    w.set_account_reference("12345");
    assert!(w.next().is_blocked());
    assert_eq!(w.engine().current_step(), PROVIDER);
}

#[test]
fn bounds_hold_at_both_ends() {
    let mut w = BillWizard::nigeria().expect("wizard");
    for _ in 0..3 {
        w.back();
    }
    assert_eq!(w.current_step_index(), 1);

    let mut w = wizard_at_provider_step();
    w.set_account_reference("1234567890");
    w.next();
    assert_eq!(w.engine().current_step(), REVIEW);
    for _ in 0..3 {
        assert!(matches!(w.next(), Transition::Unchanged { .. }));
    }
    assert_eq!(w.current_step_index(), 4);
}

#[test]
fn cascading_reset_for_every_category_pair() {
    let catalog = BillCatalog::nigeria();
    for from in BillCategoryId::ALL {
        for to in BillCategoryId::ALL {
            if from == to {
                continue;
            }
            let mut w = BillWizard::nigeria().expect("wizard");
            let first_from = catalog.first_provider(from).expect("provider");
            w.select_provider(&first_from.id);
            w.pick_amount(&first_from.id, *first_from.amount_options.last().expect("amount"));
            w.set_account_reference("ACC-0001");
            w.select_category(to);

            let expected = catalog.first_provider(to).expect("provider");
            let s = w.selections();
            assert_eq!(s.category_id(), to);
            assert_eq!(s.provider_id(), expected.id);
            assert_eq!(s.amount(), expected.amount_options[0]);
            assert_eq!(s.account_reference(), "");
        }
    }
}

#[test]
fn derived_values_for_every_provider_and_amount() {
    let catalog = BillCatalog::nigeria();
    let mut w = BillWizard::nigeria().expect("wizard");
    for p in catalog.providers() {
        w.select_provider(&p.id);
        for amount in &p.amount_options {
            w.pick_amount(&p.id, *amount);
            let d = w.derived();
            let a = Decimal::from(*amount);
            assert_eq!(d.service_fee, a * p.fee_percent / Decimal::from(100));
            assert_eq!(d.total_amount, a + d.service_fee);
            assert_eq!(d.foreign_amount, a / Decimal::from(1500));
        }
    }
    w.select_provider("ikeja-electric-prepaid");
    assert_eq!(w.derived().service_fee, Decimal::from(100));
    assert_eq!(w.derived().total_amount, Decimal::from(5100));
}

#[test]
fn full_bill_payment_scenario() {
    let mut w = BillWizard::nigeria().expect("wizard");
    let t = w.pick_contact(BillWizard::recipient_contacts()[0]);
    assert!(matches!(t, Transition::Jumped { to, .. } if to == BILL_TYPE));

    w.select_category(BillCategoryId::Tv);
    assert_eq!(w.selections().provider_id(), "dstv-compact");
    assert_eq!(w.selections().amount(), 13500);

    w.set_account_reference("123456");
    assert!(w.can_continue());
    w.next();
    assert_eq!(w.engine().current_step(), REVIEW);
    assert_eq!(w.primary_label(), "Pay ₦13,662");

    let t = w.primary_action();
    assert!(matches!(t, Transition::Committed { .. }));
    assert_eq!(w.current_step_index(), 1);
    assert_eq!(w.selections().category_id(), BillCategoryId::Electricity);
    assert!(w.selections().recipient().is_none());
    assert_eq!(w.selections().account_reference(), "");

    let receipt = &w.receipts()[0];
    assert_eq!(receipt.provider_name, "DSTV");
    assert_eq!(receipt.total_amount, Decimal::from(13662));
    assert_eq!(receipt.recipient.as_ref().map(|r| r.name.as_str()), Some("Chidi Okonkwo"));
}

#[test]
fn manual_recipient_rejected_when_too_short() {
    let mut w = BillWizard::nigeria().expect("wizard");
    w.start_manual_entry();
    w.set_manual_name("A");
    w.set_manual_phone("12345");
    assert!(!w.manual_recipient_is_valid());
    assert!(w.confirm_manual_recipient().is_err());
    assert!(w.selections().recipient().is_none());
    assert_eq!(w.current_step_index(), 1);
    assert!(w.is_adding_manual());

    w.set_manual_name("Ada Obi");
    w.set_manual_phone("0803 123 4567");
    let t = w.confirm_manual_recipient().expect("valid manual recipient");
    assert!(matches!(t, Transition::Jumped { .. }));
    assert!(w.selections().recipient().is_some_and(|r| r.is_manual_entry));
}

#[test]
fn jump_past_invalid_provider_is_rejected() {
    let mut w = BillWizard::nigeria().expect("wizard");
    w.pick_contact(BillWizard::recipient_contacts()[0]);
    // Saltar a Review sin referencia dejaría Provider inválido.
    let t = w.jump_to(REVIEW, BillField::Category(BillCategoryId::Tv));
    assert!(matches!(t, Transition::Rejected { reason: JumpRejection::InvalidSelection { step }, .. } if step == PROVIDER));
    assert_eq!(w.selections().category_id(), BillCategoryId::Electricity);
    assert_eq!(w.engine().current_step(), BILL_TYPE);

    let snap = w.snapshot();
    assert_eq!(snap.steps[0].status, StepStatus::Done);
    assert_eq!(snap.steps[1].status, StepStatus::Current);
    assert!(!snap.steps[2].valid);
    assert!(snap.steps[3].valid);
}

#[test]
fn snapshot_fingerprint_tracks_changes() {
    let mut w = BillWizard::nigeria().expect("wizard");
    let a = w.snapshot().fingerprint();
    assert_eq!(a, w.snapshot().fingerprint());
    w.pick_contact(BillWizard::recipient_contacts()[0]);
    assert_ne!(a, w.snapshot().fingerprint());
    let json = serde_json::to_value(w.snapshot()).expect("json");
    assert_eq!(json["primary_label"], "Continue");
    assert_eq!(json["selections"]["category_id"], "electricity");
    assert!(json["derived"]["total_amount"].is_string());
}

#[test]
fn backing_out_of_first_step_abandons_the_wizard() {
    let mut w = wizard_at_provider_step();
    w.select_category(BillCategoryId::Tv);
    w.set_account_reference("123456");
    assert!(matches!(w.back(), Transition::Retreated { .. }));
    assert!(matches!(w.back(), Transition::Retreated { .. }));
    assert_eq!(w.current_step_index(), 1);
    assert!(w.selections().recipient().is_some());

    assert!(matches!(w.back(), Transition::Reset { reason: ResetReason::Abandoned }));
    assert_eq!(w.current_step_index(), 1);
    assert!(w.selections().recipient().is_none());
    assert_eq!(w.selections().category_id(), BillCategoryId::Electricity);
    assert_eq!(w.selections().account_reference(), "");
    assert!(w.engine().event_variants().ends_with(&["Z"]));
}

#[test]
fn receipts_are_bounded_and_can_be_drained() {
    let mut w = BillWizard::nigeria().expect("wizard");
    for _ in 0..RECEIPT_HISTORY_LIMIT + 3 {
        w.pick_contact(BillWizard::recipient_contacts()[0]);
        w.select_category(BillCategoryId::Electricity);
        w.set_account_reference("12345678901");
        w.next();
        assert!(matches!(w.primary_action(), Transition::Committed { .. }));
    }
    assert_eq!(w.receipts().len(), RECEIPT_HISTORY_LIMIT);
    let drained = w.take_receipts();
    assert_eq!(drained.len(), RECEIPT_HISTORY_LIMIT);
    assert!(w.receipts().is_empty());
}
