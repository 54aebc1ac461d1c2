//! Engine module: controlador de transiciones, builder y resultados.

pub mod builder;
pub mod core;
pub mod transition;

pub use builder::{EngineBuilder, EngineBuilderInit};
pub use core::FlowEngine;
pub use transition::{JumpRejection, ResetReason, Transition};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CoreEngineError;
    use crate::repo::{FlowRepository, InMemoryFlowRepository};
    use crate::selection::{SelectionField, SelectionStore};
    use crate::step::{PredicateStep, StepId};
    use serde::Serialize;

    // Selecciones de ejemplo: cambiar el país invalida la ciudad elegida.
    #[derive(Debug, Clone, Default, Serialize)]
    struct Trip {
        country: Option<String>,
        city: Option<String>,
    }

    #[derive(Debug)]
    enum TripField {
        Country(String),
        City(String),
    }

    impl SelectionField for TripField {
        fn name(&self) -> &'static str {
            match self {
                TripField::Country(_) => "country",
                TripField::City(_) => "city",
            }
        }
    }

    impl SelectionStore for Trip {
        type Field = TripField;
        type Derived = usize;

        fn set_field(&mut self, field: TripField) -> bool {
            match field {
                TripField::Country(c) => {
                    if self.country.as_deref() == Some(c.as_str()) {
                        return false;
                    }
                    self.country = Some(c);
                    self.city = None;
                    true
                }
                TripField::City(c) => {
                    self.city = Some(c);
                    true
                }
            }
        }

        fn derived(&self) -> usize {
            self.city.as_ref().map(|c| c.len()).unwrap_or(0)
        }
    }

    fn trip_engine() -> FlowEngine<Trip> {
        FlowEngine::new(Trip::default()).first_step(PredicateStep::input(1, "Country", |t: &Trip| t.country.is_some()))
                                        .add_step(PredicateStep::input(2, "City", |t: &Trip| t.city.is_some()))
                                        .add_step(PredicateStep::review(3, "Review"))
                                        .build()
                                        .expect("valid definition")
    }

    #[test]
    fn advance_is_guarded_by_current_step() {
        let mut engine = trip_engine();
        let t = engine.advance();
        assert!(matches!(t, Transition::Blocked { step } if step == StepId(1)));
        assert_eq!(engine.current_step_index(), 1);

        engine.set_field(TripField::Country("NG".into()));
        assert!(matches!(engine.advance(), Transition::Advanced { from: StepId(1), to: StepId(2) }));
        assert!(engine.advance().is_blocked());
        assert_eq!(engine.event_variants(), vec!["I", "B", "F", "A", "B"]);
    }

    #[test]
    fn cursor_stays_within_bounds() {
        let mut engine = trip_engine();
        assert!(matches!(engine.retreat(), Transition::Unchanged { step: StepId(1) }));
        engine.set_field(TripField::Country("NG".into()));
        engine.advance();
        engine.set_field(TripField::City("Lagos".into()));
        engine.advance();
        assert!(engine.is_terminal());
        assert!(matches!(engine.advance(), Transition::Unchanged { step: StepId(3) }));
        assert_eq!(engine.current_step_index(), 3);
        assert!(matches!(engine.retreat(), Transition::Retreated { from: StepId(3), to: StepId(2) }));
    }

    #[test]
    fn primary_action_commits_and_resets_everything() {
        let mut engine = trip_engine();
        engine.set_field(TripField::Country("NG".into()));
        engine.primary_action();
        engine.set_field(TripField::City("Abuja".into()));
        engine.primary_action();
        assert_eq!(engine.derived(), 5);

        match engine.primary_action() {
            Transition::Committed { selections, fingerprint } => {
                assert_eq!(selections.city.as_deref(), Some("Abuja"));
                assert_eq!(fingerprint.len(), 64);
            }
            other => panic!("expected commit, got {other:?}"),
        }
        assert_eq!(engine.current_step_index(), 1);
        assert!(engine.selections().country.is_none());
        assert!(engine.selections().city.is_none());
    }

    #[test]
    fn jump_writes_field_and_moves_atomically() {
        let mut engine = trip_engine();
        let t = engine.jump_to(StepId(2), TripField::Country("KE".into()));
        assert!(matches!(t, Transition::Jumped { from: StepId(1), to: StepId(2) }));
        assert_eq!(engine.selections().country.as_deref(), Some("KE"));
        assert_eq!(engine.current_step_index(), 2);
    }

    #[test]
    fn jump_is_rejected_when_it_would_skip_an_invalid_step() {
        let mut engine = trip_engine();
        // Escribir la ciudad no valida el paso "Country".
        let t = engine.jump_to(StepId(3), TripField::City("Nairobi".into()));
        assert!(matches!(t,
                         Transition::Rejected { reason: JumpRejection::InvalidSelection { step: StepId(1) }, .. }));
        assert!(engine.selections().city.is_none(), "rejected jump must not write the field");
        assert_eq!(engine.current_step_index(), 1);

        let t = engine.jump_to(StepId(42), TripField::Country("KE".into()));
        assert!(matches!(t, Transition::Rejected { reason: JumpRejection::UnknownStep, .. }));
        assert!(engine.selections().country.is_none());
    }

    #[test]
    fn cascading_field_resets_downstream_validity() {
        let mut engine = trip_engine();
        engine.set_field(TripField::Country("NG".into()));
        engine.set_field(TripField::City("Lagos".into()));
        assert!(engine.validate_step(StepId(2)));
        assert!(engine.set_field(TripField::Country("GH".into())));
        assert!(!engine.validate_step(StepId(2)));
        assert!(!engine.validate_step(StepId(99)));
    }

    #[test]
    fn replay_reconstructs_cursor_from_events() {
        let mut engine = trip_engine();
        engine.jump_to(StepId(2), TripField::Country("NG".into()));
        engine.set_field(TripField::City("Kano".into()));
        engine.advance();
        engine.advance();
        engine.retreat();
        let instance = InMemoryFlowRepository::new().load(engine.flow_id(), &engine.events(), engine.definition());
        assert_eq!(instance.cursor, engine.current_step_index());
        assert_eq!(instance.commits, 0);

        engine.advance();
        engine.primary_action();
        let instance = InMemoryFlowRepository::new().load(engine.flow_id(), &engine.events(), engine.definition());
        assert_eq!(instance.cursor, 1);
        assert_eq!(instance.commits, 1);
        assert_eq!(instance.resets, 1);
        assert!(instance.last_fingerprint.is_some());
    }

    #[test]
    fn abandon_restores_initial_values() {
        let mut engine = trip_engine();
        engine.jump_to(StepId(2), TripField::Country("NG".into()));
        assert!(matches!(engine.abandon(), Transition::Reset { reason: ResetReason::Abandoned }));
        assert_eq!(engine.current_step_index(), 1);
        assert!(engine.selections().country.is_none());
    }

    #[test]
    fn unchanged_writes_are_not_logged() {
        let mut engine = trip_engine();
        assert!(engine.set_field(TripField::Country("NG".into())));
        assert!(!engine.set_field(TripField::Country("NG".into())));
        assert!(!engine.set_field(TripField::Country("NG".into())));
        assert_eq!(engine.event_variants(), vec!["I", "F"]);
        assert_eq!(engine.event_count(), 2);
    }

    #[test]
    fn builder_rejects_duplicate_ids() {
        let res = FlowEngine::new(Trip::default()).first_step(PredicateStep::input(1, "A", |_: &Trip| true))
                                                  .add_step(PredicateStep::review(1, "B"))
                                                  .build();
        assert_eq!(res.err(), Some(CoreEngineError::DuplicateStepId(StepId(1))));
    }
}
