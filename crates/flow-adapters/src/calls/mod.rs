//! Simulador de llamadas (Idle → Connecting → Ringing → InCall → Ended).

mod command;
mod phase;
pub mod runtime;
mod simulator;
mod timings;

pub use command::CallCommand;
pub use phase::{eligibility, CallPhase, TimerKind};
pub use runtime::{CallHandle, CallRuntime, TokioScheduler};
pub use simulator::{CallSimulator, PHASE_HISTORY_LIMIT};
pub use timings::CallTimings;
