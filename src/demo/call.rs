use flow_adapters::calls::{CallCommand, CallPhase, CallRuntime, CallTimings};
use flow_adapters::navigation::Destination;
use flow_domain::RECENT_CALLS;
use log::info;
use serde::Serialize;

use crate::cli::CallArgs;
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct CallReport {
    pub contact: String,
    pub minutes_left: u32,
    pub phases: Vec<CallPhase>,
    pub duration_seconds: u64,
    pub destination: Option<Destination>,
}

/// Llama a una entrada de recientes sobre el runtime tokio y cuelga tras
/// `end_after` segundos de llamada.
pub async fn run_call(args: &CallArgs, timings: CallTimings) -> Result<CallReport, AppError> {
    let call = RECENT_CALLS.get(args.recent)
                           .ok_or_else(|| AppError::Usage(format!("--recent must be below {}", RECENT_CALLS.len())))?;
    let mut handle = CallRuntime::spawn(timings);
    handle.send(CallCommand::Start(call.clone()))?;
    let entered = handle.wait_for(|s| s.phase != CallPhase::Idle).await?;

    let mut duration_seconds = 0;
    let live = match entered.phase {
        CallPhase::OutOfMinutes => {
            handle.send(CallCommand::AddMinutes)?;
            false
        }
        CallPhase::LowOnMinutes if !args.anyway => {
            handle.send(CallCommand::Dismiss)?;
            false
        }
        CallPhase::LowOnMinutes => {
            handle.send(CallCommand::CallAnyway)?;
            true
        }
        _ => true,
    };
    if live {
        handle.wait_for(|s| s.phase == CallPhase::InCall).await?;
        let end_after = args.end_after;
        handle.wait_for(|s| s.duration_seconds >= end_after).await?;
        handle.send(CallCommand::EndCall)?;
        duration_seconds = handle.wait_for(|s| s.phase == CallPhase::Ended).await?.duration_seconds;
        handle.send(CallCommand::ReturnHome)?;
    }
    let destination = handle.next_destination().await;
    let phases = handle.shutdown().await?;
    info!("call demo to {} finished after {:?}", call.contact.name, phases);
    Ok(CallReport { contact: call.contact.name.clone(),
                    minutes_left: call.minutes_left,
                    phases,
                    duration_seconds,
                    destination })
}
