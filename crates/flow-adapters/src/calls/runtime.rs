//! Runtime tokio del simulador de llamadas.
//!
//! Un único bucle posee el `CallSimulator`: aplica comandos de usuario y
//! disparos de timer de uno en uno y publica un `CallSnapshot` tras cada
//! evento.

use std::collections::HashMap;
use std::fmt::Debug;

use flow_core::{PhaseToken, Scheduler, TimerFired, TimerRequest};
use log::{debug, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::{CallCommand, CallPhase, CallSimulator, CallTimings, TimerKind};
use crate::error::AdapterError;
use crate::navigation::Destination;
use crate::presentation::CallSnapshot;

/// Scheduler sobre `tokio::time`: una tarea por timer que entrega el disparo
/// por un canal. Cancelar aborta la tarea.
#[derive(Debug)]
pub struct TokioScheduler<K> {
    tx: mpsc::UnboundedSender<TimerFired<K>>,
    tasks: HashMap<PhaseToken, JoinHandle<()>>,
}

impl<K> TokioScheduler<K> {
    pub fn new(tx: mpsc::UnboundedSender<TimerFired<K>>) -> Self {
        Self { tx,
               tasks: HashMap::new() }
    }

    /// Scheduler + receptor de disparos.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TimerFired<K>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl<K> Scheduler<K> for TokioScheduler<K> where K: Clone + Debug + Send + 'static
{
    fn schedule(&mut self, request: TimerRequest<K>) {
        self.cancel(request.token);
        let tx = self.tx.clone();
        let token = request.token;
        let handle = tokio::spawn(async move {
            let fired = TimerFired { token: request.token,
                                     kind: request.kind };
            if request.repeat && !request.delay.is_zero() {
                let mut ticker = time::interval_at(Instant::now() + request.delay, request.delay);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    if tx.send(fired.clone()).is_err() {
                        break;
                    }
                }
            } else {
                time::sleep(request.delay).await;
                let _ = tx.send(fired);
            }
        });
        self.tasks.insert(token, handle);
    }

    fn cancel(&mut self, token: PhaseToken) {
        if let Some(handle) = self.tasks.remove(&token) {
            handle.abort();
        }
        self.tasks.retain(|_, h| !h.is_finished());
    }

    fn pending(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }
}

impl<K> Drop for TokioScheduler<K> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[derive(Debug)]
enum LoopMessage {
    Command(CallCommand),
    Shutdown,
}

/// Extremo de control del runtime.
#[derive(Debug)]
pub struct CallHandle {
    commands: mpsc::UnboundedSender<LoopMessage>,
    snapshots: watch::Receiver<CallSnapshot>,
    destinations: mpsc::UnboundedReceiver<Destination>,
    join: JoinHandle<Vec<CallPhase>>,
}

pub struct CallRuntime;

impl CallRuntime {
    /// Lanza el bucle del simulador en la runtime tokio actual.
    pub fn spawn(timings: CallTimings) -> CallHandle {
        let (scheduler, mut timer_rx) = TokioScheduler::<TimerKind>::channel();
        let mut sim = CallSimulator::new(scheduler, timings);
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<LoopMessage>();
        let (snap_tx, snap_rx) = watch::channel(sim.snapshot());
        let (nav_tx, nav_rx) = mpsc::unbounded_channel();

        let join = tokio::spawn(async move {
            loop {
                tokio::select! {
                    msg = cmd_rx.recv() => match msg {
                        None | Some(LoopMessage::Shutdown) => break,
                        Some(LoopMessage::Command(cmd)) => {
                            debug!("call runtime command {cmd:?}");
                            if let Some(dest) = sim.apply(cmd) {
                                let _ = nav_tx.send(dest);
                            }
                        }
                    },
                    Some(fired) = timer_rx.recv() => {
                        sim.on_timer(fired);
                    }
                }
                if snap_tx.send(sim.snapshot()).is_err() {
                    debug!("call runtime has no snapshot subscribers left");
                }
            }
            sim.phase_history().to_vec()
        });

        CallHandle { commands: cmd_tx,
                     snapshots: snap_rx,
                     destinations: nav_rx,
                     join }
    }
}

impl CallHandle {
    pub fn send(&self, command: CallCommand) -> Result<(), AdapterError> {
        self.commands
            .send(LoopMessage::Command(command))
            .map_err(|_| AdapterError::RuntimeClosed)
    }

    /// Último snapshot publicado.
    pub fn snapshot(&self) -> CallSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CallSnapshot> {
        self.snapshots.clone()
    }

    /// Espera hasta que un snapshot cumpla `pred`.
    pub async fn wait_for<F>(&mut self, pred: F) -> Result<CallSnapshot, AdapterError>
        where F: FnMut(&CallSnapshot) -> bool
    {
        let snap = self.snapshots.wait_for(pred).await.map_err(|_| AdapterError::RuntimeClosed)?;
        Ok(snap.clone())
    }

    /// Siguiente destino emitido, si ya hay alguno.
    pub fn try_destination(&mut self) -> Option<Destination> {
        self.destinations.try_recv().ok()
    }

    pub async fn next_destination(&mut self) -> Option<Destination> {
        self.destinations.recv().await
    }

    /// Detiene el bucle y devuelve el historial de fases.
    pub async fn shutdown(self) -> Result<Vec<CallPhase>, AdapterError> {
        if self.commands.send(LoopMessage::Shutdown).is_err() {
            warn!("call runtime already stopped");
        }
        self.join.await.map_err(|e| AdapterError::Join(e.to_string()))
    }
}
