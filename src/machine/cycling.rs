//! Background cycling machine.

use crate::core::{seeded_rng, PhaseTimer, State, StateHistory, StateTransition, Toggle};
use crate::machine::config::CycleConfig;
use crate::machine::error::{ConfigError, MachineError};
use crate::queue::{BlockingQueue, MessageSource, QueueError};
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

/// Block on `source` until `target` is received.
///
/// Values that do not match are discarded. Returns how many were discarded,
/// or the source's error if it closes first.
pub fn wait_for<S, Q>(source: &Q, target: &S) -> Result<usize, QueueError>
where
    S: State,
    Q: MessageSource<S> + ?Sized,
{
    let mut discarded = 0;
    loop {
        let state = source.receive()?;
        if state == *target {
            return Ok(discarded);
        }
        trace!(
            received = state.name(),
            target = target.name(),
            "discarding non-matching state"
        );
        discarded += 1;
    }
}

struct Shared<S: State> {
    queue: BlockingQueue<S>,
    current: RwLock<S>,
    history: Mutex<StateHistory<S>>,
    cancel: AtomicBool,
}

impl<S: Toggle> Shared<S> {
    /// Flip the current state, record it, then hand it to consumers.
    fn publish(&self, ticks: u64) {
        let (from, to) = {
            let mut current = self.current.write();
            let from = current.clone();
            *current = from.toggled();
            (from, current.clone())
        };

        debug!(from = from.name(), to = to.name(), ticks, "state flipped");

        self.history.lock().record(StateTransition {
            from,
            to: to.clone(),
            timestamp: Utc::now(),
            ticks,
        });
        self.queue.send(to);
    }
}

enum Lifecycle {
    Idle,
    Running(JoinHandle<()>),
    Stopped,
}

/// Two-state machine that flips on a randomized timer.
///
/// A worker thread started by [`start`](Self::start) sleeps one tick at a
/// time and flips the state whenever the [`PhaseTimer`] threshold is
/// reached. Each new state is sent to an internal [`BlockingQueue`] which
/// [`wait_for_state`](Self::wait_for_state) drains.
///
/// The machine is `Sync`; share it behind an `Arc` to wait from several
/// threads. All waiters drain the same queue, so a value is seen by exactly
/// one of them. Concurrent waiters with different targets can therefore
/// consume each other's flips; use one target per machine at a time.
///
/// # Example
///
/// ```rust,no_run
/// use light_cycle::{CycleConfig, CyclingStateMachine, LightPhase};
///
/// let machine = CyclingStateMachine::new(LightPhase::Red, CycleConfig::default()).unwrap();
/// machine.start().unwrap();
/// machine.wait_for_state(LightPhase::Green).unwrap();
/// machine.stop().unwrap();
/// ```
pub struct CyclingStateMachine<S: Toggle + 'static> {
    id: Uuid,
    config: CycleConfig,
    shared: Arc<Shared<S>>,
    lifecycle: Mutex<Lifecycle>,
}

impl<S: Toggle + 'static> CyclingStateMachine<S> {
    /// Create an idle machine in `initial`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate.
    pub fn new(initial: S, config: CycleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let shared = Shared {
            queue: BlockingQueue::new(),
            current: RwLock::new(initial),
            history: Mutex::new(StateHistory::with_limit(config.history_limit)),
            cancel: AtomicBool::new(false),
        };
        Ok(Self {
            id: Uuid::new_v4(),
            config,
            shared: Arc::new(shared),
            lifecycle: Mutex::new(Lifecycle::Idle),
        })
    }

    /// Spawn the cycling worker and return immediately.
    ///
    /// # Errors
    ///
    /// [`MachineError::AlreadyStarted`] if the worker is running,
    /// [`MachineError::Stopped`] if the machine was stopped, or
    /// [`MachineError::Spawn`] if the OS refused the thread.
    pub fn start(&self) -> Result<(), MachineError> {
        let mut lifecycle = self.lifecycle.lock();
        match *lifecycle {
            Lifecycle::Running(_) => return Err(MachineError::AlreadyStarted),
            Lifecycle::Stopped => return Err(MachineError::Stopped),
            Lifecycle::Idle => {}
        }

        let id = self.id;
        let config = self.config.clone();
        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name(format!("light-cycle-{}", id.simple()))
            .spawn(move || run_cycle(id, &config, &shared))?;
        *lifecycle = Lifecycle::Running(handle);

        let initial = self.current_state();
        info!(
            machine = %self.id,
            initial = initial.name(),
            tick_micros = self.config.tick_micros,
            min_ticks = self.config.min_ticks,
            max_ticks = self.config.max_ticks,
            "cycling started"
        );
        Ok(())
    }

    /// Cancel and join the worker, then close the queue.
    ///
    /// Idempotent. Blocked waiters wake with [`MachineError::Stopped`] once
    /// the flips already queued are drained. A stopped machine cannot be
    /// restarted.
    ///
    /// # Errors
    ///
    /// [`MachineError::WorkerPanicked`] if the worker thread panicked.
    pub fn stop(&self) -> Result<(), MachineError> {
        // Held across the join so a concurrent caller returns only once the
        // worker has exited.
        let mut lifecycle = self.lifecycle.lock();
        let previous = std::mem::replace(&mut *lifecycle, Lifecycle::Stopped);
        self.shared.cancel.store(true, Ordering::Release);

        let result = match previous {
            Lifecycle::Running(handle) => {
                let joined = handle.join().map_err(|_| {
                    warn!(machine = %self.id, "cycling worker panicked");
                    MachineError::WorkerPanicked
                });
                let flips = self.shared.history.lock().len();
                info!(machine = %self.id, flips, "cycling stopped");
                joined
            }
            Lifecycle::Idle | Lifecycle::Stopped => Ok(()),
        };

        self.shared.queue.close();
        drop(lifecycle);
        result
    }

    /// Block until `target` is published.
    ///
    /// Flips that do not match are discarded.
    ///
    /// # Errors
    ///
    /// [`MachineError::Stopped`] if the machine stops before `target` arrives.
    pub fn wait_for_state(&self, target: S) -> Result<(), MachineError> {
        let discarded =
            wait_for(&self.shared.queue, &target).map_err(|_| MachineError::Stopped)?;
        debug!(
            machine = %self.id,
            target = target.name(),
            discarded,
            "target state observed"
        );
        Ok(())
    }

    /// The most recently committed state.
    ///
    /// A snapshot only; use [`wait_for_state`](Self::wait_for_state) to
    /// synchronize on a flip.
    pub fn current_state(&self) -> S {
        self.shared.current.read().clone()
    }

    /// Copy of the retained flip history.
    pub fn history(&self) -> StateHistory<S> {
        self.shared.history.lock().clone()
    }

    /// Whether the worker thread is alive.
    ///
    /// Turns false as soon as the worker exits, including by panic.
    pub fn is_running(&self) -> bool {
        match &*self.lifecycle.lock() {
            Lifecycle::Running(handle) => !handle.is_finished(),
            Lifecycle::Idle | Lifecycle::Stopped => false,
        }
    }

    /// Flips published but not yet received by a waiter.
    pub fn pending(&self) -> usize {
        self.shared.queue.len()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }
}

impl<S: Toggle + 'static> Drop for CyclingStateMachine<S> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

fn run_cycle<S: Toggle>(id: Uuid, config: &CycleConfig, shared: &Shared<S>) {
    let span = tracing::debug_span!("cycle", machine = %id);
    let _enter = span.enter();

    let mut timer = PhaseTimer::new(seeded_rng(config.seed), config.min_ticks, config.max_ticks);
    let tick = config.tick();
    debug!(threshold = timer.threshold(), "first threshold drawn");

    while !shared.cancel.load(Ordering::Acquire) {
        thread::sleep(tick);
        if shared.cancel.load(Ordering::Acquire) {
            break;
        }
        if let Some(ticks) = timer.tick() {
            shared.publish(ticks);
            trace!(next_threshold = timer.threshold(), "threshold redrawn");
        }
    }
}
