//! Stopwatch timing and lap history.
//!
//! `StopwatchState` is plain data with total transition functions.
//! `Stopwatch` owns that state together with the `PeriodicTask` that
//! advances it once per second while running. Dropping a `Stopwatch`
//! cancels its task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

/// Interval between elapsed-time increments.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Render whole seconds as `MM : SS`.
///
/// Minutes are not wrapped into hours, so past 99 minutes the minute
/// field grows to three or more digits.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02} : {:02}", seconds / 60, seconds % 60)
}

/// Angle of the clock hand in degrees, clockwise from twelve o'clock.
///
/// The hand sweeps once per minute while running and rests at zero when
/// stopped.
pub fn hand_angle(state: &StopwatchState) -> f64 {
    if state.is_running {
        (state.elapsed_seconds % 60) as f64 * 6.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwatchState {
    pub elapsed_seconds: u64,
    pub is_running: bool,
    pub laps: Vec<String>,
}

impl StopwatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// One elapsed second.
    pub fn tick(&mut self) {
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
    }

    /// Record the current elapsed time and return the formatted entry.
    pub fn lap(&mut self) -> String {
        let entry = format_elapsed(self.elapsed_seconds);
        self.laps.push(entry.clone());
        entry
    }

    /// Stop, zero the elapsed time and forget all laps.
    pub fn clear(&mut self) {
        self.is_running = false;
        self.elapsed_seconds = 0;
        self.laps.clear();
    }

    pub fn set_running(&mut self, running: bool) {
        self.is_running = running;
    }

    pub fn formatted(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

/// A repeating background job on the tokio runtime.
///
/// The first run happens one full period after `spawn`. Dropping the
/// handle aborts the job.
pub struct PeriodicTask {
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(period: Duration, mut job: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let start = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(start, period);
            // A late tick shifts the schedule instead of firing a burst.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                job();
            }
        });

        Self { handle }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// State plus the run it belongs to.
///
/// `abort` does not wait for a job that is already executing on another
/// worker, so each started run carries the generation it was spawned
/// with and only ticks while that generation is current.
#[derive(Debug, Default)]
struct Shared {
    state: StopwatchState,
    generation: u64,
}

impl Shared {
    /// Invalidate the current run.
    fn end_run(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Stopwatch with start/stop, lap and clear.
///
/// `toggle` and `start` must be called from within a tokio runtime
/// because starting spawns the tick task.
pub struct Stopwatch {
    shared: Arc<Mutex<Shared>>,
    ticker: Option<PeriodicTask>,
    period: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    /// Stopwatch whose elapsed counter advances once every `period`.
    pub fn with_period(period: Duration) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared::default())),
            ticker: None,
            period,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        lock_shared(&self.shared)
    }

    pub fn is_running(&self) -> bool {
        self.lock().state.is_running
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.lock().state.elapsed_seconds
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> StopwatchState {
        self.lock().state.clone()
    }

    /// Flip between running and stopped. Returns the new running flag.
    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.stop();
            false
        } else {
            self.start();
            true
        }
    }

    pub fn start(&mut self) {
        if self.ticker.is_some() {
            return;
        }

        let generation = {
            let mut shared = self.lock();
            shared.state.set_running(true);
            shared.generation
        };
        let run = Arc::clone(&self.shared);
        self.ticker = Some(PeriodicTask::spawn(self.period, move || {
            let mut shared = lock_shared(&run);
            if shared.generation == generation {
                shared.state.tick();
            }
        }));
        debug!(generation, "stopwatch started");
    }

    /// Pause. Elapsed time is kept.
    pub fn stop(&mut self) {
        {
            let mut shared = self.lock();
            shared.end_run();
            if shared.state.is_running {
                shared.state.set_running(false);
                debug!(elapsed = shared.state.elapsed_seconds, "stopwatch stopped");
            }
        }
        self.ticker = None;
    }

    pub fn lap(&mut self) -> String {
        self.lock().state.lap()
    }

    pub fn clear(&mut self) {
        {
            let mut shared = self.lock();
            shared.end_run();
            shared.state.clear();
        }
        self.ticker = None;
        debug!("stopwatch cleared");
    }
}

fn lock_shared(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
